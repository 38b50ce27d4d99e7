//! Conversion of raw Sdp3x readings into physical units
//!
//! Copyright 2019 Ryan Kurte

/// Temperature scale factor, fixed for all Sdp3x variants (LSB per degree celsius)
pub const TEMPERATURE_SCALE: f32 = 200.0;

/// Sdp3x measurement object
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Measurement {
    /// Differential pressure in Pascals
    /// Range: -500 - 500 Pa (SDP31), -125 - 125 Pa (SDP32)
    pub pressure: f32,
    /// Temperature in degrees celsius
    /// Range: -40 - 85 C
    pub temperature: f32,
}

impl Measurement {
    /// Decode raw signed readings into a measurement
    ///
    /// `scale_factor` is the pressure scale (LSB per Pascal), usually taken from
    /// the third word of the measurement response.
    /// Values are not clamped, the sensor range bounds them.
    pub fn decode(pressure: i16, temperature: i16, scale_factor: i16) -> Self {
        Measurement {
            pressure: pressure as f32 / scale_factor as f32,
            temperature: temperature as f32 / TEMPERATURE_SCALE,
        }
    }
}
