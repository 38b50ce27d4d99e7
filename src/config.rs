//! Sdp3x driver configuration
//!
//! Copyright 2019 Ryan Kurte

use crate::device::DEFAULT_ADDRESS;

/// Configuration settings for the Sdp3x driver
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    /// I2C address of the sensor
    pub address: u8,
    /// Fixed pressure scale factor (LSB per Pascal)
    /// When unset the scale factor reported by the sensor with each measurement is used
    pub scale_factor: Option<i16>,
}

impl Config {
    /// Create a new configuration for a sensor at the provided address
    pub fn new(address: u8) -> Self {
        Config { address, scale_factor: None }
    }

    /// Set the sensor I2C address
    pub fn address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Use a fixed pressure scale factor in place of the one reported by the sensor
    pub fn scale_factor(mut self, scale_factor: i16) -> Self {
        self.scale_factor = Some(scale_factor);
        self
    }
}

impl Default for Config {
    /// Default address (0x21) with the sensor reported scale factor
    fn default() -> Self {
        Config::new(DEFAULT_ADDRESS)
    }
}
