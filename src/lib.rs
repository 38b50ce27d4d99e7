//! Sdp3x differential pressure sensor driver
//!
//! Copyright 2019 Ryan Kurte

#![cfg_attr(not(test), no_std)]

use core::fmt::Debug;
use core::marker::PhantomData;

#[macro_use]
extern crate log;

extern crate embedded_hal;

pub mod base;
pub mod config;
pub mod crc;
pub mod device;
pub mod measurement;

pub use base::Base;
pub use config::Config;
pub use device::*;
pub use measurement::Measurement;

/// Sdp3x sensor object
/// This is generic over an I2C connector and associated error type
pub struct Sdp3x<Conn, Err> {
    conn: Conn,
    config: Config,
    mode: SensorMode,
    _err: PhantomData<Err>,
}

/// Sdp3x error object
#[derive(Debug)]
pub enum Error<ConnErr> {
    /// Underlying bus error
    Transport(ConnErr),
    /// Received data word failed CRC validation
    BadChecksum { expected: u8, received: u8 },
    /// Operation not permitted in the current sensor mode
    InvalidState(SensorMode),
    /// Product identifier does not match a known device
    UnrecognizedDevice(u32),
}

impl <ConnErr> From<ConnErr> for Error<ConnErr> {
    fn from(conn_err: ConnErr) -> Self {
        Error::Transport(conn_err)
    }
}

/// Sdp3x measurement mode, as tracked by the driver
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SensorMode {
    /// No measurement in progress
    Idle,
    /// Continuous measurement started, results may be read repeatedly
    ContinuousMeasuring,
    /// Triggered measurement issued, a single result may be read
    TriggeredPending,
}

/// Known Sdp3x variants
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ProductVariant {
    /// SDP31, 500 Pa range
    Sdp31,
    /// SDP32, 125 Pa range
    Sdp32,
}

impl ProductVariant {
    /// Match a product identifier against known variants
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            PRODUCT_ID_SDP31 => Some(ProductVariant::Sdp31),
            PRODUCT_ID_SDP32 => Some(ProductVariant::Sdp32),
            _ => None,
        }
    }

    /// Product identifier reported by this variant
    pub fn id(&self) -> u32 {
        match self {
            ProductVariant::Sdp31 => PRODUCT_ID_SDP31,
            ProductVariant::Sdp32 => PRODUCT_ID_SDP32,
        }
    }
}

impl <Conn, Err> Sdp3x <Conn, Err> where
    Conn: Base<Err>,
    Err: Debug,
{
    /// Create a new Sdp3x sensor instance without communicating with the device
    pub fn new(conn: Conn, config: Config) -> Self {
        Sdp3x{ conn, config, mode: SensorMode::Idle, _err: PhantomData }
    }

    /// Create a new Sdp3x sensor instance and check a known device is present
    pub fn connect(conn: Conn, config: Config) -> Result<Self, Error<Err>> {
        // Create sensor object
        let mut s = Self::new(conn, config);

        // Check communication
        s.initialize()?;

        // Return sensor
        Ok(s)
    }

    /// Current measurement mode
    pub fn mode(&self) -> SensorMode {
        self.mode
    }

    /// Driver configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Release the underlying connector
    pub fn release(self) -> Conn {
        self.conn
    }

    /// Read the product identifier and check it matches a known device
    pub fn initialize(&mut self) -> Result<ProductVariant, Error<Err>> {
        self.require(&[SensorMode::Idle])?;

        let id = self.try_read_product_id()?;

        match ProductVariant::from_id(id) {
            Some(v) => {
                debug!("Found {:?} (product id: {:#010x})", v, id);
                Ok(v)
            },
            None => Err(Error::UnrecognizedDevice(id)),
        }
    }

    /// Read the 32-bit product identifier
    pub fn try_read_product_id(&mut self) -> Result<u32, Error<Err>> {
        self.write_command(Command::ReadProductIdPart1)?;
        self.write_command(Command::ReadProductIdPart2)?;

        let mut buff = [0u8; 6];
        self.conn.read_bytes(self.config.address, &mut buff)?;

        let high = Self::word(&buff[0..3])?;
        let low = Self::word(&buff[3..6])?;

        Ok((high as u32) << 16 | (low as u32))
    }

    /// Read the 32-bit product identifier
    /// Returns zero if the read failed
    pub fn read_product_id(&mut self) -> u32 {
        match self.try_read_product_id() {
            Ok(v) => v,
            Err(e) => {
                debug!("Error reading product id: {:?}", e);
                0
            }
        }
    }

    /// Soft reset via the I2C general call
    /// Note this resets all devices on the bus that respond to general call
    pub fn soft_reset(&mut self) -> Result<(), Error<Err>> {
        self.conn.write_general_call(GENERAL_CALL_RESET)?;
        self.mode = SensorMode::Idle;
        Ok(())
    }

    /// Put the sensor to sleep
    /// The sensor ignores further commands until woken and re-initialized
    pub fn enter_sleep_mode(&mut self) -> Result<(), Error<Err>> {
        self.require(&[SensorMode::Idle])?;
        self.write_command(Command::EnterSleep)
    }

    /// Start continuous measurement of the selected quantity
    /// With averaging enabled the sensor averages all samples taken since the last read
    pub fn start_continuous(&mut self, kind: MeasurementType, averaging: bool) -> Result<(), Error<Err>> {
        self.require(&[SensorMode::Idle])?;
        self.write_command(Command::continuous(kind, averaging))?;
        self.mode = SensorMode::ContinuousMeasuring;
        Ok(())
    }

    /// Stop continuous measurement
    /// This is a no-op if continuous measurement is not running
    pub fn stop_continuous(&mut self) -> Result<(), Error<Err>> {
        if self.mode != SensorMode::ContinuousMeasuring {
            return Ok(());
        }

        self.write_command(Command::StopContinuous)?;
        self.mode = SensorMode::Idle;
        Ok(())
    }

    /// Trigger a single measurement of the selected quantity
    /// The caller must wait for the measurement to complete before reading it,
    /// unless clock stretching is enabled and supported by the bus
    pub fn trigger_measurement(&mut self, kind: MeasurementType, stretching: bool) -> Result<(), Error<Err>> {
        self.require(&[SensorMode::Idle, SensorMode::TriggeredPending])?;
        self.write_command(Command::triggered(kind, stretching))?;
        self.mode = SensorMode::TriggeredPending;
        Ok(())
    }

    /// Read a measurement from the sensor
    pub fn read_measurement(&mut self) -> Result<Measurement, Error<Err>> {
        self.require(&[SensorMode::ContinuousMeasuring, SensorMode::TriggeredPending])?;

        let mut buff = [0u8; 9];
        self.conn.read_bytes(self.config.address, &mut buff)?;

        // Words MUST all be valid before any are used
        let pressure = Self::word(&buff[0..3])? as i16;
        let temperature = Self::word(&buff[3..6])? as i16;
        let scale_factor = Self::word(&buff[6..9])? as i16;

        let scale_factor = self.config.scale_factor.unwrap_or(scale_factor);

        Ok(Measurement::decode(pressure, temperature, scale_factor))
    }

    /// Check the current mode is one of those allowed for an operation
    fn require(&self, allowed: &[SensorMode]) -> Result<(), Error<Err>> {
        if !allowed.contains(&self.mode) {
            return Err(Error::InvalidState(self.mode));
        }
        Ok(())
    }

    fn write_command(&mut self, command: Command) -> Result<(), Error<Err>> {
        trace!("Writing command: {:?}", command);
        self.conn.write_command(self.config.address, &command.encode())
    }

    /// Convert from a 3-byte response word (MSB, LSB, CRC) into a u16
    fn word(line: &[u8]) -> Result<u16, Error<Err>> {
        let data = [line[0], line[1]];

        if !crc::validate(&data, line[2]) {
            return Err(Error::BadChecksum{ expected: crc::crc8(&data), received: line[2] });
        }

        Ok(u16::from_be_bytes(data))
    }
}
