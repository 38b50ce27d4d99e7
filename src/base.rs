//! Base communication implementation for interacting with Sdp3x device
//!
//! Copyright 2019 Ryan Kurte

use core::fmt::Debug;

use embedded_hal::blocking::i2c;

use crate::Error;
use crate::device::*;

/// Base API for reading and writing to the device
/// This should not be required by consumers, but is exposed to support alternate transports
pub trait Base<Err> {
    /// Write raw command bytes to the device at the provided address
    fn write_command(&mut self, address: u8, bytes: &[u8]) -> Result<(), Error<Err>>;
    /// Read raw bytes from the device at the provided address, filling the buffer
    fn read_bytes(&mut self, address: u8, data: &mut [u8]) -> Result<(), Error<Err>>;
    /// Write a single byte to the bus general call address
    fn write_general_call(&mut self, byte: u8) -> Result<(), Error<Err>>;
}

/// Base implementation for I2C devices
impl <Conn, Err> Base<Err> for Conn where
    Conn: i2c::Read<Error=Err> + i2c::Write<Error=Err>,
    Err: Debug,
{
    fn write_command(&mut self, address: u8, bytes: &[u8]) -> Result<(), Error<Err>> {
        trace!("Writing to {:#04x}: {:02x?}", address, bytes);

        self.write(address, bytes).map_err(Error::Transport)
    }

    fn read_bytes(&mut self, address: u8, data: &mut [u8]) -> Result<(), Error<Err>> {
        self.read(address, data).map_err(Error::Transport)?;

        trace!("Read from {:#04x}: {:02x?}", address, data);

        Ok(())
    }

    fn write_general_call(&mut self, byte: u8) -> Result<(), Error<Err>> {
        trace!("Writing general call: {:#04x}", byte);

        self.write(GENERAL_CALL_ADDRESS, &[byte]).map_err(Error::Transport)
    }
}
