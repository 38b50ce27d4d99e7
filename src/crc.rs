//! CRC-8 calculation for Sdp3x data words
//!
//! Copyright 2019 Ryan Kurte

use crate::device::{CRC_INIT, CRC_POLY, CRC_XOR};

/// Lookup table for the device CRC-8, generated at compile time from the bitwise algorithm
pub const CRC8_TABLE: [u8; 256] = crc8_table_gen();

/// Compute the table entry for a single register value
const fn crc8_step(v: u8) -> u8 {
    let mut crc = v;
    let mut bit = 0;

    while bit < 8 {
        if crc & 0x80 != 0 {
            crc = (crc << 1) ^ CRC_POLY;
        } else {
            crc <<= 1;
        }
        bit += 1;
    }

    crc
}

const fn crc8_table_gen() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;

    while i < 256 {
        table[i] = crc8_step(i as u8);
        i += 1;
    }

    table
}

/// Helper for device CRC-8 calculation, bit by bit
pub fn crc8_bitwise(data: &[u8]) -> u8 {
    let mut crc = CRC_INIT;

    // For each byte
    for v in data {
        // XOR with current byte
        crc ^= v;

        // MSB first
        for _bit in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ CRC_POLY;
            } else {
                crc = crc << 1;
            }
        }
    }

    // Apply final xor
    crc ^ CRC_XOR
}

/// Helper for device CRC-8 calculation, using [`CRC8_TABLE`]
pub fn crc8_table(data: &[u8]) -> u8 {
    let crc = data
        .iter()
        .fold(CRC_INIT, |crc, v| CRC8_TABLE[(crc ^ v) as usize]);

    crc ^ CRC_XOR
}

/// Device CRC-8, table driven when the `lookup-table` feature is enabled
#[cfg(feature = "lookup-table")]
pub fn crc8(data: &[u8]) -> u8 {
    crc8_table(data)
}

/// Device CRC-8, table driven when the `lookup-table` feature is enabled
#[cfg(not(feature = "lookup-table"))]
pub fn crc8(data: &[u8]) -> u8 {
    crc8_bitwise(data)
}

/// Check a received data word against its checksum
pub fn validate(data: &[u8; 2], crc: u8) -> bool {
    crc8(data) == crc
}
