//! Sdp3x device definitions
//!
//! Copyright 2019 Ryan Kurte

/// Sdp3x default I2C address
pub const DEFAULT_ADDRESS: u8 = 0x21;

/// Alternate addresses, selected by the address jumpers on the board
pub const ALT_ADDRESS_1: u8 = 0x22;
pub const ALT_ADDRESS_2: u8 = 0x23;

/// I2C general call address, used for soft reset
pub const GENERAL_CALL_ADDRESS: u8 = 0x00;

/// Byte written to the general call address to reset all listening devices
pub const GENERAL_CALL_RESET: u8 = 0x06;

pub const CRC_POLY: u8 = 0x31;
pub const CRC_INIT: u8 = 0xff;
pub const CRC_XOR: u8 = 0x00;

/// Product identifier reported by the SDP31
pub const PRODUCT_ID_SDP31: u32 = 0x0301_0101;
/// Product identifier reported by the SDP32
pub const PRODUCT_ID_SDP32: u32 = 0x0301_0201;

/// Sdp3x I2C Command
/// Commands are big endian 16-bit unsigned integers, none of them carry data.
/// Responses are a sequence of 16-bit words, each followed by a CRC-8 checksum
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Command {
    /// Continuous mass flow (temperature compensated) measurement, averaged until read
    ContinuousMassFlowAveraged = 0x3603,

    /// Continuous mass flow (temperature compensated) measurement, no averaging
    ContinuousMassFlowRaw = 0x3608,

    /// Continuous differential pressure measurement, averaged until read
    ContinuousDiffPressureAveraged = 0x3615,

    /// Continuous differential pressure measurement, no averaging
    ContinuousDiffPressureRaw = 0x361E,

    /// Stop continuous measurement
    /// The sensor accepts this in any state
    StopContinuous = 0x3FF9,

    /// Triggered mass flow measurement, no clock stretching
    TriggeredMassFlow = 0x3624,

    /// Triggered mass flow measurement, sensor holds SCL until the result is ready
    TriggeredMassFlowStretching = 0x3726,

    /// Triggered differential pressure measurement, no clock stretching
    TriggeredDiffPressure = 0x362F,

    /// Triggered differential pressure measurement, sensor holds SCL until the result is ready
    TriggeredDiffPressureStretching = 0x372D,

    /// Enter sleep mode, only a wake-up pulse on the bus leaves it
    EnterSleep = 0x3677,

    /// Read product identifier, first half of the command pair
    ReadProductIdPart1 = 0x367C,

    /// Read product identifier, second half of the command pair
    ReadProductIdPart2 = 0xE102,
}

/// Quantity measured by the sensor
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum MeasurementType {
    /// Temperature compensated mass flow
    MassFlow,
    /// Raw differential pressure
    DiffPressure,
}

impl Default for MeasurementType {
    fn default() -> Self {
        MeasurementType::MassFlow
    }
}

impl Command {
    /// Resolve the continuous measurement command for a measurement type and averaging mode
    pub fn continuous(kind: MeasurementType, averaging: bool) -> Command {
        match (kind, averaging) {
            (MeasurementType::MassFlow, true) => Command::ContinuousMassFlowAveraged,
            (MeasurementType::MassFlow, false) => Command::ContinuousMassFlowRaw,
            (MeasurementType::DiffPressure, true) => Command::ContinuousDiffPressureAveraged,
            (MeasurementType::DiffPressure, false) => Command::ContinuousDiffPressureRaw,
        }
    }

    /// Resolve the triggered measurement command for a measurement type and clock stretching mode
    pub fn triggered(kind: MeasurementType, stretching: bool) -> Command {
        match (kind, stretching) {
            (MeasurementType::MassFlow, false) => Command::TriggeredMassFlow,
            (MeasurementType::MassFlow, true) => Command::TriggeredMassFlowStretching,
            (MeasurementType::DiffPressure, false) => Command::TriggeredDiffPressure,
            (MeasurementType::DiffPressure, true) => Command::TriggeredDiffPressureStretching,
        }
    }

    /// Encode the command as transmitted on the wire (high byte first)
    pub fn encode(self) -> [u8; 2] {
        (self as u16).to_be_bytes()
    }
}

impl From<Command> for [u8; 2] {
    fn from(c: Command) -> Self {
        c.encode()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_command_bytes() {
        let tests = &[
            (Command::continuous(MeasurementType::MassFlow, true), [0x36, 0x03]),
            (Command::continuous(MeasurementType::MassFlow, false), [0x36, 0x08]),
            (Command::continuous(MeasurementType::DiffPressure, true), [0x36, 0x15]),
            (Command::continuous(MeasurementType::DiffPressure, false), [0x36, 0x1E]),
            (Command::StopContinuous, [0x3F, 0xF9]),
            (Command::triggered(MeasurementType::MassFlow, false), [0x36, 0x24]),
            (Command::triggered(MeasurementType::MassFlow, true), [0x37, 0x26]),
            (Command::triggered(MeasurementType::DiffPressure, false), [0x36, 0x2F]),
            (Command::triggered(MeasurementType::DiffPressure, true), [0x37, 0x2D]),
            (Command::EnterSleep, [0x36, 0x77]),
            (Command::ReadProductIdPart1, [0x36, 0x7C]),
            (Command::ReadProductIdPart2, [0xE1, 0x02]),
        ];

        for t in tests {
            assert_eq!(t.0.encode(), t.1, "command {:?}", t.0);
            assert_eq!(<[u8; 2]>::from(t.0), t.1);
        }
    }

    #[test]
    fn test_default_measurement_type() {
        assert_eq!(MeasurementType::default(), MeasurementType::MassFlow);
    }
}
