//! Service identifiers, object types and the bit-packed flag bytes.

/// Service carried by a frame payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Service {
    #[default]
    ReadProperty,
    WriteProperty,
    /// A service id this codec does not implement.
    Unknown(u8),
}

impl Service {
    pub fn id(self) -> u8 {
        match self {
            Service::ReadProperty => 0x01,
            Service::WriteProperty => 0x02,
            Service::Unknown(id) => id,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Service::ReadProperty => "read-property",
            Service::WriteProperty => "write-property",
            Service::Unknown(_) => "unknown",
        }
    }
}

impl From<u8> for Service {
    fn from(id: u8) -> Self {
        match id {
            0x01 => Service::ReadProperty,
            0x02 => Service::WriteProperty,
            other => Service::Unknown(other),
        }
    }
}

/// Category of the addressed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectType {
    #[default]
    UserInfo,
    Parameter,
    Unknown(u16),
}

impl ObjectType {
    pub fn id(self) -> u16 {
        match self {
            ObjectType::UserInfo => 0x0001,
            ObjectType::Parameter => 0x0002,
            ObjectType::Unknown(id) => id,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ObjectType::UserInfo => "user-info",
            ObjectType::Parameter => "parameter",
            ObjectType::Unknown(_) => "unknown",
        }
    }
}

impl From<u16> for ObjectType {
    fn from(id: u16) -> Self {
        match id {
            0x0001 => ObjectType::UserInfo,
            0x0002 => ObjectType::Parameter,
            other => ObjectType::Unknown(other),
        }
    }
}

/// Well-known property ids.
pub mod property_id {
    /// Value of a user info.
    pub const VALUE: u16 = 0x0001;
    /// Parameter value, stored in flash.
    pub const VALUE_QSP: u16 = 0x0005;
    pub const MIN_QSP: u16 = 0x0006;
    pub const MAX_QSP: u16 = 0x0007;
    /// User level required to change the parameter.
    pub const LEVEL_QSP: u16 = 0x0008;
    /// Parameter value, not persisted across a reset.
    pub const UNSAVED_VALUE_QSP: u16 = 0x000D;
}

/// Decoded frame flags byte. Only meaningful on responses.
///
/// ```text
/// bit 7..5  reserved
/// bit 4     new datalogger file present
/// bit 3     sd card full
/// bit 2     sd card present
/// bit 1     rcc was reset
/// bit 0     message pending
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameFlags {
    /// Bits 7..5, right-aligned.
    pub reserved: u8,
    pub new_datalogger_file_present: bool,
    pub sd_card_full: bool,
    pub sd_card_present: bool,
    pub rcc_reset: bool,
    pub message_pending: bool,
}

impl FrameFlags {
    pub fn from_byte(flags: u8) -> Self {
        Self {
            reserved: (flags >> 5) & 0x07,
            new_datalogger_file_present: (flags >> 4) & 0x01 != 0,
            sd_card_full: (flags >> 3) & 0x01 != 0,
            sd_card_present: (flags >> 2) & 0x01 != 0,
            rcc_reset: (flags >> 1) & 0x01 != 0,
            message_pending: flags & 0x01 != 0,
        }
    }

    pub fn to_byte(self) -> u8 {
        ((self.reserved & 0x07) << 5)
            | (u8::from(self.new_datalogger_file_present) << 4)
            | (u8::from(self.sd_card_full) << 3)
            | (u8::from(self.sd_card_present) << 2)
            | (u8::from(self.rcc_reset) << 1)
            | u8::from(self.message_pending)
    }
}

/// Decoded service flags byte. Always zero on a request.
///
/// ```text
/// bit 7..2  reserved
/// bit 1     response
/// bit 0     error
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceFlags {
    /// Bits 7..2, right-aligned.
    pub reserved: u8,
    pub is_response: bool,
    pub error: bool,
}

impl ServiceFlags {
    pub fn from_byte(flags: u8) -> Self {
        Self {
            reserved: (flags >> 2) & 0x3F,
            is_response: (flags >> 1) & 0x01 != 0,
            error: flags & 0x01 != 0,
        }
    }

    pub fn to_byte(self) -> u8 {
        ((self.reserved & 0x3F) << 2) | (u8::from(self.is_response) << 1) | u8::from(self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_flags_bit_positions() {
        let flags = FrameFlags::from_byte(0x22);
        assert_eq!(flags.reserved, 1);
        assert!(flags.rcc_reset);
        assert!(!flags.message_pending);
        assert!(!flags.sd_card_present);
        assert_eq!(flags.to_byte(), 0x22);

        let flags = FrameFlags::from_byte(0b0001_1101);
        assert!(flags.new_datalogger_file_present);
        assert!(flags.sd_card_full);
        assert!(flags.sd_card_present);
        assert!(!flags.rcc_reset);
        assert!(flags.message_pending);
    }

    #[test]
    fn service_flags_bit_positions() {
        let flags = ServiceFlags::from_byte(0x03);
        assert!(flags.is_response);
        assert!(flags.error);
        assert_eq!(flags.reserved, 0);

        let flags = ServiceFlags::from_byte(0xFE);
        assert!(flags.is_response);
        assert!(!flags.error);
        assert_eq!(flags.reserved, 0x3F);
        assert_eq!(flags.to_byte(), 0xFE);
    }

    #[test]
    fn every_flag_byte_survives_unpacking() {
        for byte in 0..=u8::MAX {
            assert_eq!(FrameFlags::from_byte(byte).to_byte(), byte);
            assert_eq!(ServiceFlags::from_byte(byte).to_byte(), byte);
        }
    }

    #[test]
    fn unknown_ids_are_preserved() {
        assert_eq!(Service::from(0x07), Service::Unknown(0x07));
        assert_eq!(Service::from(0x07).id(), 0x07);
        assert_eq!(ObjectType::from(3), ObjectType::Unknown(3));
        assert_eq!(ObjectType::from(2), ObjectType::Parameter);
        assert_eq!(Service::WriteProperty.id(), 2);
    }
}
