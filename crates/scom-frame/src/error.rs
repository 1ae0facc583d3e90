/// Status codes recorded in a frame's last-error field.
///
/// Data-link and stack codes are produced locally (by the codec or by the
/// transport driving it). Service and property codes arrive in-band inside an
/// error-flagged response. "No error" (`0x0000`) is the absence of a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorCode {
    /// Malformed frame on the data link layer.
    #[error("invalid frame")]
    InvalidFrame,
    /// Wrong destination address.
    #[error("device not found")]
    DeviceNotFound,
    /// No response from the server.
    #[error("response timeout")]
    ResponseTimeout,

    #[error("service not supported")]
    ServiceNotSupported,
    #[error("invalid service argument")]
    InvalidServiceArgument,
    /// A gateway (for example an XCOM-232i) is busy.
    #[error("gateway busy")]
    GatewayBusy,

    #[error("object type not supported")]
    TypeNotSupported,
    #[error("object id not found")]
    ObjectIdNotFound,
    #[error("property not supported")]
    PropertyNotSupported,
    #[error("invalid data length")]
    InvalidDataLength,
    #[error("property is read only")]
    PropertyIsReadOnly,
    #[error("invalid data")]
    InvalidData,
    /// The value is below the minimum limit.
    #[error("data too small")]
    DataTooSmall,
    /// The value is above the maximum limit.
    #[error("data too big")]
    DataTooBig,
    #[error("write property failed")]
    WritePropertyFailed,
    #[error("read property failed")]
    ReadPropertyFailed,
    #[error("access denied")]
    AccessDenied,
    /// The object exists but the gateway does not support it.
    #[error("object not supported")]
    ObjectNotSupported,
    #[error("multicast read not supported")]
    MulticastReadNotSupported,

    #[error("invalid shell argument")]
    InvalidShellArg,
    #[error("port not found")]
    StackPortNotFound,
    #[error("port initialization failed")]
    StackPortInitFailed,
    #[error("port write failed")]
    StackPortWriteFailed,
    #[error("port read failed")]
    StackPortReadFailed,
    /// The caller-supplied buffer cannot hold the operation.
    #[error("buffer too small")]
    BufferTooSmall,
    #[error("property header does not match the request")]
    PropertyHeaderDoesntMatch,

    /// A code outside the known table.
    #[error("unknown error code 0x{0:04X}")]
    Unknown(u16),
}

/// Coarse origin of an [`ErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    DataLink,
    Service,
    Property,
    Stack,
    Unknown,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::DataLink => "data-link",
            ErrorCategory::Service => "service",
            ErrorCategory::Property => "property",
            ErrorCategory::Stack => "stack",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl ErrorCode {
    /// Every named code, in wire order.
    pub const ALL: [ErrorCode; 26] = [
        ErrorCode::InvalidFrame,
        ErrorCode::DeviceNotFound,
        ErrorCode::ResponseTimeout,
        ErrorCode::ServiceNotSupported,
        ErrorCode::InvalidServiceArgument,
        ErrorCode::GatewayBusy,
        ErrorCode::TypeNotSupported,
        ErrorCode::ObjectIdNotFound,
        ErrorCode::PropertyNotSupported,
        ErrorCode::InvalidDataLength,
        ErrorCode::PropertyIsReadOnly,
        ErrorCode::InvalidData,
        ErrorCode::DataTooSmall,
        ErrorCode::DataTooBig,
        ErrorCode::WritePropertyFailed,
        ErrorCode::ReadPropertyFailed,
        ErrorCode::AccessDenied,
        ErrorCode::ObjectNotSupported,
        ErrorCode::MulticastReadNotSupported,
        ErrorCode::InvalidShellArg,
        ErrorCode::StackPortNotFound,
        ErrorCode::StackPortInitFailed,
        ErrorCode::StackPortWriteFailed,
        ErrorCode::StackPortReadFailed,
        ErrorCode::BufferTooSmall,
        ErrorCode::PropertyHeaderDoesntMatch,
    ];

    /// Map a wire code to an error. `0x0000` means "no error" and yields `None`.
    pub fn from_code(code: u16) -> Option<Self> {
        let err = match code {
            0x0000 => return None,
            0x0001 => ErrorCode::InvalidFrame,
            0x0002 => ErrorCode::DeviceNotFound,
            0x0003 => ErrorCode::ResponseTimeout,
            0x0011 => ErrorCode::ServiceNotSupported,
            0x0012 => ErrorCode::InvalidServiceArgument,
            0x0013 => ErrorCode::GatewayBusy,
            0x0021 => ErrorCode::TypeNotSupported,
            0x0022 => ErrorCode::ObjectIdNotFound,
            0x0023 => ErrorCode::PropertyNotSupported,
            0x0024 => ErrorCode::InvalidDataLength,
            0x0025 => ErrorCode::PropertyIsReadOnly,
            0x0026 => ErrorCode::InvalidData,
            0x0027 => ErrorCode::DataTooSmall,
            0x0028 => ErrorCode::DataTooBig,
            0x0029 => ErrorCode::WritePropertyFailed,
            0x002A => ErrorCode::ReadPropertyFailed,
            0x002B => ErrorCode::AccessDenied,
            0x002C => ErrorCode::ObjectNotSupported,
            0x002D => ErrorCode::MulticastReadNotSupported,
            0x0081 => ErrorCode::InvalidShellArg,
            0x0082 => ErrorCode::StackPortNotFound,
            0x0083 => ErrorCode::StackPortInitFailed,
            0x0084 => ErrorCode::StackPortWriteFailed,
            0x0085 => ErrorCode::StackPortReadFailed,
            0x0086 => ErrorCode::BufferTooSmall,
            0x0087 => ErrorCode::PropertyHeaderDoesntMatch,
            other => ErrorCode::Unknown(other),
        };
        Some(err)
    }

    /// The 16-bit wire value of this code.
    pub fn code(self) -> u16 {
        match self {
            ErrorCode::InvalidFrame => 0x0001,
            ErrorCode::DeviceNotFound => 0x0002,
            ErrorCode::ResponseTimeout => 0x0003,
            ErrorCode::ServiceNotSupported => 0x0011,
            ErrorCode::InvalidServiceArgument => 0x0012,
            ErrorCode::GatewayBusy => 0x0013,
            ErrorCode::TypeNotSupported => 0x0021,
            ErrorCode::ObjectIdNotFound => 0x0022,
            ErrorCode::PropertyNotSupported => 0x0023,
            ErrorCode::InvalidDataLength => 0x0024,
            ErrorCode::PropertyIsReadOnly => 0x0025,
            ErrorCode::InvalidData => 0x0026,
            ErrorCode::DataTooSmall => 0x0027,
            ErrorCode::DataTooBig => 0x0028,
            ErrorCode::WritePropertyFailed => 0x0029,
            ErrorCode::ReadPropertyFailed => 0x002A,
            ErrorCode::AccessDenied => 0x002B,
            ErrorCode::ObjectNotSupported => 0x002C,
            ErrorCode::MulticastReadNotSupported => 0x002D,
            ErrorCode::InvalidShellArg => 0x0081,
            ErrorCode::StackPortNotFound => 0x0082,
            ErrorCode::StackPortInitFailed => 0x0083,
            ErrorCode::StackPortWriteFailed => 0x0084,
            ErrorCode::StackPortReadFailed => 0x0085,
            ErrorCode::BufferTooSmall => 0x0086,
            ErrorCode::PropertyHeaderDoesntMatch => 0x0087,
            ErrorCode::Unknown(code) => code,
        }
    }

    pub fn category(self) -> ErrorCategory {
        match self.code() {
            0x0001..=0x000F => ErrorCategory::DataLink,
            0x0011..=0x001F => ErrorCategory::Service,
            0x0021..=0x002F => ErrorCategory::Property,
            0x0081..=0x008F => ErrorCategory::Stack,
            _ => ErrorCategory::Unknown,
        }
    }

    /// True for codes delivered in-band by the remote device.
    pub fn is_application(self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Service | ErrorCategory::Property
        )
    }
}

pub type Result<T> = std::result::Result<T, ErrorCode>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_no_error() {
        assert_eq!(ErrorCode::from_code(0), None);
    }

    #[test]
    fn named_codes_map_back_to_themselves() {
        for err in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_code(err.code()), Some(err));
        }
    }

    #[test]
    fn unknown_codes_are_preserved() {
        let err = ErrorCode::from_code(0x1234).unwrap();
        assert_eq!(err, ErrorCode::Unknown(0x1234));
        assert_eq!(err.code(), 0x1234);
        assert_eq!(err.category(), ErrorCategory::Unknown);
        assert_eq!(err.to_string(), "unknown error code 0x1234");
    }

    #[test]
    fn categories_follow_code_ranges() {
        assert_eq!(ErrorCode::InvalidFrame.category(), ErrorCategory::DataLink);
        assert_eq!(ErrorCode::GatewayBusy.category(), ErrorCategory::Service);
        assert_eq!(ErrorCode::AccessDenied.category(), ErrorCategory::Property);
        assert_eq!(ErrorCode::BufferTooSmall.category(), ErrorCategory::Stack);
        assert!(ErrorCode::PropertyIsReadOnly.is_application());
        assert!(!ErrorCode::ResponseTimeout.is_application());
    }
}
