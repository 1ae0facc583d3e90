use std::fmt;

use scom_frame::{ErrorCategory, ErrorCode};

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Exit code for a status recorded on a frame.
pub fn status_code(err: ErrorCode) -> i32 {
    match err {
        ErrorCode::BufferTooSmall => USAGE,
        ErrorCode::InvalidFrame => DATA_INVALID,
        err if err.category() == ErrorCategory::Stack => INTERNAL,
        _ => FAILURE,
    }
}

pub fn codec_error(context: &str, err: ErrorCode) -> CliError {
    CliError::new(
        status_code(err),
        format!("{context}: {err} (0x{:04X})", err.code()),
    )
}

pub fn hex_error(context: &str, err: hex::FromHexError) -> CliError {
    CliError::new(USAGE, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_by_origin() {
        assert_eq!(status_code(ErrorCode::InvalidFrame), DATA_INVALID);
        assert_eq!(status_code(ErrorCode::BufferTooSmall), USAGE);
        assert_eq!(status_code(ErrorCode::AccessDenied), FAILURE);
        assert_eq!(status_code(ErrorCode::StackPortReadFailed), INTERNAL);
        assert_eq!(status_code(ErrorCode::Unknown(0x0400)), FAILURE);
    }

    #[test]
    fn codec_error_names_code() {
        let err = codec_error("decode failed", ErrorCode::ObjectIdNotFound);
        assert_eq!(err.code, FAILURE);
        assert_eq!(err.to_string(), "decode failed: object id not found (0x0022)");
    }
}
