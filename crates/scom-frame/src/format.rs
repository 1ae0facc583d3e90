//! Property value formats and their byte encodings.

use crate::byte_order::{read_f32_le, read_le16, read_le32, write_f32_le, write_le16, write_le32};
use crate::error::{ErrorCode, Result};

/// Data format of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyFormat {
    Bool,
    Format,
    Enum,
    Error,
    Int32,
    Float,
    String,
    Dynamic,
    ByteStream,
}

impl PropertyFormat {
    pub fn id(self) -> u8 {
        match self {
            PropertyFormat::Bool => 1,
            PropertyFormat::Format => 2,
            PropertyFormat::Enum => 3,
            PropertyFormat::Error => 4,
            PropertyFormat::Int32 => 5,
            PropertyFormat::Float => 6,
            PropertyFormat::String => 7,
            PropertyFormat::Dynamic => 8,
            PropertyFormat::ByteStream => 9,
        }
    }

    /// Encoded size in bytes, `None` for variable-length formats.
    pub fn value_size(self) -> Option<usize> {
        match self {
            PropertyFormat::Bool => Some(1),
            PropertyFormat::Format | PropertyFormat::Enum | PropertyFormat::Error => Some(2),
            PropertyFormat::Int32 | PropertyFormat::Float => Some(4),
            PropertyFormat::String | PropertyFormat::Dynamic | PropertyFormat::ByteStream => None,
        }
    }
}

/// A decoded property value, borrowing variable-length data from the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Bool(bool),
    /// `Format`, `Enum` and `Error` values.
    Short(u16),
    Int32(i32),
    Float(f32),
    Bytes(&'a [u8]),
}

impl<'a> Value<'a> {
    /// Interpret `bytes` according to `format`.
    ///
    /// Fixed-size formats require an exact length match.
    pub fn decode(format: PropertyFormat, bytes: &'a [u8]) -> Result<Self> {
        if let Some(size) = format.value_size() {
            if bytes.len() != size {
                return Err(ErrorCode::InvalidDataLength);
            }
        }
        let value = match format {
            PropertyFormat::Bool => Value::Bool(bytes[0] != 0),
            PropertyFormat::Format | PropertyFormat::Enum | PropertyFormat::Error => {
                Value::Short(read_le16(bytes))
            }
            PropertyFormat::Int32 => Value::Int32(read_le32(bytes) as i32),
            PropertyFormat::Float => Value::Float(read_f32_le(bytes)),
            PropertyFormat::String | PropertyFormat::Dynamic | PropertyFormat::ByteStream => {
                Value::Bytes(bytes)
            }
        };
        Ok(value)
    }

    /// Encoded size in bytes.
    pub fn encoded_len(&self) -> usize {
        match self {
            Value::Bool(_) => 1,
            Value::Short(_) => 2,
            Value::Int32(_) | Value::Float(_) => 4,
            Value::Bytes(bytes) => bytes.len(),
        }
    }

    /// Write the value at the start of `dst` and return the number of bytes written.
    pub fn encode(&self, dst: &mut [u8]) -> Result<usize> {
        let len = self.encoded_len();
        if dst.len() < len {
            return Err(ErrorCode::BufferTooSmall);
        }
        match *self {
            Value::Bool(flag) => dst[0] = u8::from(flag),
            Value::Short(value) => write_le16(dst, value),
            Value::Int32(value) => write_le32(dst, value as u32),
            Value::Float(value) => write_f32_le(dst, value),
            Value::Bytes(bytes) => dst[..len].copy_from_slice(bytes),
        }
        Ok(len)
    }
}
