//! Read-property and write-property services on top of a [`Frame`].

use tracing::debug;

use crate::byte_order::{read_le16, read_le32, write_le16, write_le32};
use crate::error::{ErrorCode, Result};
use crate::format::{PropertyFormat, Value};
use crate::frame::{Frame, HEADER_SIZE, SERVICE_HEADER_SIZE};
use crate::service::{ObjectType, Service};

/// Object type (2) + object id (4) + property id (2).
pub const PROPERTY_HEADER_SIZE: usize = 8;

pub const PROPERTY_HEADER_OFFSET: usize = HEADER_SIZE + SERVICE_HEADER_SIZE;

/// Start of the value region inside the frame buffer.
pub const VALUE_OFFSET: usize = PROPERTY_HEADER_OFFSET + PROPERTY_HEADER_SIZE;

/// Service and property headers, the part of the payload that is not a value.
const FIXED_PAYLOAD: usize = SERVICE_HEADER_SIZE + PROPERTY_HEADER_SIZE;

/// Size of the error code in an error-flagged response.
const ERROR_CODE_SIZE: usize = 2;

/// Access to one property, performed inside the bound frame.
///
/// The value lives in the frame buffer at [`VALUE_OFFSET`]; the window is
/// derived from the frame on every access so it follows a rebound buffer.
/// Errors are recorded on the frame.
#[derive(Debug)]
pub struct Property<'f, 'a> {
    frame: &'f mut Frame<'a>,
    pub object_type: ObjectType,
    pub object_id: u32,
    pub property_id: u16,
    value_length: usize,
}

impl<'f, 'a> Property<'f, 'a> {
    pub fn new(frame: &'f mut Frame<'a>) -> Self {
        Self {
            frame,
            object_type: ObjectType::default(),
            object_id: 0,
            property_id: 0,
            value_length: 0,
        }
    }

    /// Address the property in one call.
    pub fn with_address(
        frame: &'f mut Frame<'a>,
        object_type: ObjectType,
        object_id: u32,
        property_id: u16,
    ) -> Self {
        let mut property = Self::new(frame);
        property.object_type = object_type;
        property.object_id = object_id;
        property.property_id = property_id;
        property
    }

    pub fn frame(&self) -> &Frame<'a> {
        &*self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Frame<'a> {
        &mut *self.frame
    }

    /// Maximum number of value bytes the frame buffer can hold.
    pub fn value_capacity(&self) -> usize {
        self.frame.capacity().saturating_sub(VALUE_OFFSET)
    }

    pub fn value_length(&self) -> usize {
        self.value_length
    }

    /// Declare how many bytes of the value window hold data.
    pub fn set_value_length(&mut self, length: usize) -> Result<()> {
        if length > self.value_capacity() {
            debug!(length, capacity = self.value_capacity(), "value does not fit");
            self.value_length = 0;
            return self.frame.fail(ErrorCode::BufferTooSmall);
        }
        self.value_length = length;
        Ok(())
    }

    /// The current value bytes.
    pub fn value(&self) -> &[u8] {
        let end = VALUE_OFFSET + self.value_length.min(self.value_capacity());
        self.frame.buffer().get(VALUE_OFFSET..end).unwrap_or_default()
    }

    /// The whole writable value window.
    pub fn value_mut(&mut self) -> &mut [u8] {
        self.frame
            .buffer_mut()
            .get_mut(VALUE_OFFSET..)
            .unwrap_or_default()
    }

    /// Copy `value` into the value window and set the value length.
    pub fn set_value(&mut self, value: &Value<'_>) -> Result<()> {
        match value.encode(self.value_mut()) {
            Ok(len) => {
                self.value_length = len;
                Ok(())
            }
            Err(err) => {
                self.value_length = 0;
                self.frame.fail(err)
            }
        }
    }

    /// Interpret the current value bytes as `format`.
    pub fn decode_value(&self, format: PropertyFormat) -> Result<Value<'_>> {
        Value::decode(format, self.value())
    }

    /// Prepare a read-property request. The frame addresses must be set;
    /// call [`Frame::encode_request`] afterwards.
    pub fn encode_read(&mut self) -> Result<()> {
        self.frame.service = Service::ReadProperty;
        self.value_length = 0;
        self.frame.data_length = FIXED_PAYLOAD;
        self.encode_property_header()
    }

    /// Prepare a write-property request. The value must already be in the
    /// value window (see [`Property::set_value`]); call
    /// [`Frame::encode_request`] afterwards.
    pub fn encode_write(&mut self) -> Result<()> {
        self.frame.service = Service::WriteProperty;
        self.frame.data_length = FIXED_PAYLOAD + self.value_length;
        self.encode_property_header()
    }

    /// Decode a read-property response after [`Frame::decode_frame_data`].
    pub fn decode_read_property(&mut self) -> Result<()> {
        let length = self.frame.data_length.checked_sub(FIXED_PAYLOAD);
        let capacity = self.value_capacity();

        match (self.frame.service_flags.error, length) {
            (false, Some(length)) if length <= capacity => {
                self.value_length = length;
                self.decode_property_header();
            }
            (true, length) => self.decode_error_response(length),
            (false, length) => {
                debug!(?length, capacity, "read response value out of bounds");
                self.value_length = 0;
                self.frame.set_last_error(ErrorCode::BufferTooSmall);
            }
        }
        self.frame.status()
    }

    /// Decode a write-property response after [`Frame::decode_frame_data`].
    ///
    /// A successful acknowledgement carries no value.
    pub fn decode_write_property(&mut self) -> Result<()> {
        let length = self.frame.data_length.checked_sub(FIXED_PAYLOAD);

        match (self.frame.service_flags.error, length) {
            (false, Some(0)) => {
                self.value_length = 0;
                self.decode_property_header();
            }
            (true, length) => self.decode_error_response(length),
            (false, length) => {
                debug!(?length, "write response carries unexpected data");
                self.value_length = 0;
                self.frame.set_last_error(ErrorCode::BufferTooSmall);
            }
        }
        self.frame.status()
    }

    /// True when the decoded header addresses the given property.
    pub fn same_address(&self, object_type: ObjectType, object_id: u32, property_id: u16) -> bool {
        self.object_type == object_type
            && self.object_id == object_id
            && self.property_id == property_id
    }

    fn encode_property_header(&mut self) -> Result<()> {
        let (object_type, object_id, property_id) =
            (self.object_type.id(), self.object_id, self.property_id);
        let Some(header) = self
            .frame
            .buffer_mut()
            .get_mut(PROPERTY_HEADER_OFFSET..VALUE_OFFSET)
        else {
            debug!("buffer cannot hold a property header");
            return self.frame.fail(ErrorCode::BufferTooSmall);
        };

        write_le16(&mut header[0..2], object_type);
        write_le32(&mut header[2..6], object_id);
        write_le16(&mut header[6..8], property_id);
        self.frame.status()
    }

    fn decode_property_header(&mut self) {
        let Some(header) = self.frame.buffer().get(PROPERTY_HEADER_OFFSET..VALUE_OFFSET) else {
            debug!("buffer cannot hold a property header");
            self.frame.set_last_error(ErrorCode::BufferTooSmall);
            return;
        };

        self.object_type = ObjectType::from(read_le16(&header[0..2]));
        self.object_id = read_le32(&header[2..6]);
        self.property_id = read_le16(&header[6..8]);
    }

    /// An error response carries exactly a 2-byte code in the value region.
    fn decode_error_response(&mut self, length: Option<usize>) {
        if length != Some(ERROR_CODE_SIZE) {
            debug!(?length, "malformed error response");
            self.value_length = 0;
            self.frame.set_last_error(ErrorCode::InvalidFrame);
            return;
        }

        self.decode_property_header();

        let Some(raw) = self
            .frame
            .buffer()
            .get(VALUE_OFFSET..VALUE_OFFSET + ERROR_CODE_SIZE)
        else {
            self.value_length = 0;
            self.frame.set_last_error(ErrorCode::BufferTooSmall);
            return;
        };
        let code = read_le16(raw);

        self.value_length = ERROR_CODE_SIZE;
        // the device code replaces the status; 0 means no error
        let status = ErrorCode::from_code(code);
        debug!(
            code,
            object_type = self.object_type.id(),
            object_id = self.object_id,
            property_id = self.property_id,
            "device reported status {status:?}"
        );
        self.frame.record(status);
    }
}
