use tracing::{debug, trace};

use crate::byte_order::{read_le16, read_le32, write_le16, write_le32};
use crate::checksum::checksum;
use crate::error::{ErrorCode, Result};
use crate::service::{FrameFlags, Service, ServiceFlags};

/// Frame header: start byte (1) + flags (1) + src (4) + dst (4) + length (2) + checksum (2).
pub const HEADER_SIZE: usize = 14;

/// Payload checksum appended after the service data.
pub const TRAILER_SIZE: usize = 2;

/// Service flags (1) + service id (1).
pub const SERVICE_HEADER_SIZE: usize = 2;

/// First byte of every frame.
pub const START_BYTE: u8 = 0xAA;

/// Bytes needed to read the payload length field.
const LENGTH_FIELD_END: usize = 12;

/// One frame built over a caller-owned buffer.
///
/// Wire format (multi-byte fields little-endian):
/// ```text
/// ┌───────┬───────┬──────────┬──────────┬──────────┬──────────┬─────────┬────────────┬──────────┐
/// │ 0xAA  │ Flags │ Src addr │ Dst addr │ Length   │ Hdr csum │ Svc flg │ Svc id     │ Payload  │
/// │ (1B)  │ (1B)  │ (4B)     │ (4B)     │ (2B)     │ (2B)     │ (1B)    │ (1B)       │ csum (2B)│
/// └───────┴───────┴──────────┴──────────┴──────────┴──────────┴─────────┴────────────┴──────────┘
///          └──────── header checksum range ────────┘          └─ Length bytes (payload) ─┘
/// ```
///
/// Errors are sticky: every check that fails records into [`Frame::last_error`]
/// and decoding carries on so the remaining fields stay observable. Each
/// operation also returns the status after the call.
#[derive(Debug)]
pub struct Frame<'a> {
    /// Flags specific to the data link layer (responses only).
    pub frame_flags: FrameFlags,
    pub src_addr: u32,
    pub dst_addr: u32,
    /// Flags specific to the service layer (responses only).
    pub service_flags: ServiceFlags,
    pub service: Service,
    /// Length of the service payload, without frame header and trailing checksum.
    pub data_length: usize,
    last_error: Option<ErrorCode>,
    buffer: &'a mut [u8],
}

impl<'a> Frame<'a> {
    /// Bind a new frame to `buffer`.
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            frame_flags: FrameFlags::default(),
            src_addr: 0,
            dst_addr: 0,
            service_flags: ServiceFlags::default(),
            service: Service::default(),
            data_length: 0,
            last_error: None,
            buffer,
        }
    }

    /// Rebind the frame to another buffer and clear the last error.
    ///
    /// Returns the previously bound buffer.
    pub fn initialize(&mut self, buffer: &'a mut [u8]) -> &'a mut [u8] {
        self.last_error = None;
        std::mem::replace(&mut self.buffer, buffer)
    }

    /// Clear the last error, keeping the current buffer.
    pub fn reset(&mut self) {
        self.last_error = None;
    }

    /// Encode a request into the buffer.
    ///
    /// `src_addr`, `dst_addr`, `service` and `data_length` must be set, and the
    /// service data (if any) must already sit in the payload region. Records
    /// [`ErrorCode::BufferTooSmall`] and skips the payload checksum when the
    /// frame does not fit.
    pub fn encode_request(&mut self) -> Result<()> {
        if self.buffer.len() < HEADER_SIZE + SERVICE_HEADER_SIZE {
            debug!(capacity = self.buffer.len(), "buffer cannot hold a frame header");
            return self.fail(ErrorCode::BufferTooSmall);
        }
        let Ok(length) = u16::try_from(self.data_length) else {
            // the length field is 16 bits wide
            debug!(data_length = self.data_length, "payload length exceeds the length field");
            return self.fail(ErrorCode::BufferTooSmall);
        };

        let buf = &mut *self.buffer;
        buf[0] = START_BYTE;
        // frame flags of a request are always 0
        buf[1] = 0;
        write_le32(&mut buf[2..6], self.src_addr);
        write_le32(&mut buf[6..10], self.dst_addr);
        write_le16(&mut buf[10..12], length);

        let header_checksum = checksum(&buf[1..LENGTH_FIELD_END]);
        write_le16(&mut buf[12..HEADER_SIZE], header_checksum);

        // reserved, response and error bits are all 0 on a request
        buf[HEADER_SIZE] = 0;
        buf[HEADER_SIZE + 1] = self.service.id();

        if self.frame_length() <= self.buffer.len() {
            let end = HEADER_SIZE + self.data_length;
            let payload_checksum = checksum(&self.buffer[HEADER_SIZE..end]);
            write_le16(&mut self.buffer[end..end + TRAILER_SIZE], payload_checksum);
        } else {
            debug!(
                frame_length = self.frame_length(),
                capacity = self.buffer.len(),
                "request does not fit in buffer"
            );
            self.last_error = Some(ErrorCode::BufferTooSmall);
        }

        self.status()
    }

    /// Decode the header once [`HEADER_SIZE`] bytes have been received.
    ///
    /// Start byte, length bounds and header checksum are checked
    /// independently; each failure records [`ErrorCode::InvalidFrame`] and the
    /// last failing check determines the recorded value.
    pub fn decode_frame_header(&mut self) -> Result<()> {
        if self.buffer.len() < HEADER_SIZE {
            debug!(capacity = self.buffer.len(), "buffer cannot hold a frame header");
            return self.fail(ErrorCode::BufferTooSmall);
        }

        self.frame_flags = FrameFlags::from_byte(self.buffer[1]);

        if self.buffer[0] != START_BYTE {
            debug!(start_byte = self.buffer[0], "invalid start byte");
            self.last_error = Some(ErrorCode::InvalidFrame);
        }

        self.src_addr = read_le32(&self.buffer[2..6]);
        self.dst_addr = read_le32(&self.buffer[6..10]);
        self.data_length = usize::from(read_le16(&self.buffer[10..12]));

        // the payload holds at least service flags and service id, and must fit
        if self.data_length < SERVICE_HEADER_SIZE || self.frame_length() > self.buffer.len() {
            debug!(
                data_length = self.data_length,
                capacity = self.buffer.len(),
                "payload length out of bounds"
            );
            self.last_error = Some(ErrorCode::InvalidFrame);
        }

        let sent = read_le16(&self.buffer[12..HEADER_SIZE]);
        let calculated = checksum(&self.buffer[1..LENGTH_FIELD_END]);
        if sent != calculated {
            debug!(sent, calculated, "header checksum mismatch");
            self.last_error = Some(ErrorCode::InvalidFrame);
        }

        self.status()
    }

    /// Decode the service payload of a response once the whole frame has
    /// been received.
    ///
    /// Does nothing when an error is already recorded.
    pub fn decode_frame_data(&mut self) -> Result<()> {
        if self.last_error.is_some() {
            trace!("header invalid, payload not decoded");
            return self.status();
        }

        let end = HEADER_SIZE + self.data_length;
        if self.data_length < SERVICE_HEADER_SIZE || end + TRAILER_SIZE > self.buffer.len() {
            debug!(data_length = self.data_length, "payload length out of bounds");
            return self.fail(ErrorCode::InvalidFrame);
        }

        let calculated = checksum(&self.buffer[HEADER_SIZE..end]);
        let sent = read_le16(&self.buffer[end..end + TRAILER_SIZE]);
        if calculated != sent {
            debug!(sent, calculated, "payload checksum mismatch");
            self.last_error = Some(ErrorCode::InvalidFrame);
        }

        self.service_flags = ServiceFlags::from_byte(self.buffer[HEADER_SIZE]);
        if !self.service_flags.is_response {
            debug!("frame is not a response");
            self.last_error = Some(ErrorCode::InvalidFrame);
        }

        self.service = Service::from(self.buffer[HEADER_SIZE + 1]);

        self.status()
    }

    /// Total frame length: header + payload + trailing checksum.
    pub fn frame_length(&self) -> usize {
        HEADER_SIZE + self.data_length + TRAILER_SIZE
    }

    /// The last recorded error, `None` when no error occurred.
    pub fn last_error(&self) -> Option<ErrorCode> {
        self.last_error
    }

    /// `Err` with the last recorded error, if any.
    pub fn status(&self) -> Result<()> {
        match self.last_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Record an error detected outside the codec (timeouts, port failures).
    pub fn set_last_error(&mut self, err: ErrorCode) {
        self.last_error = Some(err);
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffer(&self) -> &[u8] {
        &*self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut *self.buffer
    }

    /// The complete frame bytes, `None` when the frame does not fit the buffer.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.buffer.get(..self.frame_length())
    }

    /// The service payload window, `None` when it does not fit the buffer.
    pub fn payload(&self) -> Option<&[u8]> {
        self.buffer.get(HEADER_SIZE..HEADER_SIZE + self.data_length)
    }

    pub fn is_response(&self) -> bool {
        self.service_flags.is_response
    }

    pub fn has_error_flag(&self) -> bool {
        self.service_flags.error
    }

    /// Overwrite the recorded status; `None` clears it.
    pub(crate) fn record(&mut self, status: Option<ErrorCode>) {
        self.last_error = status;
    }

    pub(crate) fn fail(&mut self, err: ErrorCode) -> Result<()> {
        self.last_error = Some(err);
        Err(err)
    }
}

/// Total length of the frame starting at `received[0]`, once the payload
/// length field has arrived.
///
/// Returns `None` until at least 12 bytes are available. The value is not
/// validated; decode the header before trusting it.
pub fn expected_frame_length(received: &[u8]) -> Option<usize> {
    let field = received.get(10..LENGTH_FIELD_END)?;
    Some(HEADER_SIZE + usize::from(read_le16(field)) + TRAILER_SIZE)
}
