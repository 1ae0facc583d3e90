//! Codec for the Studer SCOM serial protocol.
//!
//! Two layers, both working in place on a caller-supplied buffer:
//! - [`frame`]: the data link layer. Addressed frames with a 14-byte header
//!   and a checksummed service payload.
//! - [`property`]: the read-property and write-property services on top of a
//!   frame.
//!
//! No I/O, no allocation. The caller moves bytes between the buffer and the
//! serial line, and checks the frame's last error after every step:
//!
//! ```
//! use scom_frame::{Frame, ObjectType, Property, property_id};
//!
//! let mut buffer = [0u8; 64];
//! let mut frame = Frame::new(&mut buffer);
//! frame.src_addr = 1;
//! frame.dst_addr = 101;
//!
//! let mut property = Property::with_address(&mut frame, ObjectType::Parameter, 1107, property_id::VALUE_QSP);
//! property.encode_read().unwrap();
//! property.frame_mut().encode_request().unwrap();
//!
//! let request = frame.as_bytes().unwrap();
//! assert_eq!(request.len(), 26);
//! ```

mod byte_order;

pub mod checksum;
pub mod config;
pub mod error;
pub mod format;
pub mod frame;
pub mod property;
pub mod service;

pub use checksum::checksum;
pub use config::{CodecConfig, DEFAULT_BUFFER_SIZE, DEFAULT_SOURCE_ADDRESS};
pub use error::{ErrorCategory, ErrorCode, Result};
pub use format::{PropertyFormat, Value};
pub use frame::{
    expected_frame_length, Frame, HEADER_SIZE, SERVICE_HEADER_SIZE, START_BYTE, TRAILER_SIZE,
};
pub use property::{Property, PROPERTY_HEADER_OFFSET, PROPERTY_HEADER_SIZE, VALUE_OFFSET};
pub use service::{property_id, FrameFlags, ObjectType, Service, ServiceFlags};
