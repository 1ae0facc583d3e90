//! Codec for the Studer SCOM serial protocol.
//!
//! # Crate Structure
//!
//! - [`frame`]: Data link frames, property services, checksums and status codes
//!
//! The `scom` binary (behind the `cli` feature) encodes request frames and
//! decodes captured responses without touching a serial port.

/// Re-export codec types.
pub mod frame {
    pub use scom_frame::*;
}
