//! Two-accumulator rolling checksum (RFC 1146, Appendix I).
//!
//! Used for both the header and the payload of a frame. It detects
//! transmission errors only: a single flipped byte changes the result with
//! high probability, not with certainty.

/// Compute the checksum of `data`.
///
/// `A` starts at `0xFF`, `B` at `0`; for each byte `A += byte`, `B += A`
/// (both mod 256). The result is `B << 8 | A`.
pub fn checksum(data: &[u8]) -> u16 {
    let (a, b) = data.iter().fold((0xFFu8, 0u8), |(a, b), &byte| {
        let a = a.wrapping_add(byte);
        (a, b.wrapping_add(a))
    });
    (u16::from(b) << 8) | u16::from(a)
}
