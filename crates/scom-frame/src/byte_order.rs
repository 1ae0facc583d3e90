//! Little-endian field access on raw frame buffers.
//!
//! Callers guarantee the slice holds at least the field width.

use bytes::{Buf, BufMut};

#[inline]
pub fn read_le16(src: &[u8]) -> u16 {
    let mut src = src;
    src.get_u16_le()
}

#[inline]
pub fn read_le32(src: &[u8]) -> u32 {
    let mut src = src;
    src.get_u32_le()
}

#[inline]
pub fn read_f32_le(src: &[u8]) -> f32 {
    let mut src = src;
    src.get_f32_le()
}

#[inline]
pub fn write_le16(dst: &mut [u8], value: u16) {
    let mut dst = dst;
    dst.put_u16_le(value);
}

#[inline]
pub fn write_le32(dst: &mut [u8], value: u32) {
    let mut dst = dst;
    dst.put_u32_le(value);
}

#[inline]
pub fn write_f32_le(dst: &mut [u8], value: f32) {
    let mut dst = dst;
    dst.put_f32_le(value);
}
