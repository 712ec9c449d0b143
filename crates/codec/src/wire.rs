//! Bounds-checked big-endian primitive reads.
//!
//! `bytes::Buf` panics when a read runs past the end of its input; these
//! helpers turn that into [`CodecError::TruncatedInput`].

use bytes::Buf;

use crate::error::CodecError;

pub(crate) fn ensure_remaining<B: Buf>(
    buf: &B,
    field: &'static str,
    needed: usize,
) -> Result<(), CodecError> {
    let remaining = buf.remaining();
    if remaining < needed {
        return Err(CodecError::TruncatedInput {
            field,
            needed,
            remaining,
        });
    }
    Ok(())
}

pub(crate) fn get_i16<B: Buf>(buf: &mut B, field: &'static str) -> Result<i16, CodecError> {
    ensure_remaining(&*buf, field, 2)?;
    Ok(buf.get_i16())
}

pub(crate) fn get_i32<B: Buf>(buf: &mut B, field: &'static str) -> Result<i32, CodecError> {
    ensure_remaining(&*buf, field, 4)?;
    Ok(buf.get_i32())
}

pub(crate) fn get_i64<B: Buf>(buf: &mut B, field: &'static str) -> Result<i64, CodecError> {
    ensure_remaining(&*buf, field, 8)?;
    Ok(buf.get_i64())
}

/// Reads a flag byte. Only `1` is true.
pub(crate) fn get_flag<B: Buf>(buf: &mut B, field: &'static str) -> Result<bool, CodecError> {
    ensure_remaining(&*buf, field, 1)?;
    Ok(buf.get_u8() == 1)
}

pub(crate) fn put_flag<B: bytes::BufMut>(buf: &mut B, value: bool) {
    buf.put_u8(u8::from(value));
}
