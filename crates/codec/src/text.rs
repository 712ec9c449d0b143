//! Length-prefixed text.
//!
//! A text value is a 4-byte big-endian signed length followed by that many
//! UTF-8 bytes. Zero length is both "empty" and "absent": [`decode`] reports
//! it as `None`, [`decode_required`] as `""`. No other length is reserved, so
//! an empty value written through [`encode`] reads back as absent.

use bytes::{Buf, BufMut};

use crate::error::CodecError;
use crate::layout::TEXT_LENGTH_FIELD_SIZE;
use crate::wire::{ensure_remaining, get_i32};

/// Number of bytes [`encode`] writes for `text`.
pub fn size_of(text: Option<&str>) -> usize {
    TEXT_LENGTH_FIELD_SIZE + text.map_or(0, str::len)
}

/// Fails if `text` is too long for the length prefix.
pub fn check_length(field: &'static str, text: Option<&str>) -> Result<i32, CodecError> {
    let length = text.map_or(0, str::len);
    i32::try_from(length).map_err(|_| CodecError::TextTooLong { field, length })
}

/// Writes `text` with its length prefix. Absent text is written as length 0.
///
/// Nothing is written when the text is too long or `buf` lacks room.
pub fn encode<B: BufMut>(
    buf: &mut B,
    field: &'static str,
    text: Option<&str>,
) -> Result<(), CodecError> {
    let length = check_length(field, text)?;
    let needed = size_of(text);
    if buf.remaining_mut() < needed {
        return Err(CodecError::InsufficientBufferSpace {
            needed,
            remaining: buf.remaining_mut(),
        });
    }
    buf.put_i32(length);
    if let Some(text) = text {
        buf.put_slice(text.as_bytes());
    }
    Ok(())
}

/// Reads text that may be absent. A zero length yields `None`.
pub fn decode<B: Buf>(buf: &mut B, field: &'static str) -> Result<Option<String>, CodecError> {
    let length = read_length(buf, field)?;
    if length == 0 {
        return Ok(None);
    }
    read_text(buf, field, length).map(Some)
}

/// Reads text that is always present. A zero length yields `""`.
pub fn decode_required<B: Buf>(buf: &mut B, field: &'static str) -> Result<String, CodecError> {
    let length = read_length(buf, field)?;
    if length == 0 {
        return Ok(String::new());
    }
    read_text(buf, field, length)
}

fn read_length<B: Buf>(buf: &mut B, field: &'static str) -> Result<usize, CodecError> {
    let length = get_i32(buf, field)?;
    usize::try_from(length).map_err(|_| CodecError::NegativeLength { field, length })
}

fn read_text<B: Buf>(buf: &mut B, field: &'static str, length: usize) -> Result<String, CodecError> {
    ensure_remaining(&*buf, field, length)?;
    let mut bytes = vec![0u8; length];
    buf.copy_to_slice(&mut bytes);
    String::from_utf8(bytes).map_err(|source| CodecError::InvalidUtf8 { field, source })
}
