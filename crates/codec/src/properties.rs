//! Binary codec for [`BlobProperties`].
//!
//! Writers always emit [`FormatVersion::CURRENT`]. Readers accept every
//! version from [`FormatVersion::OLDEST`] on and fill fields that a version
//! predates with their defaults:
//!
//! | Missing group | Default |
//! |---|---|
//! | tenancy (v1) | [`AccountId::UNKNOWN`], [`ContainerId::UNKNOWN`] |
//! | encryption (v1, v2) | not encrypted |
//! | naming (v1 to v3) | no content encoding, no filename |

use blobmeta_core::{AccountId, BlobProperties, ContainerId};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::{trace, warn};

use crate::error::CodecError;
use crate::layout::{
    ACCOUNT_ID_FIELD_SIZE, BLOB_SIZE_FIELD_SIZE, CONTAINER_ID_FIELD_SIZE,
    CREATION_TIME_FIELD_SIZE, ENCRYPTED_FIELD_SIZE, FieldGroup, FormatVersion,
    PRIVATE_FIELD_SIZE, TTL_FIELD_SIZE, VERSION_FIELD_SIZE,
};
use crate::text;
use crate::wire::{get_flag, get_i16, get_i64, put_flag};

/// Exact number of bytes [`encode`] writes for `properties`.
pub fn size_of(properties: &BlobProperties) -> usize {
    VERSION_FIELD_SIZE
        + TTL_FIELD_SIZE
        + PRIVATE_FIELD_SIZE
        + CREATION_TIME_FIELD_SIZE
        + BLOB_SIZE_FIELD_SIZE
        + text::size_of(Some(properties.content_type()))
        + text::size_of(Some(properties.owner_id()))
        + text::size_of(Some(properties.service_id()))
        + ACCOUNT_ID_FIELD_SIZE
        + CONTAINER_ID_FIELD_SIZE
        + ENCRYPTED_FIELD_SIZE
        + text::size_of(properties.content_encoding())
        + text::size_of(properties.filename())
}

/// Serialize `properties` into `buf` in the current version.
///
/// Fails with [`CodecError::InsufficientBufferSpace`] if `buf` has fewer than
/// [`size_of`] bytes left. Nothing is written when an error is returned.
pub fn encode<B: BufMut>(buf: &mut B, properties: &BlobProperties) -> Result<(), CodecError> {
    let needed = size_of(properties);
    let remaining = buf.remaining_mut();
    if remaining < needed {
        return Err(CodecError::InsufficientBufferSpace { needed, remaining });
    }
    text_fields(properties)
        .into_iter()
        .try_for_each(|(field, value)| text::check_length(field, value).map(|_| ()))?;

    buf.put_i16(FormatVersion::CURRENT.tag());
    buf.put_i64(properties.time_to_live_secs());
    put_flag(buf, properties.is_private());
    buf.put_i64(properties.creation_time_ms());
    buf.put_i64(properties.blob_size());
    text::encode(buf, "content_type", Some(properties.content_type()))?;
    text::encode(buf, "owner_id", Some(properties.owner_id()))?;
    text::encode(buf, "service_id", Some(properties.service_id()))?;
    buf.put_i16(properties.account_id().get());
    buf.put_i16(properties.container_id().get());
    put_flag(buf, properties.is_encrypted());
    text::encode(buf, "content_encoding", properties.content_encoding())?;
    text::encode(buf, "filename", properties.filename())?;

    trace!(size = needed, "encoded blob properties");
    Ok(())
}

/// Text fields in wire order. Their lengths are checked before anything is
/// written.
fn text_fields(properties: &BlobProperties) -> [(&'static str, Option<&str>); 5] {
    [
        ("content_type", Some(properties.content_type())),
        ("owner_id", Some(properties.owner_id())),
        ("service_id", Some(properties.service_id())),
        ("content_encoding", properties.content_encoding()),
        ("filename", properties.filename()),
    ]
}

/// Deserialize blob properties of any supported version from `buf`.
///
/// On error no record is produced; `buf` may have been partially consumed.
pub fn decode<B: Buf>(buf: &mut B) -> Result<BlobProperties, CodecError> {
    let tag = get_i16(buf, "version")?;
    let version = FormatVersion::try_from(tag).inspect_err(|_| {
        warn!(version = tag, "rejecting blob properties with unsupported version");
    })?;

    let ttl = get_i64(buf, "ttl")?;
    let is_private = get_flag(buf, "is_private")?;
    let creation_time_ms = get_i64(buf, "creation_time")?;
    let blob_size = get_i64(buf, "blob_size")?;
    let content_type = text::decode_required(buf, "content_type")?;
    let owner_id = text::decode_required(buf, "owner_id")?;
    let service_id = text::decode_required(buf, "service_id")?;

    let (account_id, container_id) = if version.includes(FieldGroup::Tenancy) {
        (
            AccountId::new(get_i16(buf, "account_id")?),
            ContainerId::new(get_i16(buf, "container_id")?),
        )
    } else {
        (AccountId::UNKNOWN, ContainerId::UNKNOWN)
    };

    let is_encrypted = version.includes(FieldGroup::Encryption) && get_flag(buf, "is_encrypted")?;

    let (content_encoding, filename) = if version.includes(FieldGroup::Naming) {
        (
            text::decode(buf, "content_encoding")?,
            text::decode(buf, "filename")?,
        )
    } else {
        (None, None)
    };

    trace!(%version, "decoded blob properties");
    Ok(BlobProperties::builder(blob_size, service_id)
        .with_time_to_live_secs(ttl)
        .with_private(is_private)
        .with_creation_time_ms(creation_time_ms)
        .with_content_type(content_type)
        .with_owner_id(owner_id)
        .with_account_id(account_id)
        .with_container_id(container_id)
        .with_encrypted(is_encrypted)
        .with_content_encoding(content_encoding)
        .with_filename(filename)
        .build())
}

/// Serialize `properties` into a buffer of exactly [`size_of`] bytes.
pub fn to_bytes(properties: &BlobProperties) -> Result<Bytes, CodecError> {
    let mut buf = BytesMut::with_capacity(size_of(properties));
    encode(&mut buf, properties)?;
    Ok(buf.freeze())
}

/// Deserialize from the start of `bytes`.
///
/// Returns the record and the number of bytes it occupied, so callers reading
/// a larger message know where the next section begins.
pub fn from_slice(bytes: &[u8]) -> Result<(BlobProperties, usize), CodecError> {
    let mut cursor = bytes;
    let properties = decode(&mut cursor)?;
    Ok((properties, bytes.len() - cursor.len()))
}

/// Read and validate the version tag at the start of `bytes` without
/// consuming anything.
pub fn peek_version(bytes: &[u8]) -> Result<FormatVersion, CodecError> {
    let mut cursor = bytes;
    FormatVersion::try_from(get_i16(&mut cursor, "version")?)
}
