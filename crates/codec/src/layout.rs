//! Wire layout of the blob properties record.
//!
//! Every version shares one field order. Later versions only append field
//! groups, so a layout is fully described by [`LAYOUT`] plus the version that
//! introduced each group.

use std::fmt;
use std::mem::size_of;

use crate::error::CodecError;

pub const VERSION_FIELD_SIZE: usize = size_of::<i16>();
pub const TTL_FIELD_SIZE: usize = size_of::<i64>();
pub const PRIVATE_FIELD_SIZE: usize = size_of::<u8>();
pub const CREATION_TIME_FIELD_SIZE: usize = size_of::<i64>();
pub const BLOB_SIZE_FIELD_SIZE: usize = size_of::<i64>();
pub const ACCOUNT_ID_FIELD_SIZE: usize = size_of::<i16>();
pub const CONTAINER_ID_FIELD_SIZE: usize = size_of::<i16>();
pub const ENCRYPTED_FIELD_SIZE: usize = size_of::<u8>();
/// Width of the length prefix in front of every text field.
pub const TEXT_LENGTH_FIELD_SIZE: usize = size_of::<i32>();

/// A historical layout of the record, identified by its 2-byte tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i16)]
pub enum FormatVersion {
    /// Size, TTL, privacy, creation time and the three required text fields.
    V1 = 1,
    /// Adds account and container identifiers.
    V2 = 2,
    /// Adds the encryption flag.
    V3 = 3,
    /// Adds content encoding and filename.
    V4 = 4,
}

impl FormatVersion {
    pub const OLDEST: Self = Self::V1;
    /// The only version writers emit.
    pub const CURRENT: Self = Self::V4;
    pub const ALL: [Self; 4] = [Self::V1, Self::V2, Self::V3, Self::V4];

    /// The tag written at the start of the record.
    pub const fn tag(self) -> i16 {
        self as i16
    }

    /// Returns `true` if records of this version carry `group`.
    pub fn includes(self, group: FieldGroup) -> bool {
        self >= group.since()
    }

    /// Fields present in this version, in wire order.
    pub fn fields(self) -> impl Iterator<Item = &'static FieldSpec> {
        LAYOUT.iter().filter(move |spec| self.includes(spec.group))
    }

    /// Encoded size of a record of this version whose text fields are all
    /// empty or absent.
    pub fn min_encoded_size(self) -> usize {
        self.fields().map(|spec| spec.kind.min_width()).sum()
    }
}

impl TryFrom<i16> for FormatVersion {
    type Error = CodecError;

    fn try_from(tag: i16) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            3 => Ok(Self::V3),
            4 => Ok(Self::V4),
            version => Err(CodecError::UnsupportedVersion { version }),
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.tag())
    }
}

/// A set of fields introduced together by one version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    Base,
    Tenancy,
    Encryption,
    Naming,
}

impl FieldGroup {
    /// The version that introduced this group.
    pub const fn since(self) -> FormatVersion {
        match self {
            Self::Base => FormatVersion::V1,
            Self::Tenancy => FormatVersion::V2,
            Self::Encryption => FormatVersion::V3,
            Self::Naming => FormatVersion::V4,
        }
    }
}

/// How a field is represented on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A big-endian integer or flag byte of fixed width.
    Fixed(usize),
    /// Length-prefixed text that always decodes to a value.
    RequiredText,
    /// Length-prefixed text where a zero length decodes to absent.
    NullableText,
}

impl FieldKind {
    /// Smallest number of bytes the field occupies.
    pub const fn min_width(self) -> usize {
        match self {
            Self::Fixed(width) => width,
            Self::RequiredText | Self::NullableText => TEXT_LENGTH_FIELD_SIZE,
        }
    }
}

/// One entry of the wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub group: FieldGroup,
}

const fn field(name: &'static str, kind: FieldKind, group: FieldGroup) -> FieldSpec {
    FieldSpec { name, kind, group }
}

/// Every wire field in order, newest layout.
pub const LAYOUT: &[FieldSpec] = &[
    field("version", FieldKind::Fixed(VERSION_FIELD_SIZE), FieldGroup::Base),
    field("ttl", FieldKind::Fixed(TTL_FIELD_SIZE), FieldGroup::Base),
    field("is_private", FieldKind::Fixed(PRIVATE_FIELD_SIZE), FieldGroup::Base),
    field("creation_time", FieldKind::Fixed(CREATION_TIME_FIELD_SIZE), FieldGroup::Base),
    field("blob_size", FieldKind::Fixed(BLOB_SIZE_FIELD_SIZE), FieldGroup::Base),
    field("content_type", FieldKind::RequiredText, FieldGroup::Base),
    field("owner_id", FieldKind::RequiredText, FieldGroup::Base),
    field("service_id", FieldKind::RequiredText, FieldGroup::Base),
    field("account_id", FieldKind::Fixed(ACCOUNT_ID_FIELD_SIZE), FieldGroup::Tenancy),
    field("container_id", FieldKind::Fixed(CONTAINER_ID_FIELD_SIZE), FieldGroup::Tenancy),
    field("is_encrypted", FieldKind::Fixed(ENCRYPTED_FIELD_SIZE), FieldGroup::Encryption),
    field("content_encoding", FieldKind::NullableText, FieldGroup::Naming),
    field("filename", FieldKind::NullableText, FieldGroup::Naming),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_try_from() {
        for version in FormatVersion::ALL {
            assert_eq!(FormatVersion::try_from(version.tag()).unwrap(), version);
        }
    }

    #[test]
    fn out_of_range_tags_are_rejected() {
        for tag in [i16::MIN, -1, 0, 5, i16::MAX] {
            match FormatVersion::try_from(tag) {
                Err(CodecError::UnsupportedVersion { version }) => assert_eq!(version, tag),
                other => panic!("expected UnsupportedVersion for {tag}, got {other:?}"),
            }
        }
    }

    #[test]
    fn field_counts_per_version() {
        let counts: Vec<usize> = FormatVersion::ALL
            .iter()
            .map(|v| v.fields().count())
            .collect();
        assert_eq!(counts, vec![8, 10, 11, 13]);
    }

    #[test]
    fn min_encoded_sizes() {
        // 2 + 8 + 1 + 8 + 8 + 3 * 4
        assert_eq!(FormatVersion::V1.min_encoded_size(), 39);
        assert_eq!(FormatVersion::V2.min_encoded_size(), 43);
        assert_eq!(FormatVersion::V3.min_encoded_size(), 44);
        assert_eq!(FormatVersion::V4.min_encoded_size(), 52);
    }

    #[test]
    fn version_gates() {
        assert!(!FormatVersion::V1.includes(FieldGroup::Tenancy));
        assert!(FormatVersion::V2.includes(FieldGroup::Tenancy));
        assert!(!FormatVersion::V2.includes(FieldGroup::Encryption));
        assert!(FormatVersion::V3.includes(FieldGroup::Encryption));
        assert!(!FormatVersion::V3.includes(FieldGroup::Naming));
        assert!(FormatVersion::CURRENT.includes(FieldGroup::Naming));
    }

    #[test]
    fn display() {
        assert_eq!(FormatVersion::V3.to_string(), "v3");
    }
}
