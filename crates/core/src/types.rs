use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype_id {
    ($name:ident, $doc:expr, $unknown_doc:expr) => {
        #[doc = $doc]
        ///
        /// The wrapped value is a raw 16-bit two's-complement identifier. Every
        /// bit pattern is valid, including the negative [`Self::UNKNOWN`]
        /// sentinel, and survives the wire format unchanged.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i16);

        impl $name {
            #[doc = $unknown_doc]
            pub const UNKNOWN: Self = Self(-1);

            /// Wrap a raw identifier value.
            #[must_use]
            pub const fn new(value: i16) -> Self {
                Self(value)
            }

            /// Return the raw identifier value.
            #[must_use]
            pub const fn get(self) -> i16 {
                self.0
            }

            /// Returns `true` if this is the [`Self::UNKNOWN`] sentinel.
            #[must_use]
            pub const fn is_unknown(self) -> bool {
                self.0 == Self::UNKNOWN.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::UNKNOWN
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i16> for $name {
            fn from(value: i16) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i16 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

newtype_id!(
    AccountId,
    "Identifies the account that owns a blob.",
    "Account assigned to blobs written before multi-tenancy existed."
);
newtype_id!(
    ContainerId,
    "Identifies the container a blob belongs to within its account.",
    "Container assigned to blobs written before multi-tenancy existed."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sentinels_are_negative_one() {
        assert_eq!(AccountId::UNKNOWN.get(), -1);
        assert_eq!(ContainerId::UNKNOWN.get(), -1);
        assert!(AccountId::default().is_unknown());
        assert!(ContainerId::default().is_unknown());
    }

    #[test]
    fn negative_ids_other_than_sentinel_are_known() {
        let id = AccountId::new(i16::MIN);
        assert!(!id.is_unknown());
        assert_eq!(i16::from(id), i16::MIN);
    }

    #[test]
    fn newtype_serde_is_transparent() {
        let id = ContainerId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let back: ContainerId = serde_json::from_str("-1").unwrap();
        assert_eq!(back, ContainerId::UNKNOWN);
    }

    #[test]
    fn newtype_display() {
        assert_eq!(format!("{}", AccountId::new(7)), "7");
        assert_eq!(ContainerId::UNKNOWN.to_string(), "-1");
    }
}
