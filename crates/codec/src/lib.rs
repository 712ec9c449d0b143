//! Versioned binary codec for blob properties.
//!
//! Every stored or replicated blob carries a [`BlobProperties`] record
//! serialized by this crate. The format has four historical versions; the
//! writer always emits the newest and the reader accepts all of them.
//!
//! Typical write path:
//!
//! ```
//! use blobmeta_codec::properties;
//! use blobmeta_core::BlobProperties;
//!
//! let props = BlobProperties::builder(1024, "media")
//!     .with_content_type("image/png")
//!     .build();
//! let mut buf = Vec::with_capacity(properties::size_of(&props));
//! properties::encode(&mut buf, &props).unwrap();
//! assert_eq!(buf.len(), properties::size_of(&props));
//!
//! let decoded = properties::decode(&mut buf.as_slice()).unwrap();
//! assert_eq!(decoded, props);
//! ```
//!
//! The cursor passed to [`properties::encode`] and [`properties::decode`] is
//! borrowed exclusively for the duration of the call; the codec itself keeps
//! no state.

pub mod error;
pub mod layout;
pub mod properties;
pub mod text;
mod wire;

pub use blobmeta_core::BlobProperties;
pub use error::CodecError;
pub use layout::{FieldGroup, FieldKind, FieldSpec, FormatVersion, LAYOUT};
