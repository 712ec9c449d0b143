//! Core types for blob metadata.
//!
//! [`BlobProperties`] is the fixed record stored alongside every blob. The
//! binary representation lives in `blobmeta-codec`; this crate only models the
//! values.

pub mod clock;
pub mod error;
pub mod properties;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::CoreError;
pub use properties::{BlobProperties, BlobPropertiesBuilder, INFINITE_TTL, INVALID_TIME};
pub use types::{AccountId, ContainerId};
