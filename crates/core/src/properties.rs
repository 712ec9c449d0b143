use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::CoreError;
use crate::types::{AccountId, ContainerId};

/// Time-to-live value meaning the blob never expires.
pub const INFINITE_TTL: i64 = -1;

/// Creation time value meaning the creation time was never recorded.
pub const INVALID_TIME: i64 = -1;

/// The fixed metadata record that travels with every stored blob.
///
/// Values are immutable once built. Use [`BlobProperties::builder`] to create
/// one; the getters expose every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobProperties {
    blob_size: i64,
    time_to_live_secs: i64,
    is_private: bool,
    creation_time_ms: i64,
    content_type: String,
    owner_id: String,
    service_id: String,
    #[serde(default)]
    account_id: AccountId,
    #[serde(default)]
    container_id: ContainerId,
    #[serde(default)]
    is_encrypted: bool,
    content_encoding: Option<String>,
    filename: Option<String>,
}

impl BlobProperties {
    /// Start building properties for a blob of `blob_size` bytes uploaded by
    /// `service_id`.
    #[must_use]
    pub fn builder(blob_size: i64, service_id: impl Into<String>) -> BlobPropertiesBuilder {
        BlobPropertiesBuilder::new(blob_size, service_id)
    }

    /// Size of the blob payload in bytes.
    pub fn blob_size(&self) -> i64 {
        self.blob_size
    }

    /// Time-to-live in seconds, or [`INFINITE_TTL`].
    pub fn time_to_live_secs(&self) -> i64 {
        self.time_to_live_secs
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    /// Creation time in epoch milliseconds.
    pub fn creation_time_ms(&self) -> i64 {
        self.creation_time_ms
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn container_id(&self) -> ContainerId {
        self.container_id
    }

    pub fn is_encrypted(&self) -> bool {
        self.is_encrypted
    }

    pub fn content_encoding(&self) -> Option<&str> {
        self.content_encoding.as_deref()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Returns `true` if the blob never expires.
    pub fn has_infinite_ttl(&self) -> bool {
        self.time_to_live_secs == INFINITE_TTL
    }

    /// Epoch milliseconds at which the blob expires.
    ///
    /// Returns `None` when the TTL is infinite or the creation time is
    /// [`INVALID_TIME`].
    pub fn expiration_time_ms(&self) -> Option<i64> {
        if self.has_infinite_ttl() || self.creation_time_ms == INVALID_TIME {
            return None;
        }
        Some(
            self.creation_time_ms
                .saturating_add(self.time_to_live_secs.saturating_mul(1_000)),
        )
    }

    /// Returns `true` if the blob's expiration time has passed on `clock`.
    pub fn is_expired(&self, clock: &dyn Clock) -> bool {
        self.expiration_time_ms()
            .is_some_and(|expires_at| clock.now_ms() > expires_at)
    }
}

impl fmt::Display for BlobProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BlobProperties[BlobSize={}, ContentType={}, OwnerId={}, ServiceId={}, IsPrivate={}, \
             CreationTimeInMs={}, ",
            self.blob_size,
            self.content_type,
            self.owner_id,
            self.service_id,
            self.is_private,
            self.creation_time_ms,
        )?;
        if self.has_infinite_ttl() {
            f.write_str("TimeToLiveInSeconds=Infinite, ")?;
        } else {
            write!(f, "TimeToLiveInSeconds={}, ", self.time_to_live_secs)?;
        }
        write!(
            f,
            "AccountId={}, ContainerId={}, IsEncrypted={}, ContentEncoding={}, Filename={}]",
            self.account_id,
            self.container_id,
            self.is_encrypted,
            self.content_encoding.as_deref().unwrap_or("null"),
            self.filename.as_deref().unwrap_or("null"),
        )
    }
}

/// Builder for [`BlobProperties`].
///
/// Defaults: infinite TTL, public, empty owner and content type, unknown
/// account and container, unencrypted, no content encoding, no filename.
/// The creation time defaults to the clock's current time at build.
#[derive(Debug, Clone)]
pub struct BlobPropertiesBuilder {
    blob_size: i64,
    time_to_live_secs: i64,
    is_private: bool,
    creation_time_ms: Option<i64>,
    content_type: String,
    owner_id: String,
    service_id: String,
    account_id: AccountId,
    container_id: ContainerId,
    is_encrypted: bool,
    content_encoding: Option<String>,
    filename: Option<String>,
}

impl BlobPropertiesBuilder {
    /// Create a builder with defaults for everything but size and service.
    #[must_use]
    pub fn new(blob_size: i64, service_id: impl Into<String>) -> Self {
        Self {
            blob_size,
            time_to_live_secs: INFINITE_TTL,
            is_private: false,
            creation_time_ms: None,
            content_type: String::new(),
            owner_id: String::new(),
            service_id: service_id.into(),
            account_id: AccountId::UNKNOWN,
            container_id: ContainerId::UNKNOWN,
            is_encrypted: false,
            content_encoding: None,
            filename: None,
        }
    }

    #[must_use]
    pub fn with_time_to_live_secs(mut self, ttl: i64) -> Self {
        self.time_to_live_secs = ttl;
        self
    }

    #[must_use]
    pub fn with_private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    /// Pin the creation time instead of reading it from a clock.
    #[must_use]
    pub fn with_creation_time_ms(mut self, creation_time_ms: i64) -> Self {
        self.creation_time_ms = Some(creation_time_ms);
        self
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    #[must_use]
    pub fn with_owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self
    }

    #[must_use]
    pub fn with_account_id(mut self, account_id: impl Into<AccountId>) -> Self {
        self.account_id = account_id.into();
        self
    }

    #[must_use]
    pub fn with_container_id(mut self, container_id: impl Into<ContainerId>) -> Self {
        self.container_id = container_id.into();
        self
    }

    #[must_use]
    pub fn with_encrypted(mut self, is_encrypted: bool) -> Self {
        self.is_encrypted = is_encrypted;
        self
    }

    /// Set or clear the content encoding.
    #[must_use]
    pub fn with_content_encoding(mut self, content_encoding: Option<String>) -> Self {
        self.content_encoding = content_encoding;
        self
    }

    /// Set or clear the filename.
    #[must_use]
    pub fn with_filename(mut self, filename: Option<String>) -> Self {
        self.filename = filename;
        self
    }

    /// Build the record, reading the creation time from the system clock if
    /// none was pinned.
    #[must_use]
    pub fn build(self) -> BlobProperties {
        self.build_at(&SystemClock)
    }

    /// Build the record, reading the creation time from `clock` if none was
    /// pinned.
    #[must_use]
    pub fn build_at(self, clock: &dyn Clock) -> BlobProperties {
        BlobProperties {
            blob_size: self.blob_size,
            time_to_live_secs: self.time_to_live_secs,
            is_private: self.is_private,
            creation_time_ms: self.creation_time_ms.unwrap_or_else(|| clock.now_ms()),
            content_type: self.content_type,
            owner_id: self.owner_id,
            service_id: self.service_id,
            account_id: self.account_id,
            container_id: self.container_id,
            is_encrypted: self.is_encrypted,
            content_encoding: self.content_encoding,
            filename: self.filename,
        }
    }

    /// Like [`build`](Self::build), but rejects a negative blob size or a
    /// negative TTL other than [`INFINITE_TTL`].
    ///
    /// Records decoded from storage go through [`build`](Self::build) since
    /// historical data is accepted as written.
    pub fn try_build(self) -> Result<BlobProperties, CoreError> {
        if self.blob_size < 0 {
            return Err(CoreError::InvalidBlobSize(self.blob_size));
        }
        if self.time_to_live_secs < 0 && self.time_to_live_secs != INFINITE_TTL {
            return Err(CoreError::InvalidTimeToLive(self.time_to_live_secs));
        }
        Ok(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn sample() -> BlobProperties {
        BlobProperties::builder(1024, "media")
            .with_time_to_live_secs(3600)
            .with_creation_time_ms(1_000)
            .with_content_type("image/png")
            .with_owner_id("svc-a")
            .with_account_id(7)
            .with_container_id(3)
            .with_encrypted(true)
            .with_filename(Some("a.png".into()))
            .build()
    }

    #[test]
    fn builder_defaults() {
        let clock = ManualClock::new(5_000);
        let props = BlobProperties::builder(10, "svc").build_at(&clock);
        assert_eq!(props.blob_size(), 10);
        assert_eq!(props.service_id(), "svc");
        assert_eq!(props.time_to_live_secs(), INFINITE_TTL);
        assert!(!props.is_private());
        assert_eq!(props.creation_time_ms(), 5_000);
        assert_eq!(props.content_type(), "");
        assert_eq!(props.owner_id(), "");
        assert!(props.account_id().is_unknown());
        assert!(props.container_id().is_unknown());
        assert!(!props.is_encrypted());
        assert_eq!(props.content_encoding(), None);
        assert_eq!(props.filename(), None);
    }

    #[test]
    fn pinned_creation_time_ignores_clock() {
        let clock = ManualClock::new(5_000);
        let props = BlobProperties::builder(10, "svc")
            .with_creation_time_ms(7)
            .build_at(&clock);
        assert_eq!(props.creation_time_ms(), 7);
    }

    #[test]
    fn try_build_rejects_negative_size() {
        let err = BlobProperties::builder(-1, "svc").try_build().unwrap_err();
        assert_eq!(err, CoreError::InvalidBlobSize(-1));
    }

    #[test]
    fn try_build_rejects_negative_ttl() {
        let err = BlobProperties::builder(1, "svc")
            .with_time_to_live_secs(-5)
            .try_build()
            .unwrap_err();
        assert_eq!(err, CoreError::InvalidTimeToLive(-5));
        assert!(
            BlobProperties::builder(1, "svc")
                .with_time_to_live_secs(INFINITE_TTL)
                .try_build()
                .is_ok()
        );
    }

    #[test]
    fn expiration_time() {
        let props = sample();
        assert_eq!(props.expiration_time_ms(), Some(1_000 + 3_600_000));

        let clock = ManualClock::new(3_601_000);
        assert!(!props.is_expired(&clock));
        clock.advance(1);
        assert!(props.is_expired(&clock));
    }

    #[test]
    fn infinite_ttl_never_expires() {
        let props = BlobProperties::builder(1, "svc")
            .with_creation_time_ms(0)
            .build();
        assert_eq!(props.expiration_time_ms(), None);
        assert!(!props.is_expired(&ManualClock::new(i64::MAX)));
    }

    #[test]
    fn invalid_creation_time_has_no_expiration() {
        let props = BlobProperties::builder(1, "svc")
            .with_time_to_live_secs(60)
            .with_creation_time_ms(INVALID_TIME)
            .build();
        assert_eq!(props.expiration_time_ms(), None);
    }

    #[test]
    fn display_summary() {
        let text = sample().to_string();
        assert!(text.starts_with("BlobProperties[BlobSize=1024, ContentType=image/png"));
        assert!(text.contains("TimeToLiveInSeconds=3600"));
        assert!(text.contains("AccountId=7, ContainerId=3, IsEncrypted=true"));
        assert!(text.ends_with("ContentEncoding=null, Filename=a.png]"));
    }

    #[test]
    fn serde_roundtrip() {
        let props = sample();
        let json = serde_json::to_string(&props).unwrap();
        assert!(json.contains("\"account_id\":7"));
        let back: BlobProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(back, props);
    }

    #[test]
    fn serde_defaults_tenancy_fields() {
        let json = r#"{
            "blob_size": 1,
            "time_to_live_secs": -1,
            "is_private": false,
            "creation_time_ms": 0,
            "content_type": "",
            "owner_id": "",
            "service_id": "svc"
        }"#;
        let props: BlobProperties = serde_json::from_str(json).unwrap();
        assert_eq!(props.account_id(), AccountId::UNKNOWN);
        assert_eq!(props.container_id(), ContainerId::UNKNOWN);
        assert!(!props.is_encrypted());
        assert_eq!(props.filename(), None);
    }
}
