//! Record descriptions read from TOML or JSON files.

use std::path::Path;

use anyhow::Context;
use blobmeta_core::{BlobProperties, INFINITE_TTL};
use serde::Deserialize;

use crate::config::ByteEncoding;

/// A blob properties record as written by hand.
///
/// Only `blob_size` and `service_id` are required; everything else takes the
/// builder defaults. A missing `creation_time_ms` means "now".
///
/// ```toml
/// blob_size = 1024
/// service_id = "media"
/// content_type = "image/png"
/// account_id = 7
/// container_id = 3
/// filename = "a.png"
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordSpec {
    pub blob_size: i64,
    pub service_id: String,
    #[serde(default)]
    pub ttl_secs: Option<i64>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub creation_time_ms: Option<i64>,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub account_id: Option<i16>,
    #[serde(default)]
    pub container_id: Option<i16>,
    #[serde(default)]
    pub is_encrypted: bool,
    #[serde(default)]
    pub content_encoding: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl RecordSpec {
    /// Read a record from `path`. Files ending in `.json` are parsed as JSON,
    /// anything else as TOML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read record file {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse JSON record {}", path.display()))
        } else {
            toml::from_str(&raw)
                .with_context(|| format!("failed to parse TOML record {}", path.display()))
        }
    }

    /// Validate and build the record.
    pub fn into_properties(self) -> anyhow::Result<BlobProperties> {
        let mut builder = BlobProperties::builder(self.blob_size, self.service_id)
            .with_time_to_live_secs(self.ttl_secs.unwrap_or(INFINITE_TTL))
            .with_private(self.is_private)
            .with_content_type(self.content_type)
            .with_owner_id(self.owner_id)
            .with_encrypted(self.is_encrypted)
            .with_content_encoding(self.content_encoding)
            .with_filename(self.filename);
        if let Some(creation_time_ms) = self.creation_time_ms {
            builder = builder.with_creation_time_ms(creation_time_ms);
        }
        if let Some(account_id) = self.account_id {
            builder = builder.with_account_id(account_id);
        }
        if let Some(container_id) = self.container_id {
            builder = builder.with_container_id(container_id);
        }
        Ok(builder.try_build()?)
    }
}

/// Render bytes in the chosen encoding.
pub fn encode_bytes(bytes: &[u8], encoding: ByteEncoding) -> String {
    use base64::Engine;
    match encoding {
        ByteEncoding::Hex => hex::encode(bytes),
        ByteEncoding::Base64 => base64::engine::general_purpose::STANDARD.encode(bytes),
    }
}

/// Parse bytes from their textual encoding. Whitespace is ignored.
pub fn decode_bytes(text: &str, encoding: ByteEncoding) -> anyhow::Result<Vec<u8>> {
    use base64::Engine;
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    match encoding {
        ByteEncoding::Hex => hex::decode(compact).context("input is not valid hex"),
        ByteEncoding::Base64 => base64::engine::general_purpose::STANDARD
            .decode(compact)
            .context("input is not valid base64"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobmeta_core::{AccountId, ContainerId};

    #[test]
    fn minimal_toml_record() {
        let spec: RecordSpec = toml::from_str(
            r#"
blob_size = 10
service_id = "svc"
creation_time_ms = 0
"#,
        )
        .unwrap();
        let props = spec.into_properties().unwrap();
        assert_eq!(props.blob_size(), 10);
        assert_eq!(props.time_to_live_secs(), INFINITE_TTL);
        assert_eq!(props.account_id(), AccountId::UNKNOWN);
        assert_eq!(props.container_id(), ContainerId::UNKNOWN);
        assert_eq!(props.creation_time_ms(), 0);
    }

    #[test]
    fn full_json_record() {
        let spec: RecordSpec = serde_json::from_str(
            r#"{
                "blob_size": 1024,
                "service_id": "media",
                "ttl_secs": 3600,
                "creation_time_ms": 1000,
                "content_type": "image/png",
                "owner_id": "svc-a",
                "account_id": 7,
                "container_id": 3,
                "is_encrypted": true,
                "filename": "a.png"
            }"#,
        )
        .unwrap();
        let props = spec.into_properties().unwrap();
        assert_eq!(props.account_id().get(), 7);
        assert_eq!(props.container_id().get(), 3);
        assert!(props.is_encrypted());
        assert_eq!(props.filename(), Some("a.png"));
        assert_eq!(props.content_encoding(), None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = toml::from_str::<RecordSpec>("blob_size = 1\nservice_id = \"s\"\nsize = 2");
        assert!(result.is_err());
    }

    #[test]
    fn negative_size_fails_validation() {
        let spec: RecordSpec = toml::from_str("blob_size = -5\nservice_id = \"s\"").unwrap();
        assert!(spec.into_properties().is_err());
    }

    #[test]
    fn byte_encodings() {
        let bytes = [0_u8, 4, 0xff];
        assert_eq!(encode_bytes(&bytes, ByteEncoding::Hex), "0004ff");
        assert_eq!(encode_bytes(&bytes, ByteEncoding::Base64), "AAT/");
        assert_eq!(decode_bytes("00 04\nff", ByteEncoding::Hex).unwrap(), bytes);
        assert_eq!(decode_bytes("AAT/", ByteEncoding::Base64).unwrap(), bytes);
        assert!(decode_bytes("zz", ByteEncoding::Hex).is_err());
    }
}
