//! Configuration for the `blobmeta` CLI, loaded from a TOML file.
//!
//! ```toml
//! [output]
//! format = "json"
//! encoding = "base64"
//! ```
//!
//! Command-line flags override values from the file.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Textual representation of encoded bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ByteEncoding {
    #[default]
    Hex,
    Base64,
}

/// Top-level CLI configuration.
#[derive(Debug, Default, Deserialize)]
pub struct CliConfig {
    /// Output preferences.
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub encoding: ByteEncoding,
}

impl CliConfig {
    /// Load configuration from `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded CLI config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.output.encoding, ByteEncoding::Hex);
    }

    #[test]
    fn output_section() {
        let toml = r#"
[output]
format = "json"
encoding = "base64"
"#;
        let config: CliConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.encoding, ByteEncoding::Base64);
    }

    #[test]
    fn partial_output_section() {
        let config: CliConfig = toml::from_str("[output]\nformat = \"json\"").unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.encoding, ByteEncoding::Hex);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(toml::from_str::<CliConfig>("[output]\nformat = \"xml\"").is_err());
    }
}
