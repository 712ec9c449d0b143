use std::path::PathBuf;

use anyhow::Context;
use blobmeta_codec::{FormatVersion, properties};
use clap::Args;

use crate::Settings;
use crate::config::OutputFormat;
use crate::record::{RecordSpec, encode_bytes};

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Record description (`.toml` or `.json`).
    #[arg(long)]
    pub input: PathBuf,
    /// Also write the raw encoded bytes to this file.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &EncodeArgs, settings: Settings) -> anyhow::Result<()> {
    let props = RecordSpec::load(&args.input)?.into_properties()?;
    let bytes = properties::to_bytes(&props)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), size = bytes.len(), "wrote encoded record");
    }

    let encoded = encode_bytes(&bytes, settings.encoding);
    match settings.format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "version": FormatVersion::CURRENT.tag(),
                "size": bytes.len(),
                "bytes": encoded,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("Version: {}", FormatVersion::CURRENT);
            println!("Size:    {}", bytes.len());
            println!("Bytes:   {encoded}");
        }
    }
    Ok(())
}
