use std::path::PathBuf;

use anyhow::{Context, bail};
use blobmeta_codec::properties;
use clap::Args;

use crate::Settings;
use crate::config::OutputFormat;
use crate::record::decode_bytes;

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Encoded record in the configured textual encoding.
    #[arg(conflicts_with = "file")]
    pub data: Option<String>,
    /// Read raw encoded bytes from a file instead.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub fn run(args: &DecodeArgs, settings: Settings) -> anyhow::Result<()> {
    let bytes = match (&args.data, &args.file) {
        (Some(data), None) => decode_bytes(data, settings.encoding)?,
        (None, Some(path)) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        _ => bail!("provide either encoded data or --file"),
    };

    let version = properties::peek_version(&bytes)?;
    let (props, consumed) = properties::from_slice(&bytes)?;
    if consumed < bytes.len() {
        tracing::warn!(
            consumed,
            total = bytes.len(),
            "input has trailing bytes after the record"
        );
    }

    match settings.format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "version": version.tag(),
                "consumed": consumed,
                "properties": props,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("Version:          {version}");
            println!("Consumed:         {consumed} of {} bytes", bytes.len());
            println!("Blob size:        {}", props.blob_size());
            if props.has_infinite_ttl() {
                println!("TTL:              infinite");
            } else {
                println!("TTL:              {}s", props.time_to_live_secs());
            }
            println!("Private:          {}", props.is_private());
            println!("Created (ms):     {}", props.creation_time_ms());
            println!("Content type:     {}", props.content_type());
            println!("Owner:            {}", props.owner_id());
            println!("Service:          {}", props.service_id());
            println!("Account:          {}", props.account_id());
            println!("Container:        {}", props.container_id());
            println!("Encrypted:        {}", props.is_encrypted());
            println!(
                "Content encoding: {}",
                props.content_encoding().unwrap_or("-")
            );
            println!("Filename:         {}", props.filename().unwrap_or("-"));
        }
    }
    Ok(())
}
