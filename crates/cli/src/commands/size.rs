use std::path::PathBuf;

use blobmeta_codec::properties;
use clap::Args;

use crate::Settings;
use crate::config::OutputFormat;
use crate::record::RecordSpec;

#[derive(Args, Debug)]
pub struct SizeArgs {
    /// Record description (`.toml` or `.json`).
    #[arg(long)]
    pub input: PathBuf,
}

pub fn run(args: &SizeArgs, settings: Settings) -> anyhow::Result<()> {
    let props = RecordSpec::load(&args.input)?.into_properties()?;
    let size = properties::size_of(&props);
    match settings.format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "size": size }));
        }
        OutputFormat::Text => println!("{size}"),
    }
    Ok(())
}
