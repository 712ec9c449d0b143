//! blobmeta CLI
//!
//! Produce, inspect and size encoded blob properties records.

mod commands;
mod config;
mod record;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{ByteEncoding, CliConfig, OutputFormat};

/// blobmeta CLI: work with encoded blob properties.
#[derive(Parser, Debug)]
#[command(name = "blobmeta", version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, env = "BLOBMETA_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output format (overrides the config file).
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    /// Textual encoding of binary data (overrides the config file).
    #[arg(long, global = true)]
    encoding: Option<ByteEncoding>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a record description into the current wire format.
    Encode(commands::encode::EncodeArgs),
    /// Decode an encoded record of any supported version.
    Decode(commands::decode::DecodeArgs),
    /// Print the encoded size of a record description.
    Size(commands::size::SizeArgs),
    /// Print the wire layout of a format version.
    Layout(commands::layout::LayoutArgs),
}

/// Output settings after merging the config file with command-line flags.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub format: OutputFormat,
    pub encoding: ByteEncoding,
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    let settings = Settings {
        format: cli.format.unwrap_or(config.output.format),
        encoding: cli.encoding.unwrap_or(config.output.encoding),
    };

    match cli.command {
        Command::Encode(args) => commands::encode::run(&args, settings),
        Command::Decode(args) => commands::decode::run(&args, settings),
        Command::Size(args) => commands::size::run(&args, settings),
        Command::Layout(args) => commands::layout::run(&args, settings),
    }
}
