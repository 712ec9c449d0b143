use blobmeta_codec::{FieldKind, FormatVersion};
use clap::Args;

use crate::Settings;
use crate::config::OutputFormat;

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Format version to describe (defaults to the current one).
    #[arg(long)]
    pub version: Option<i16>,
}

fn width(kind: FieldKind) -> String {
    match kind {
        FieldKind::Fixed(width) => width.to_string(),
        FieldKind::RequiredText | FieldKind::NullableText => "4+N".to_owned(),
    }
}

fn describe(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Fixed(_) => "fixed",
        FieldKind::RequiredText => "text",
        FieldKind::NullableText => "nullable text",
    }
}

pub fn run(args: &LayoutArgs, settings: Settings) -> anyhow::Result<()> {
    let version = match args.version {
        Some(tag) => FormatVersion::try_from(tag)?,
        None => FormatVersion::CURRENT,
    };

    match settings.format {
        OutputFormat::Json => {
            let fields: Vec<_> = version
                .fields()
                .map(|spec| {
                    serde_json::json!({
                        "name": spec.name,
                        "kind": describe(spec.kind),
                        "width": width(spec.kind),
                        "since": spec.group.since().tag(),
                    })
                })
                .collect();
            let out = serde_json::json!({
                "version": version.tag(),
                "min_size": version.min_encoded_size(),
                "fields": fields,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("Layout {version} (minimum {} bytes):", version.min_encoded_size());
            for spec in version.fields() {
                println!(
                    "  {name:<18} {width:>4}  {kind:<13}  since {since}",
                    name = spec.name,
                    width = width(spec.kind),
                    kind = describe(spec.kind),
                    since = spec.group.since(),
                );
            }
        }
    }
    Ok(())
}
