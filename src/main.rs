//! geomanifest - build-time manifest generator for map layers
//!
//! Scans a folder of `.geojson` files, groups them by the text before the
//! first underscore and writes `manifest.json`.

use std::path::PathBuf;

use clap::Parser;
use geomanifest::commands::{self, Mode};
use geomanifest::config::{self, ConfigOverrides};
use geomanifest::logging::{init_logging, LoggingConfig};

#[derive(Parser)]
#[command(name = "geomanifest")]
#[command(author, version, about = "Group GeoJSON layers by filename prefix and write a JSON manifest")]
struct Cli {
    /// Folder that holds the layer files [default: Data]
    #[arg(long)]
    root: Option<PathBuf>,

    /// Manifest file to write [default: manifest.json]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Tracked file extension, matched case-insensitively [default: .geojson]
    #[arg(long)]
    extension: Option<String>,

    /// Group for files without an underscore [default: Other]
    #[arg(long)]
    fallback_group: Option<String>,

    /// Config file (defaults to ./geomanifest.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail if the manifest file is out of date instead of writing it
    #[arg(long, conflicts_with = "stdout")]
    check: bool,

    /// Print the manifest to stdout instead of writing it
    #[arg(long)]
    stdout: bool,

    /// After writing, list each group with its layer names
    #[arg(long, conflicts_with_all = ["check", "stdout"])]
    list: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.check {
            Mode::Check
        } else if self.stdout {
            Mode::Stdout
        } else {
            Mode::Write
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_verbosity(cli.verbose, cli.log_json));

    let mode = cli.mode();
    let overrides = ConfigOverrides {
        root: cli.root,
        output: cli.output,
        extension: cli.extension,
        fallback_group: cli.fallback_group,
    };
    let config = config::resolve(cli.config.as_deref(), overrides)?;

    commands::run(&config, mode, cli.list)
}
