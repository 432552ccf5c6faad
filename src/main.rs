//! Markpeek - a terminal text pager with vim-style marks.
//!
//! # Usage
//!
//! ```bash
//! markpeek notes.txt
//! markpeek --width 50 --position top-right notes.txt
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use markpeek::app::App;
use markpeek::config::{
    ConfigOverrides, OverlayConfig, Position, clear_config_overrides, global_config_path,
    load_config_overrides, local_override_path, parse_config_tokens, save_config_overrides,
};

/// A terminal text pager with vim-style marks and a mark preview overlay
#[derive(Parser, Debug)]
#[command(name = "markpeek", version, about, long_about = None)]
struct Cli {
    /// Text file to view
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Overlay width in columns
    #[arg(long)]
    width: Option<u16>,

    /// Cap on overlay rows
    #[arg(long)]
    max_height: Option<u16>,

    /// Column offset between cursor and overlay
    #[arg(long)]
    offset_x: Option<u16>,

    /// Row offset between cursor and overlay
    #[arg(long)]
    offset_y: Option<u16>,

    /// Overlay anchor; `cursor` follows the cursor, corners are fixed
    #[arg(long, value_enum)]
    position: Option<Position>,

    /// Save current overlay flags as defaults in the global config
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in the global config
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_overrides = parse_config_tokens(&raw_args);

    if cli.clear {
        clear_config_overrides(&global_path)?;
    }
    if cli.save {
        save_config_overrides(&global_path, &cli_overrides)?;
    }

    let file_overrides = if cli.clear {
        ConfigOverrides::default()
    } else {
        let global_overrides = load_config_overrides(&global_path)?;
        let local_overrides = load_config_overrides(&local_path)?;
        global_overrides.union(&local_overrides)
    };
    let effective = file_overrides.union(&cli_overrides);
    let config = OverlayConfig::default().resolve(&effective);

    // Verify file exists
    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    // Run the application
    App::new(cli.file).with_config(config).run()
}
