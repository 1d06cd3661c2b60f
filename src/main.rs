//! # Tabpad - A Tabbed Notepad
//!
//! A small multi-tab plain-text editor with line numbers.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the editor
//! cargo run
//!
//! # Open files in tabs
//! cargo run -- notes.txt todo.txt
//!
//! # Use a config file
//! cargo run -- --config tabpad.toml
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tabpad_core::Config;
use tabpad_ui::{run, Flags};

/// Tabpad - a tabbed notepad built in Rust
#[derive(Parser, Debug)]
#[command(name = "tabpad")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Files to open, one tab each
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// TOML config file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over -v when set, e.g. RUST_LOG=tabpad_core=debug
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(log_level(args.verbose)).into())
                .from_env_lossy(),
        )
        .init();

    tracing::info!("Starting Tabpad v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;

    let flags = Flags {
        files: args.files,
        config,
    };

    run(flags).map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

fn log_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let config = Config::load(args.config.as_deref()).with_context(|| {
        format!(
            "failed to load config from {}",
            args.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;
    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["tabpad"]);
        assert!(args.files.is_empty());
        assert!(args.config.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_args_with_files() {
        let args = Args::parse_from(["tabpad", "a.txt", "b.txt", "-vv"]);
        assert_eq!(
            args.files,
            vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]
        );
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_verbosity_raises_log_level() {
        assert_eq!(log_level(0), tracing::Level::WARN);
        assert_eq!(log_level(1), tracing::Level::INFO);
        assert_eq!(log_level(2), tracing::Level::DEBUG);
        assert_eq!(log_level(7), tracing::Level::TRACE);
    }

    #[test]
    fn test_load_config_defaults_without_flag() {
        let args = Args::parse_from(["tabpad"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.ui.app_name, Config::default().ui.app_name);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\nfont_size = 18.0").unwrap();

        let path = file.path().to_string_lossy().into_owned();
        let args = Args::parse_from(["tabpad", "--config", path.as_str()]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.ui.font_size, 18.0);
    }

    #[test]
    fn test_load_config_reports_path() {
        let args = Args::parse_from(["tabpad", "--config", "/nonexistent/tabpad.toml"]);
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tabpad.toml"));
    }
}
