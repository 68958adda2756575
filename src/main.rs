mod config;
mod driver;
mod icon;
mod png;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use config::IconSetConfig;

/// Warnings only by default, so a plain run prints just the per-icon report.
const DEFAULT_LOG_DIRECTIVE: &str = "icongen=warn";

#[derive(Parser)]
#[command(name = "icongen", about = "Generate centered-square PNG app icons")]
struct Cli {
    /// TOML icon set to generate instead of the built-in icons/ set
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Create missing output directories instead of failing
    #[arg(long)]
    create_dirs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout only carries the per-icon report.
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(DEFAULT_LOG_DIRECTIVE.parse()?)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => IconSetConfig::load(path)?,
        None => IconSetConfig::default(),
    };
    let specs = config.specs();
    info!("Generating {} icon(s)", specs.len());

    let mut stdout = std::io::stdout().lock();
    driver::run(&specs, cli.create_dirs || config.create_dirs, &mut stdout)
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::Directive;

    use super::*;

    #[test]
    fn test_default_log_directive() {
        let directive: Directive = DEFAULT_LOG_DIRECTIVE.parse().unwrap();
        assert_eq!(directive.to_string(), "icongen=warn");
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["icongen"]);
        assert!(cli.config.is_none());
        assert!(!cli.create_dirs);

        let cli = Cli::parse_from(["icongen", "--config", "set.toml", "--create-dirs"]);
        assert_eq!(cli.config, Some(PathBuf::from("set.toml")));
        assert!(cli.create_dirs);
    }
}
