mod application;
mod cli;
mod data;
mod domain;
mod infra;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

/// Log level used when RUST_LOG is unset, empty or unparsable
const DEFAULT_LOG: &str = "ltr_prep=info";

/// Build the log filter from the RUST_LOG value, if any.
/// A usable RUST_LOG replaces the default entirely.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG))
}

fn main() -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.run()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn debug_enabled(filter: EnvFilter) -> bool {
        let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
        tracing::subscriber::with_default(subscriber, || tracing::enabled!(Level::DEBUG))
    }

    #[test]
    fn test_default_filter_is_info() {
        assert_eq!(log_filter(None).to_string(), DEFAULT_LOG);
        assert_eq!(log_filter(Some("  ")).to_string(), DEFAULT_LOG);
        assert!(!debug_enabled(log_filter(None)));
    }

    #[test]
    fn test_rust_log_overrides_default() {
        let filter = log_filter(Some("ltr_prep=debug"));
        assert_eq!(filter.to_string(), "ltr_prep=debug");
        assert!(debug_enabled(log_filter(Some("ltr_prep=debug"))));
    }
}
