//! Binary crate for the `geocode` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Human-friendly output formatting

use std::process::ExitCode;

use clap::Parser;
use geocode_core::GeocodeError;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    exit_status(cmd.run().await).map(ExitCode::from)
}

/// Process exit status for a finished command: 0 on success, 2 when the
/// provider found nothing. Other failures are passed through.
fn exit_status(result: anyhow::Result<()>) -> anyhow::Result<u8> {
    match result {
        Ok(()) => Ok(0),
        Err(err) if err.downcast_ref::<GeocodeError>().is_some_and(GeocodeError::is_no_result) => {
            eprintln!("No result found");
            Ok(2)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn success_exits_zero() {
        assert_eq!(exit_status(Ok(())).unwrap(), 0);
    }

    #[test]
    fn no_result_exits_two() {
        let result = Err(GeocodeError::NoResult.into());
        assert_eq!(exit_status(result).unwrap(), 2);
    }

    #[test]
    fn no_result_behind_context_exits_two() {
        let result: anyhow::Result<()> =
            Err(GeocodeError::NoResult).context("Failed to geocode address");
        assert_eq!(exit_status(result).unwrap(), 2);
    }

    #[test]
    fn other_failures_are_propagated() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let result = Err(GeocodeError::Decode(json_err).into());

        let err = exit_status(result).unwrap_err();
        assert!(err.to_string().contains("Failed to parse geocoding response"));
    }
}
