//! Serve command - run the online relay

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use throne_relay::{run_server, RelayConfig};

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3000")]
    pub port: u16,

    /// Directory with the web client's static files
    #[arg(long, default_value = "public")]
    pub static_dir: PathBuf,
}

/// Build the relay config and block on the server until it stops
pub fn run(args: ServeArgs) -> Result<()> {
    let config = relay_config(&args)?;

    tracing::info!("serving Throne relay on port {}", config.port);

    tokio::runtime::Runtime::new()
        .context("failed to start the async runtime")?
        .block_on(run_server(config))
}

/// Map arguments to a relay config, checking the static directory.
///
/// A missing directory is only a warning: the relay still answers its API
/// and the web client can be dropped in later. A path that exists but is
/// not a directory is refused outright.
fn relay_config(args: &ServeArgs) -> Result<RelayConfig> {
    if !args.static_dir.exists() {
        tracing::warn!(
            "static directory {} does not exist; the API will run without the web client",
            args.static_dir.display()
        );
    } else if !args.static_dir.is_dir() {
        anyhow::bail!("{} is not a directory", args.static_dir.display());
    }

    Ok(RelayConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(static_dir: &str) -> ServeArgs {
        ServeArgs {
            port: 4100,
            static_dir: PathBuf::from(static_dir),
        }
    }

    #[test]
    fn test_relay_config_from_args() {
        let config = relay_config(&args("client")).unwrap();
        assert_eq!(config.port, 4100);
        assert_eq!(config.static_dir, "client");
    }

    #[test]
    fn test_missing_static_dir_is_not_fatal() {
        assert!(relay_config(&args("/no/such/dir/anywhere")).is_ok());
    }

    #[test]
    fn test_static_dir_must_be_a_directory() {
        // The package manifest is a file that always exists
        assert!(relay_config(&args("Cargo.toml")).is_err());
    }
}
