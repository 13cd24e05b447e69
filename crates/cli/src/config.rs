//! CLI configuration from flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use canteen_core::MilestoneLadder;
use clap::Args;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,canteen=info";

/// Where data lives and how the client behaves.
///
/// Every option can come from a global flag or its environment variable;
/// the flag wins.
#[derive(Debug, Clone, Args)]
pub struct CliConfig {
    /// Directory holding member and competition documents
    #[arg(long, global = true, env = "CANTEEN_DATA_DIR", default_value = ".canteen")]
    pub data_dir: PathBuf,

    /// Directory holding the saved session [default: <DATA_DIR>/session]
    #[arg(long, global = true, env = "CANTEEN_SESSION_DIR")]
    pub session_dir: Option<PathBuf>,

    /// JSON file with a custom milestone ladder
    #[arg(long, global = true, env = "CANTEEN_MILESTONES")]
    pub milestones: Option<PathBuf>,

    /// How often `watch` re-reads the store, in milliseconds
    #[arg(
        long,
        global = true,
        env = "CANTEEN_POLL_MS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_ms: u64,
}

impl CliConfig {
    /// Session directory, falling back to a subdirectory of the data dir.
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("session"))
    }

    /// Interval between store refreshes while watching.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }

    /// Milestone ladder from `--milestones`, or the canteen default.
    pub async fn ladder(&self) -> Result<MilestoneLadder> {
        let Some(path) = &self.milestones else {
            return Ok(MilestoneLadder::default());
        };
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading milestone ladder {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing milestone ladder {}", path.display()))
    }
}
