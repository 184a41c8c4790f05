//! Runtime configuration shared by every subcommand.
//!
//! Each option can come from the command line or from the environment:
//!
//! | Option         | Environment    | Default    |
//! |----------------|----------------|------------|
//! | `--database`   | `WQM_DATABASE` | `agua.db`  |
//! | `--host`       | `WQM_HOST`     | `0.0.0.0`  |
//! | `--port`       | `PORT`         | `10000`    |

use clap::Args;
use std::path::PathBuf;

pub const DEFAULT_DATABASE: &str = "agua.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 10000;

/// Where the measurement store lives.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Path to the SQLite database file (created if missing)
    #[arg(long, global = true, env = "WQM_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,
}

/// Options for the HTTP dashboard.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "WQM_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// CSV file imported at startup when the database is empty
    #[arg(long)]
    pub seed_csv: Option<PathBuf>,
}
