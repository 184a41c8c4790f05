//! Command implementations for the water quality monitor.
//!
//! `serve` runs the HTTP dashboard; the other subcommands work on the
//! measurement store directly.

use clap::Subcommand;
use std::path::PathBuf;
use wqm_core::{DateFilter, Metric, Submission};
use wqm_db::Database;

pub mod config;
pub mod dashboard;
pub mod records;
pub mod serve;
pub mod transfer;

pub use config::{ServeArgs, StoreArgs};

#[derive(Subcommand)]
pub enum Command {
    /// Run the web dashboard
    Serve(ServeArgs),

    /// Insert one measurement (an incomplete one is reported and skipped)
    Insert {
        /// Sampling date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// Sampling time, HH:MM
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        ph: Option<String>,
        /// Turbidity in NTU
        #[arg(long)]
        turbidity: Option<String>,
        /// Conductivity in µS/cm
        #[arg(long)]
        conductivity: Option<String>,
        /// Temperature in °C
        #[arg(long)]
        temperature: Option<String>,
    },

    /// Delete measurements by id
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// List measurements in chart order
    List {
        /// First date to include, YYYY-MM-DD
        #[arg(long)]
        from: Option<String>,
        /// Last date to include, YYYY-MM-DD
        #[arg(long)]
        to: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the chart series for one metric as JSON
    Series {
        /// ph, turbidity, conductivity or temperature
        metric: Metric,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },

    /// Import measurements from a Fecha,Hora,pH,... CSV file
    Import { csv: PathBuf },

    /// Export measurements as CSV
    Export {
        /// Output file (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

pub async fn run(store: StoreArgs, command: Command) -> anyhow::Result<()> {
    let db = Database::open(&store.database)?;
    match command {
        Command::Serve(args) => serve::run_serve(db, &args).await,
        Command::Insert {
            date,
            time,
            ph,
            turbidity,
            conductivity,
            temperature,
        } => {
            let submission = Submission {
                date,
                time,
                ph,
                turbidity,
                conductivity,
                temperature,
            };
            records::run_insert(db, &submission)
        }
        Command::Delete { ids } => records::run_delete(db, &ids),
        Command::List { from, to, json } => {
            let filter = DateFilter::from_params(from.as_deref(), to.as_deref())?;
            records::run_list(db, &filter, json)
        }
        Command::Series { metric, from, to } => {
            let filter = DateFilter::from_params(from.as_deref(), to.as_deref())?;
            records::run_series(db, metric, &filter)
        }
        Command::Import { csv } => transfer::run_import(&db, &csv).map(|_| ()),
        Command::Export { output, from, to } => {
            let filter = DateFilter::from_params(from.as_deref(), to.as_deref())?;
            transfer::run_export(&db, &filter, output.as_deref())
        }
    }
}
