//! WQM CLI - water quality dashboard and measurement store tools.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wqm-cli",
    version,
    about = "Water quality monitoring dashboard"
)]
struct Cli {
    #[command(flatten)]
    store: wqm_cmd::StoreArgs,

    #[command(subcommand)]
    command: wqm_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("[WQM] cli: using database {}", cli.store.database.display());
    wqm_cmd::run(cli.store, cli.command).await
}
