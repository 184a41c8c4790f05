//! HTTP dashboard server.
//!
//! Every handler runs its store work through [`run_store`], which moves it
//! onto Tokio's blocking pool. The store opens and closes its own SQLite
//! connection inside that call, so no handle outlives a request.

mod error;
mod routes;

pub use error::AppError;
pub use routes::router;

use crate::config::ServeArgs;
use crate::dashboard::Dashboard;
use crate::transfer::seed_if_empty;
use log::info;
use std::sync::Arc;
use wqm_db::Database;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard<Database>,
}

impl AppState {
    pub fn new(db: Database) -> Arc<Self> {
        Arc::new(Self {
            dashboard: Dashboard::new(db),
        })
    }
}

/// Run blocking store work for one request.
pub(crate) async fn run_store<T, F>(state: &AppState, work: F) -> Result<T, AppError>
where
    F: FnOnce(&Dashboard<Database>) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let dashboard = state.dashboard.clone();
    let result = tokio::task::spawn_blocking(move || work(&dashboard)).await?;
    Ok(result?)
}

/// Start the dashboard and serve until Ctrl-C.
pub async fn run_serve(db: Database, args: &ServeArgs) -> anyhow::Result<()> {
    if let Some(seed) = &args.seed_csv {
        seed_if_empty(&db, seed)?;
    }

    let app = router(AppState::new(db.clone()));
    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    info!(
        "[WQM] http: dashboard for {} listening on http://{}",
        db.path().display(),
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("[WQM] http: server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("[WQM] http: failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("[WQM] http: shutdown requested");
}
