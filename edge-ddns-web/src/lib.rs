//! edge-ddns web frontend
//!
//! A DynDNS / EasyDNS compatible update endpoint in front of
//! [`edge_ddns_core::UpdateService`]. Every path and method is routed to the
//! same handler; the response dialect is chosen from the path.

pub mod config;
pub mod handlers;
pub mod logging;
pub mod state;

use actix_web::{App, HttpServer, web};
use anyhow::Context;

use crate::config::AppConfig;
use crate::state::AppState;

/// Register the catch-all update handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::to(handlers::dispatch));
}

/// Bind and serve until shutdown.
pub async fn run(config: &AppConfig, state: AppState) -> anyhow::Result<()> {
    let data = web::Data::new(state);
    let addr = (config.server.host.clone(), config.server.port);
    let workers = config.server.worker_count();

    tracing::info!(
        "Listening on {}:{} with {workers} worker(s)",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || App::new().app_data(data.clone()).configure(configure))
        .workers(workers)
        .bind(addr.clone())
        .with_context(|| format!("failed to bind {}:{}", addr.0, addr.1))?
        .run()
        .await
        .context("server terminated with an error")
}
