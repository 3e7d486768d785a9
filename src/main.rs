// Main entry point - dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::application::monitor_service::MonitorService;
use crate::application::scheduler;
use crate::application::state::StateController;
use crate::infrastructure::config::load_monitor_config;
use crate::infrastructure::influx_source::InfluxObservationSource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard, dashboard_chart, dashboard_table, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_monitor_config()?;

    // Create the observation source (infrastructure layer)
    let source = Arc::new(InfluxObservationSource::new(config.influx));

    // Create the fetch-cycle service and state holder (application layer)
    let service = MonitorService::new(source);
    let controller = StateController::new();

    // Start the refresh loop; the handle scopes it to this process
    let refresh = scheduler::activate(service, controller.clone());

    // Create application state
    let state = Arc::new(AppState { controller });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(dashboard))
        .route("/dashboard/chart", get(dashboard_chart))
        .route("/dashboard/table", get(dashboard_table))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = "0.0.0.0:8080".parse()?;
    println!("Starting aqua-monitor service on {addr}");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresh.deactivate().await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
