// HTTP request handlers
use std::sync::Arc;

use axum::{Json, extract::State};

use crate::domain::dashboard::DashboardState;
use crate::presentation::app_state::AppState;
use crate::presentation::views::{self, ChartView, TableRow};

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard state: records plus the loading and error flags.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardState> {
    Json(state.controller.snapshot().await)
}

/// Multi-series time chart projection of the current record set.
pub async fn dashboard_chart(State(state): State<Arc<AppState>>) -> Json<ChartView> {
    let snapshot = state.controller.snapshot().await;
    Json(views::chart_view(&snapshot.records))
}

/// Table projection of the current record set.
pub async fn dashboard_table(State(state): State<Arc<AppState>>) -> Json<Vec<TableRow>> {
    let snapshot = state.controller.snapshot().await;
    Json(views::table_rows(&snapshot.records))
}
