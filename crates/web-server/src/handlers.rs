use crate::{error::AppError, AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use core_types::RawAnalyticsRequest;
use query_compiler::{compile, render};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing;

/// # GET /
///
/// The analytics endpoint. Takes the flat set of request parameters
/// (`col`, `agg`, optional filters/grouping/`freq`/top-N selectors), runs
/// validate -> compile -> render, executes the result against the store and
/// returns the aggregated rows as JSON.
pub async fn run_analytics(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<RawAnalyticsRequest>,
) -> Result<Json<Vec<Map<String, Value>>>, AppError> {
    let request = raw.validate()?;
    tracing::debug!(?request, "compiling analytics request");

    let compiled = compile(&state.query_config, &request);
    let rendered = render(&compiled)?;
    let rows = state.store.execute(&rendered).await?;
    Ok(Json(rows))
}
