use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rightsbook_core::{HoldingSnapshot, SecurityChangeEvent};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{EventView, HoldingsQuery, NewAdjustment},
};

async fn list_portfolios(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let ids = state.event_log.list_portfolio_ids()?;
    Ok(Json(ids))
}

async fn get_holdings(
    Path(portfolio_id): Path<String>,
    Query(query): Query<HoldingsQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HoldingSnapshot>> {
    let snapshot = match query.as_of {
        Some(cutoff) => state.holdings_service.holdings_as_of(&portfolio_id, cutoff)?,
        None => state.holdings_service.current_holdings(&portfolio_id)?,
    };
    Ok(Json(snapshot))
}

async fn list_events(
    Path(portfolio_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<EventView>>> {
    let events = state.event_log.find_by_portfolio(&portfolio_id)?;
    Ok(Json(events.into_iter().map(EventView::from).collect()))
}

async fn record_adjustment(
    Path(portfolio_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(adjustment): Json<NewAdjustment>,
) -> ApiResult<(StatusCode, Json<SecurityChangeEvent>)> {
    let event = state
        .adjustment_service
        .record_adjustment(
            &portfolio_id,
            &adjustment.symbol,
            adjustment.delta,
            adjustment.reference,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolios", get(list_portfolios))
        .route("/portfolios/{id}/holdings", get(get_holdings))
        .route("/portfolios/{id}/events", get(list_events))
        .route("/portfolios/{id}/adjustments", post(record_adjustment))
}
