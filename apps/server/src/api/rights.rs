use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use rightsbook_core::rights::{RightOrder, RightUsageOutcome, RightUsageRequest};
use rightsbook_core::SecurityChangeEvent;

use crate::{error::ApiResult, main_lib::AppState};

async fn buy_rights(
    State(state): State<Arc<AppState>>,
    Json(order): Json<RightOrder>,
) -> ApiResult<Json<SecurityChangeEvent>> {
    let event = state.right_trading_service.buy_rights(order).await?;
    Ok(Json(event))
}

async fn sell_rights(
    State(state): State<Arc<AppState>>,
    Json(order): Json<RightOrder>,
) -> ApiResult<Json<SecurityChangeEvent>> {
    let event = state.right_trading_service.sell_rights(order).await?;
    Ok(Json(event))
}

async fn use_rights(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RightUsageRequest>,
) -> ApiResult<Json<RightUsageOutcome>> {
    let outcome = state.right_usage_service.use_rights(request).await?;
    Ok(Json(outcome))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rights/buy", post(buy_rights))
        .route("/rights/sell", post(sell_rights))
        .route("/rights/use", post(use_rights))
}
