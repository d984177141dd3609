use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use rightsbook_core::securities::{Security, SecurityRegistryTrait};

use crate::{error::ApiResult, main_lib::AppState, models::NewSecurity};

async fn list_securities(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Security>>> {
    let securities = state.security_registry.list_securities()?;
    Ok(Json(securities))
}

async fn register_security(
    State(state): State<Arc<AppState>>,
    Json(new_security): Json<NewSecurity>,
) -> ApiResult<(StatusCode, Json<Security>)> {
    let security = Security::from(new_security);
    if security.symbol.is_empty() {
        return Err(rightsbook_core::Error::invalid_argument("Symbol must not be empty").into());
    }
    state.security_registry.register(security.clone())?;
    Ok((StatusCode::CREATED, Json(security)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/securities", get(list_securities).post(register_security))
}
