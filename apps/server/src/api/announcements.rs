use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use rightsbook_core::SecurityChangeEvent;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

const MESSAGE_ID_HEADER: &str = "x-message-id";

/// Accepts a one-line announcement such as `CAPITAL_RAISE FOOLAD 0.5` and
/// returns the grants it produced.
async fn post_announcement(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> ApiResult<Json<Vec<SecurityChangeEvent>>> {
    let message_id = headers
        .get(MESSAGE_ID_HEADER)
        .map(|value| {
            value
                .to_str()
                .map(str::to_string)
                .map_err(|_| ApiError::BadRequest("X-Message-Id must be ASCII".to_string()))
        })
        .transpose()?;
    let grants = state
        .announcement_consumer
        .consume(&body, message_id)
        .await?;
    Ok(Json(grants))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/announcements", post(post_announcement))
}
