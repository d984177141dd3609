use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::tempdir;
use tower::ServiceExt;
use rightsbook_server::{api::app_router, build_state, config::Config};

async fn build_test_router(extra: &[(&str, String)]) -> Router {
    let mut vars: Vec<(String, String)> = vec![("RB_STORAGE".into(), "memory".into())];
    vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.clone())));
    let config = Config::from_lookup(|key| {
        vars.iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap();
    let state = build_state(&config).await.unwrap();
    app_router(state, &config)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    read(app.clone().oneshot(request).await.unwrap()).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

async fn announce(app: &Router, text: &str, message_id: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/announcements")
        .header(header::CONTENT_TYPE, "text/plain");
    if let Some(id) = message_id {
        builder = builder.header("X-Message-Id", id);
    }
    let request = builder.body(Body::from(text.to_string())).unwrap();
    read(app.clone().oneshot(request).await.unwrap()).await
}

async fn register(app: &Router, symbol: &str, kind: &str) {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/v1/securities",
        Some(json!({ "symbol": symbol, "kind": kind })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn adjust(app: &Router, portfolio: &str, symbol: &str, delta: i64) {
    let (status, _) = send(
        app,
        Method::POST,
        &format!("/api/v1/portfolios/{portfolio}/adjustments"),
        Some(json!({ "symbol": symbol, "delta": delta })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn holding(app: &Router, portfolio: &str, symbol: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::GET,
        &format!("/api/v1/portfolios/{portfolio}/holdings"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["positions"][symbol].as_i64().unwrap_or(0)
}

async fn seeded_router() -> Router {
    let app = build_test_router(&[]).await;
    register(&app, "FOOLAD", "STOCK").await;
    register(&app, "FOOLAD_X", "RIGHT").await;
    app
}

#[tokio::test]
async fn healthz_works() {
    let app = build_test_router(&[]).await;
    let response = app
        .oneshot(Request::builder().uri("/api/v1/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn securities_are_listed_after_registration() {
    let app = seeded_router().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/securities", None).await;
    assert_eq!(status, StatusCode::OK);
    let symbols: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["symbol"].as_str().unwrap())
        .collect();
    assert_eq!(symbols, vec!["FOOLAD", "FOOLAD_X"]);
}

#[tokio::test]
async fn capital_raise_then_trade_then_use() {
    let app = seeded_router().await;
    adjust(&app, "p1", "FOOLAD", 100).await;

    let (status, grants) = announce(&app, "CAPITAL_RAISE FOOLAD 1.2", Some("jms-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(grants.as_array().unwrap().len(), 1);
    assert_eq!(grants[0]["actionRef"], "jms-1");
    assert_eq!(holding(&app, "p1", "FOOLAD_X").await, 120);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/rights/buy",
        Some(json!({ "portfolioId": "p1", "rightSymbol": "FOOLAD_X", "quantity": 30, "price": 120 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(holding(&app, "p1", "FOOLAD_X").await, 150);

    let (status, outcome) = send(
        &app,
        Method::POST,
        "/api/v1/rights/use",
        Some(json!({ "portfolioId": "p1", "rightSymbol": "FOOLAD_X", "quantity": 40, "requestRef": "use-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["burned"]["delta"], -40);
    assert_eq!(outcome["minted"]["delta"], 40);
    assert_eq!(holding(&app, "p1", "FOOLAD_X").await, 110);
    assert_eq!(holding(&app, "p1", "FOOLAD").await, 140);

    let (status, events) = send(&app, Method::GET, "/api/v1/portfolios/p1/events", None).await;
    assert_eq!(status, StatusCode::OK);
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 5);
    assert!(events
        .iter()
        .any(|e| e["description"].as_str().unwrap().contains("Used 40 of FOOLAD_X")));
}

#[tokio::test]
async fn overselling_is_a_conflict() {
    let app = seeded_router().await;
    adjust(&app, "p1", "FOOLAD_X", 120).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/rights/sell",
        Some(json!({ "portfolioId": "p1", "rightSymbol": "FOOLAD_X", "quantity": 121, "price": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
    assert!(body["message"].as_str().unwrap().contains("requested 121, available 120"));
    assert_eq!(holding(&app, "p1", "FOOLAD_X").await, 120);
}

#[tokio::test]
async fn error_statuses_follow_the_error_kind() {
    let app = seeded_router().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/rights/buy",
        Some(json!({ "portfolioId": "p1", "rightSymbol": "FOOLAD_X", "quantity": 0, "price": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/rights/buy",
        Some(json!({ "portfolioId": "p1", "rightSymbol": "NOPE_X", "quantity": 1, "price": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = announce(&app, "CAPITAL_RAISE FOOLAD", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/portfolios/p1/adjustments",
        Some(json!({ "symbol": "FOOLAD", "delta": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn holdings_as_of_cutoff_and_portfolio_listing() {
    let app = seeded_router().await;
    let (status, empty) = send(&app, Method::GET, "/api/v1/portfolios/p9/holdings?asOf=2000-01-01T00:00:00Z", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(empty["positions"].as_object().unwrap().is_empty());

    adjust(&app, "p2", "FOOLAD", 5).await;
    adjust(&app, "p1", "FOOLAD", 7).await;

    let (_, before) = send(&app, Method::GET, "/api/v1/portfolios/p1/holdings?asOf=2000-01-01T00:00:00Z", None).await;
    assert!(before["positions"].as_object().unwrap().is_empty());
    assert_eq!(before["asOf"], "2000-01-01T00:00:00Z");

    let (_, ids) = send(&app, Method::GET, "/api/v1/portfolios", None).await;
    assert_eq!(ids, json!(["p1", "p2"]));
}

#[tokio::test]
async fn sqlite_backend_persists_events() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("test.db").to_string_lossy().to_string();
    let extra = [("RB_STORAGE", "sqlite".to_string()), ("RB_DB_PATH", db_path)];

    let app = build_test_router(&extra).await;
    register(&app, "FOO", "STOCK").await;
    adjust(&app, "p1", "FOO", 12).await;
    assert_eq!(holding(&app, "p1", "FOO").await, 12);

    let reopened = build_test_router(&extra).await;
    assert_eq!(holding(&reopened, "p1", "FOO").await, 12);
}
