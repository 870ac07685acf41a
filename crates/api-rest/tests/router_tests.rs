use api_rest::{create_router, AppState};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use casebook_core::{AssetCatalog, ContentRegistry, SessionStore};
use serde_json::Value;
use tower::ServiceExt; // for oneshot

fn app_with_assets(assets: AssetCatalog) -> Router {
    let registry = ContentRegistry::builtin().expect("builtin content is valid");
    create_router(AppState::new(registry, SessionStore::new(16), assets))
}

fn app() -> Router {
    app_with_assets(AssetCatalog::empty())
}

async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

async fn json_response(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

async fn send_json(app: &Router, method: &str, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_owned()))
                .expect("request"),
        )
        .await
        .expect("response")
}

async fn create_session(app: &Router, body: &str) -> String {
    let response = send_json(app, "POST", "/api/sessions", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_response(response).await;
    body["session"]["id"]
        .as_str()
        .expect("session id")
        .to_owned()
}

#[tokio::test]
async fn test_health_check() {
    let response = get(&app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_list_variants_marks_default() {
    let body = json_response(get(&app(), "/api/variants").await).await;
    let variants = body["variants"].as_array().expect("array");
    let ids: Vec<&str> = variants.iter().filter_map(|v| v["id"].as_str()).collect();
    assert_eq!(ids, vec!["textbot-v1", "textbot-v2"]);
    assert_eq!(variants[0]["default"], true);
    assert_eq!(variants[1]["default"], false);
}

#[tokio::test]
async fn test_list_sections_in_menu_order() {
    let response = get(&app(), "/api/variants/textbot-v2/sections").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert_eq!(
        body["sections"],
        serde_json::json!([
            "Overview",
            "Client Background",
            "Challenge",
            "Solution",
            "Results",
            "Key Takeaways"
        ])
    );
}

#[tokio::test]
async fn test_render_section_by_encoded_name() {
    let response = get(&app(), "/api/variants/textbot-v1/sections/Key%20Takeaways").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert_eq!(body["section"], "Key Takeaways");
    assert_eq!(body["position"], 5);
    assert_eq!(body["layout"], "columns");
    let cards = body["blocks"]
        .as_array()
        .expect("blocks")
        .iter()
        .filter(|b| b["kind"] == "result_card")
        .count();
    assert_eq!(cards, 7);
}

#[tokio::test]
async fn test_render_challenge_axes() {
    let body = json_response(get(&app(), "/api/variants/textbot-v1/sections/Challenge").await).await;
    let complexities: Vec<u64> = body["blocks"]
        .as_array()
        .expect("blocks")
        .iter()
        .filter(|b| b["kind"] == "challenge_axis")
        .filter_map(|b| b["complexity"].as_u64())
        .collect();
    assert_eq!(complexities, vec![8, 7, 9, 8, 9]);
}

#[tokio::test]
async fn test_render_unknown_section_is_404() {
    let response = get(&app(), "/api/variants/textbot-v1/sections/Pricing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_response(response).await;
    assert!(body["error"].as_str().expect("error").contains("Pricing"));
}

#[tokio::test]
async fn test_unknown_variant_is_404() {
    let response = get(&app(), "/api/variants/textbot-v9/sections").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let app = app();
    let id = create_session(&app, "{}").await;

    let body = json_response(get(&app, &format!("/api/sessions/{id}")).await).await;
    assert_eq!(body["session"]["selection"]["section"], "Overview");
    assert_eq!(body["view"]["section"], "Overview");

    let response = send_json(
        &app,
        "PUT",
        &format!("/api/sessions/{id}/selection"),
        r#"{"section":"Challenge"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert_eq!(body["view"]["section"], "Challenge");
    assert!(body["outcome"]["rejected"].is_null());

    let body = json_response(get(&app, &format!("/api/sessions/{id}")).await).await;
    assert_eq!(body["view"]["section"], "Challenge");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/sessions/{id}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, &format!("/api/sessions/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_selection_falls_back_and_is_reported() {
    let app = app();
    let id = create_session(&app, "{}").await;
    let response = send_json(
        &app,
        "PUT",
        &format!("/api/sessions/{id}/selection"),
        r#"{"section":"Key Takeaway"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert_eq!(body["outcome"]["rejected"], "Key Takeaway");
    assert_eq!(body["view"]["section"], "Overview");
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let app = app();
    let first = create_session(&app, "{}").await;
    let second = create_session(&app, r#"{"variant":"textbot-v2"}"#).await;

    send_json(
        &app,
        "PUT",
        &format!("/api/sessions/{first}/selection"),
        r#"{"section":"Results"}"#,
    )
    .await;

    let body = json_response(get(&app, &format!("/api/sessions/{second}")).await).await;
    assert_eq!(body["session"]["variant"], "textbot-v2");
    assert_eq!(body["view"]["section"], "Overview");

    let body = json_response(get(&app, &format!("/api/sessions/{first}")).await).await;
    assert_eq!(body["view"]["section"], "Results");
}

#[tokio::test]
async fn test_create_session_with_unknown_variant_is_400() {
    let response = send_json(&app(), "POST", "/api/sessions", r#"{"variant":"nope"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_response(response).await;
    assert!(body["error"].as_str().expect("error").contains("nope"));
}

#[tokio::test]
async fn test_malformed_session_id_is_400() {
    let response = get(&app(), "/api/sessions/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_renders_selected_section() {
    let response = get(&app(), "/?section=Challenge").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h2>Challenge</h2>"));
    assert!(html.contains("Challenge Complexity (1-10 scale)"));
    assert!(html.contains(r#"class="radar-area""#));
    assert!(!html.contains(r#"class="notice""#));
}

#[tokio::test]
async fn test_dashboard_falls_back_with_notice() {
    let html = body_text(get(&app(), "/?section=Bogus&variant=textbot-v2").await).await;
    assert!(html.contains("<h2>Overview</h2>"));
    assert!(html.contains(r#"class="notice""#));
    assert!(html.contains("Bogus"));
}

#[tokio::test]
async fn test_dashboard_without_query_shows_default() {
    let html = body_text(get(&app(), "/").await).await;
    assert!(html.contains("<h2>Overview</h2>"));
    assert!(html.contains("100%"));
    assert!(html.contains("Company logo"));
}

#[tokio::test]
async fn test_dashboard_key_takeaways_columns() {
    let html = body_text(get(&app(), "/?section=Key%20Takeaways").await).await;
    let (_, columns) = html
        .split_once(r#"<div class="columns">"#)
        .expect("columns grid");
    assert_eq!(columns.matches(r#"<details class="card">"#).count(), 7);
    assert_eq!(columns.matches("</details>").count(), 7);
    assert!(columns.contains("<summary>"));
    assert!(!html.contains(r#"<div class="card">"#));
}

#[tokio::test]
async fn test_dashboard_stacked_cards_stay_open() {
    let html = body_text(get(&app(), "/?section=Results").await).await;
    assert!(!html.contains(r#"class="columns""#));
    assert_eq!(html.matches(r#"<div class="card">"#).count(), 5);
}

#[tokio::test]
async fn test_radar_svg() {
    let response = get(&app(), "/charts/textbot-v1/radar.svg").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "image/svg+xml"
    );
    let svg = body_text(response).await;
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Multi-system Connectivity"));
}

#[tokio::test]
async fn test_openapi_document() {
    let response = get(&app(), "/api-docs/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert!(body["paths"]["/api/sessions"].is_object());
}

#[tokio::test]
async fn test_assets_are_served_when_present() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("logo.png"), b"\x89PNG").expect("write logo");
    let app = app_with_assets(AssetCatalog::scan(Some(dir.path())));

    let response = get(&app, "/assets/logo.png").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(get(&app, "/").await).await;
    assert!(html.contains(r#"<img class="logo""#));
    assert!(html.contains("logo.png"));
    // The flow chart is still missing, so the Solution page uses a placeholder.
    let html = body_text(get(&app, "/?section=Solution").await).await;
    assert!(html.contains(r#"class="placeholder""#));
}

async fn assert_json_error(response: Response, status: StatusCode) -> String {
    assert_eq!(response.status(), status);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let body = json_response(response).await;
    body["error"].as_str().expect("error message").to_owned()
}

#[tokio::test]
async fn test_create_session_without_body_uses_default_variant() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/sessions")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_response(response).await;
    assert_eq!(body["session"]["variant"], "textbot-v1");
    assert_eq!(body["view"]["section"], "Overview");
}

#[tokio::test]
async fn test_create_session_with_malformed_json_is_400() {
    let response = send_json(&app(), "POST", "/api/sessions", "{").await;
    assert_json_error(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_select_without_section_field_is_400() {
    let app = app();
    let id = create_session(&app, "{}").await;
    let response = send_json(&app, "PUT", &format!("/api/sessions/{id}/selection"), "{}").await;
    let message = assert_json_error(response, StatusCode::BAD_REQUEST).await;
    assert!(message.contains("section"));
}

#[tokio::test]
async fn test_select_without_json_content_type_is_400() {
    let app = app();
    let id = create_session(&app, "{}").await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/sessions/{id}/selection"))
                .body(Body::from(r#"{"section":"Challenge"}"#))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_json_error(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_invalid_utf8_in_path_is_400() {
    let response = get(&app(), "/api/variants/textbot-v1/sections/%FF").await;
    assert_json_error(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_dashboard_rejects_repeated_query_field() {
    let response = get(&app(), "/?section=Overview&section=Challenge").await;
    let message = assert_json_error(response, StatusCode::BAD_REQUEST).await;
    assert!(message.contains("section"));
}

#[tokio::test]
async fn test_assets_under_published_names_are_served() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("mb_logo_white copy.png"), b"\x89PNG").expect("write logo");
    let app = app_with_assets(AssetCatalog::scan(Some(dir.path())));

    let html = body_text(get(&app, "/").await).await;
    assert!(html.contains("mb_logo_white%20copy.png"));

    let response = get(&app, "/assets/mb_logo_white%20copy.png").await;
    assert_eq!(response.status(), StatusCode::OK);
}
