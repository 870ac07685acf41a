//! # API REST
//!
//! HTTP surface for Casebook.
//!
//! Handles:
//! - JSON endpoints for variants, sections and sessions with axum
//! - the HTML dashboard (Askama templates)
//! - OpenAPI/Swagger documentation
//! - static image assets and the radar chart SVG
//!
//! Handlers never read the environment. Everything they need is in [`AppState`], built once at
//! start-up by the server binary.

#![warn(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod extract;
pub mod pages;

use axum::{
    routing::{get, post, put},
    Router,
};
use casebook_core::{
    AssetCatalog, AssetId, CardLayout, ContentBlock, ContentRegistry, RenderedView, SelectOutcome,
    Selection, Session, SessionStore, Tone,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ContentRegistry>,
    pub sessions: Arc<SessionStore>,
    pub assets: Arc<AssetCatalog>,
}

impl AppState {
    pub fn new(registry: ContentRegistry, sessions: SessionStore, assets: AssetCatalog) -> Self {
        Self {
            registry: Arc::new(registry),
            sessions: Arc::new(sessions),
            assets: Arc::new(assets),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health,
        api::list_variants,
        api::list_sections,
        api::render_section,
        api::create_session,
        api::get_session,
        api::select_section,
        api::delete_session,
        api::radar_svg,
    ),
    components(schemas(
        api::HealthRes,
        api::VariantSummary,
        api::ListVariantsRes,
        api::ListSectionsRes,
        api::CreateSessionReq,
        api::SessionRes,
        api::SelectSectionReq,
        api::SelectionRes,
        error::ErrorRes,
        RenderedView,
        ContentBlock,
        CardLayout,
        Tone,
        AssetId,
        Session,
        Selection,
        SelectOutcome,
    ))
)]
pub struct ApiDoc;

/// Build the full router: dashboard, JSON API, charts, assets and API docs.
///
/// `/assets` is only mounted when the catalog has an asset directory.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(pages::dashboard))
        .route("/health", get(api::health))
        .route("/api/variants", get(api::list_variants))
        .route("/api/variants/:variant/sections", get(api::list_sections))
        .route(
            "/api/variants/:variant/sections/:name",
            get(api::render_section),
        )
        .route("/api/sessions", post(api::create_session))
        .route(
            "/api/sessions/:id",
            get(api::get_session).delete(api::delete_session),
        )
        .route("/api/sessions/:id/selection", put(api::select_section))
        .route("/charts/:variant/radar.svg", get(api::radar_svg))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(dir) = state.assets.dir() {
        router = router.nest_service("/assets", ServeDir::new(dir));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
