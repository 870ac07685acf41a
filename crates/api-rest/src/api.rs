//! JSON endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use casebook_core::{Navigator, RenderedView, SelectOutcome, Session};
use casebook_present::{axis_heading, RadarChart};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, ErrorRes};
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;

/// Pixel width of the standalone radar chart.
const RADAR_SIZE: u32 = 480;

#[derive(Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct VariantSummary {
    pub id: String,
    pub title: String,
    /// Whether this variant is served when a caller does not name one.
    pub default: bool,
}

#[derive(Serialize, ToSchema)]
pub struct ListVariantsRes {
    pub variants: Vec<VariantSummary>,
}

#[derive(Serialize, ToSchema)]
pub struct ListSectionsRes {
    pub variant: String,
    /// Section names in menu order.
    pub sections: Vec<String>,
}

#[derive(Default, Deserialize, ToSchema)]
pub struct CreateSessionReq {
    /// Variant to navigate; the server default when omitted.
    #[serde(default)]
    pub variant: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SessionRes {
    pub session: Session,
    pub view: RenderedView,
}

#[derive(Deserialize, ToSchema)]
pub struct SelectSectionReq {
    pub section: String,
}

#[derive(Serialize, ToSchema)]
pub struct SelectionRes {
    pub session: Session,
    pub outcome: SelectOutcome,
    pub view: RenderedView,
}

fn parse_session_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::BadRequest(format!("invalid session id {id:?}")))
}

/// An empty body asks for the default variant.
fn create_session_req(body: &[u8]) -> Result<CreateSessionReq, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateSessionReq::default());
    }
    let Json(req) = Json::<CreateSessionReq>::from_bytes(body)?;
    Ok(req)
}

fn session_view(state: &AppState, session: &Session) -> Result<RenderedView, ApiError> {
    let navigator = state.registry.get(&session.variant)?;
    Ok(navigator.render_selection(&session.selection))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Casebook is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/variants",
    responses(
        (status = 200, description = "All content variants", body = ListVariantsRes)
    )
)]
/// List the content variants this server can render
#[axum::debug_handler]
pub async fn list_variants(State(state): State<AppState>) -> Json<ListVariantsRes> {
    let default = state.registry.default_navigator().variant_id();
    let variants = state
        .registry
        .navigators()
        .map(|nav| VariantSummary {
            id: nav.variant_id().to_owned(),
            title: nav.title().to_owned(),
            default: nav.variant_id() == default,
        })
        .collect();
    Json(ListVariantsRes { variants })
}

#[utoipa::path(
    get,
    path = "/api/variants/{variant}/sections",
    params(("variant" = String, Path, description = "Content variant id")),
    responses(
        (status = 200, description = "Section names in menu order", body = ListSectionsRes),
        (status = 404, description = "Unknown variant", body = ErrorRes)
    )
)]
/// List the sections of one variant in menu order
#[axum::debug_handler]
pub async fn list_sections(
    State(state): State<AppState>,
    ApiPath(variant): ApiPath<String>,
) -> Result<Json<ListSectionsRes>, ApiError> {
    let navigator = state.registry.get(&variant)?;
    Ok(Json(ListSectionsRes {
        variant: navigator.variant_id().to_owned(),
        sections: navigator
            .section_names()
            .into_iter()
            .map(str::to_owned)
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/variants/{variant}/sections/{name}",
    params(
        ("variant" = String, Path, description = "Content variant id"),
        ("name" = String, Path, description = "Exact section name, case-sensitive")
    ),
    responses(
        (status = 200, description = "Rendered section", body = RenderedView),
        (status = 404, description = "Unknown variant or section", body = ErrorRes)
    )
)]
/// Render one section
///
/// This endpoint is strict: a name outside the variant's section set is a `404`, not a
/// fallback to the default section.
#[axum::debug_handler]
pub async fn render_section(
    State(state): State<AppState>,
    ApiPath((variant, name)): ApiPath<(String, String)>,
) -> Result<Json<RenderedView>, ApiError> {
    let navigator = state.registry.get(&variant)?;
    Ok(Json(navigator.render(&name)?))
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body(content = CreateSessionReq, description = "Optional; an empty body uses the default variant"),
    responses(
        (status = 201, description = "Session created on the default section", body = SessionRes),
        (status = 400, description = "Unknown variant or malformed body", body = ErrorRes)
    )
)]
/// Start a navigation session
#[axum::debug_handler]
pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionRes>), ApiError> {
    let req = create_session_req(&body)?;
    let session = state
        .sessions
        .create(&state.registry, req.variant.as_deref())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let view = session_view(&state, &session)?;
    tracing::info!("session {} started on {}", session.id, session.variant);
    Ok((StatusCode::CREATED, Json(SessionRes { session, view })))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session state and its current view", body = SessionRes),
        (status = 400, description = "Malformed session id", body = ErrorRes),
        (status = 404, description = "Session not found", body = ErrorRes)
    )
)]
/// Fetch a session and render its current selection
#[axum::debug_handler]
pub async fn get_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<SessionRes>, ApiError> {
    let session = state.sessions.get(parse_session_id(&id)?)?;
    let view = session_view(&state, &session)?;
    Ok(Json(SessionRes { session, view }))
}

#[utoipa::path(
    put,
    path = "/api/sessions/{id}/selection",
    params(("id" = String, Path, description = "Session id")),
    request_body = SelectSectionReq,
    responses(
        (status = 200, description = "Selection applied; `outcome.rejected` names an unknown section that fell back to the default", body = SelectionRes),
        (status = 400, description = "Malformed session id or body", body = ErrorRes),
        (status = 404, description = "Session not found", body = ErrorRes)
    )
)]
/// Change the selected section of a session
///
/// Unknown section names select the variant's default section. The response reports the
/// rejected name so the client can tell the user.
#[axum::debug_handler]
pub async fn select_section(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<SelectSectionReq>,
) -> Result<Json<SelectionRes>, ApiError> {
    let id = parse_session_id(&id)?;
    let (session, outcome) = state.sessions.select(id, &state.registry, &req.section)?;
    let view = session_view(&state, &session)?;
    Ok(Json(SelectionRes {
        session,
        outcome,
        view,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session removed"),
        (status = 400, description = "Malformed session id", body = ErrorRes),
        (status = 404, description = "Session not found", body = ErrorRes)
    )
)]
/// End a session
#[axum::debug_handler]
pub async fn delete_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    state.sessions.remove(parse_session_id(&id)?)?;
    Ok(StatusCode::NO_CONTENT)
}

/// The first section of `navigator` with enough challenge axes to draw a chart.
fn radar_chart(navigator: &Navigator) -> Option<RadarChart> {
    navigator.sections().iter().find_map(|section| {
        RadarChart::from_blocks(axis_heading(section.blocks()), section.blocks())
    })
}

#[utoipa::path(
    get,
    path = "/charts/{variant}/radar.svg",
    params(("variant" = String, Path, description = "Content variant id")),
    responses(
        (status = 200, description = "Challenge complexity radar chart", content_type = "image/svg+xml", body = String),
        (status = 404, description = "Unknown variant or no challenge axes", body = ErrorRes)
    )
)]
/// Challenge complexity radar chart as SVG
#[axum::debug_handler]
pub async fn radar_svg(
    State(state): State<AppState>,
    ApiPath(variant): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let navigator = state.registry.get(&variant)?;
    let chart = radar_chart(navigator).ok_or_else(|| {
        ApiError::NotFound(format!("variant {variant:?} has no challenge axes to chart"))
    })?;
    Ok((
        [(header::CONTENT_TYPE, "image/svg+xml")],
        chart.to_svg(RADAR_SIZE),
    ))
}
