use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use inkpage::{NoteError, NoteRenderer, PageSize, PenColor, RenderRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Prefix of the text segment in the `/create/...` route
const PROMPT_PREFIX: &str = "prompt=";

/// Request payload for the JSON render endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RenderNoteRequest {
    /// Page size selector (`A4`, `A5`, `Letter`)
    pub page_size: String,
    /// Pen color selector (`black`, `red`, `blue`, `green`)
    pub pen_color: String,
    /// Font style selector, one of the catalog's styles
    pub font_style: String,
    /// Note text; `\n` separates paragraphs
    pub text: String,
}

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message describing what went wrong
    pub error: String,
}

/// One supported page size
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PageSizeInfo {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// Selectors accepted by the render endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub page_sizes: Vec<PageSizeInfo>,
    pub pen_colors: Vec<String>,
    pub font_styles: Vec<String>,
}

/// Application-specific error types for the API
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Rendering errors: bad selectors, overflow, font or encoding failures
    #[error(transparent)]
    Note(#[from] NoteError),
    /// Body that is not valid JSON or misses a field
    #[error("Invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
    /// Malformed route
    #[error("{0}")]
    NotFound(String),
    /// The blocking render task panicked or was cancelled
    #[error("Render task failed: {0}")]
    Task(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Note(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(rejection) => rejection.status(),
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Note(_) | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::info!(error = %self, %status, "request rejected");
        }

        let error_response = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    renderer: Arc<NoteRenderer>,
}

impl AppState {
    pub fn new(renderer: NoteRenderer) -> Self {
        Self {
            renderer: Arc::new(renderer),
        }
    }
}

/// Build the application router with all routes configured
pub fn app(renderer: NoteRenderer) -> Router {
    Router::new()
        // Path-style endpoint
        .route(
            "/create/{page_size}/{pen_color}/{font_style}/{prompt}",
            get(create_note),
        )
        // JSON endpoints
        .route("/api/render", post(render_note))
        .route("/api/options", get(list_options))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(renderer))
}

/// Turns the two-character `\n` escape into a real line break.
fn expand_line_breaks(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Render a note from path parameters:
/// `GET /create/{page_size}/{pen_color}/{font_style}/prompt={text}`
pub async fn create_note(
    State(state): State<AppState>,
    Path((page_size, pen_color, font_style, prompt)): Path<(String, String, String, String)>,
) -> Result<Response, AppError> {
    let text = prompt.strip_prefix(PROMPT_PREFIX).ok_or_else(|| {
        AppError::NotFound(format!(
            "Expected the last path segment to start with {PROMPT_PREFIX:?}"
        ))
    })?;

    let request = RenderRequest::parse(
        &page_size,
        &pen_color,
        &font_style,
        expand_line_breaks(text),
        state.renderer.catalog(),
    )?;

    render_png(state, request).await
}

/// Render a note from a JSON body
pub async fn render_note(
    State(state): State<AppState>,
    payload: Result<Json<RenderNoteRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let request = RenderRequest::parse(
        &payload.page_size,
        &payload.pen_color,
        &payload.font_style,
        payload.text,
        state.renderer.catalog(),
    )?;

    render_png(state, request).await
}

async fn render_png(state: AppState, request: RenderRequest) -> Result<Response, AppError> {
    tracing::debug!(
        page = %request.page,
        pen = %request.pen,
        font = %request.font_style,
        chars = request.text.chars().count(),
        "rendering note"
    );

    let renderer = Arc::clone(&state.renderer);
    let png = tokio::task::spawn_blocking(move || renderer.render_png(&request))
        .await
        .map_err(|e| AppError::Task(e.to_string()))??;

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], png).into_response())
}

/// List the supported page sizes, pen colors and font styles
pub async fn list_options(State(state): State<AppState>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        page_sizes: PageSize::ALL
            .iter()
            .map(|page| PageSizeInfo {
                name: page.name().to_string(),
                width: page.width(),
                height: page.height(),
            })
            .collect(),
        pen_colors: PenColor::ALL
            .iter()
            .map(|pen| pen.name().to_string())
            .collect(),
        font_styles: state
            .renderer
            .catalog()
            .styles()
            .map(str::to_string)
            .collect(),
    })
}

/// Health check endpoint for monitoring and load balancing
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "inkpage API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
