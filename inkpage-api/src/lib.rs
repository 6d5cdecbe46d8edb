//! # inkpage-api
//!
//! REST API server for the inkpage note renderer
//!

mod api;
mod config;

pub use api::{
    app, create_note, health_check, list_options, render_note, AppError, AppState,
    ErrorResponse, OptionsResponse, PageSizeInfo, RenderNoteRequest,
};
pub use config::ServerConfig;
