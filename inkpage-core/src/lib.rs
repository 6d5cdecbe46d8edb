//! # inkpage
//!
//! Renders plain text onto ruled-paper raster pages so it looks like a
//! handwritten note.
//!
//! ## Features
//!
//! - **Ruled canvases**: white pages with light gray guide lines
//! - **Greedy word wrap**: words flow onto fixed-width lines, paragraphs are
//!   separated by a blank line, words are never split
//! - **Overflow detection**: text that does not fit on one page is rejected
//!   with [`NoteError::Overflow`] instead of being truncated
//! - **Pluggable fonts**: anything implementing [`Typeface`] can measure and
//!   draw; TrueType fonts are rasterized with `ab_glyph`
//! - **PNG output** through the `image` crate
//!
//! ## Quick Start
//!
//! ```rust
//! use inkpage::{FontCatalog, FontSource, NoteRenderer, RenderRequest, Result};
//!
//! # fn main() -> Result<()> {
//! // Real deployments point the catalog at a directory of .ttf files
//! let catalog = FontCatalog::with_font_dir("fonts").register("block", FontSource::Block);
//! let renderer = NoteRenderer::new(catalog);
//!
//! let request = RenderRequest::parse("A4", "blue", "block", "Dear diary,\nToday was fine.", renderer.catalog())?;
//! let png = renderer.render_png(&request)?;
//! assert!(png.starts_with(b"\x89PNG"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Lower-level pieces
//!
//! ```rust
//! use inkpage::{build_ruled_canvas, layout_text, FixedAdvanceFace, PenColor};
//!
//! let canvas = build_ruled_canvas(874, 1240, 70);
//! let face = FixedAdvanceFace::for_size(50.0);
//! let page = layout_text(canvas, PenColor::Red, &face, "Hello world")?;
//! assert_eq!(page.dimensions(), (874, 1240));
//! # Ok::<(), inkpage::NoteError>(())
//! ```
//!
//! ## Modules
//!
//! - [`graphics`] - Canvas, guide lines and pen colors
//! - [`text`] - Typefaces, font catalog and the layout engine
//! - [`page`] - Page sizes and layout geometry
//! - [`render`] - Request parsing and the end-to-end renderer

pub mod error;
pub mod graphics;
pub mod page;
pub mod render;
pub mod text;

pub use error::{NoteError, Result, SelectorKind};
pub use graphics::{build_ruled_canvas, Canvas, PenColor, RuleStyle, PAPER_WHITE, RULE_GRAY};
pub use image::Rgb;
pub use page::{LayoutSettings, PageSize};
pub use render::{NoteRenderer, RenderRequest};
pub use text::{
    layout_text, layout_text_with, split_paragraphs, split_words, FixedAdvanceFace, FontCatalog,
    FontSource, LaidOutLine, PageLayout, TextFlow, TrueTypeFace, Typeface, DEFAULT_FONT_FILES,
};
