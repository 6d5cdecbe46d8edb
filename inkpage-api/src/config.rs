use clap::Parser;
use inkpage::{FontCatalog, FontSource, NoteRenderer};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration, read from the command line or the environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "inkpage-api",
    about = "HTTP service rendering text as handwritten notes",
    version
)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "INKPAGE_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Directory holding the .ttf files of the font styles
    #[arg(long, env = "INKPAGE_FONT_DIR", default_value = "fonts")]
    pub font_dir: PathBuf,

    /// Also offer the built-in block face as font style "block"
    #[arg(long)]
    pub block_font: bool,
}

impl ServerConfig {
    pub fn catalog(&self) -> FontCatalog {
        let catalog = FontCatalog::with_font_dir(&self.font_dir);
        if self.block_font {
            catalog.register("block", FontSource::Block)
        } else {
            catalog
        }
    }

    pub fn renderer(&self) -> NoteRenderer {
        NoteRenderer::new(self.catalog())
    }

    /// Font styles whose file is not present on disk. Requests for these
    /// fail with an internal error until the file shows up.
    pub fn missing_fonts(&self) -> Vec<(String, PathBuf)> {
        let catalog = self.catalog();
        catalog
            .styles()
            .filter_map(|style| match catalog.resolve(style) {
                Ok(FontSource::File(path)) if !path.is_file() => {
                    Some((style.to_string(), path.clone()))
                }
                _ => None,
            })
            .collect()
    }
}
