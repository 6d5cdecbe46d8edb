use super::font::{FixedAdvanceFace, TrueTypeFace, Typeface};
use crate::error::{NoteError, Result, SelectorKind};
use std::path::{Path, PathBuf};

/// Font styles shipped with the service and the files they load from.
pub const DEFAULT_FONT_FILES: [(&str, &str); 3] = [
    ("cursive", "CedarvilleCursive-Regular.ttf"),
    ("normal", "Kalam-Regular.ttf"),
    ("sansita", "Sansita-Regular.ttf"),
];

/// Where the glyphs of a font style come from.
#[derive(Debug, Clone, PartialEq)]
pub enum FontSource {
    /// A TrueType / OpenType file, read on every load
    File(PathBuf),
    /// The built-in [`FixedAdvanceFace`], scaled to the requested size
    Block,
}

impl FontSource {
    /// Opens a typeface at `size` pixels per em.
    pub fn load(&self, size: f32) -> Result<Box<dyn Typeface>> {
        match self {
            FontSource::File(path) => Ok(Box::new(TrueTypeFace::open(path, size)?)),
            FontSource::Block => Ok(Box::new(FixedAdvanceFace::for_size(size))),
        }
    }
}

/// Immutable table mapping font style selectors to font sources.
///
/// Built once at startup and shared read-only; looking up an unknown style
/// fails with [`NoteError::InvalidSelector`].
///
/// # Example
///
/// ```rust
/// use inkpage::{FontCatalog, FontSource};
///
/// let catalog = FontCatalog::new().register("block", FontSource::Block);
/// let face = catalog.load("block", 50.0)?;
/// assert_eq!(face.line_width("ab"), 50.0);
/// assert!(catalog.load("gothic", 50.0).is_err());
/// # Ok::<(), inkpage::NoteError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    entries: Vec<(String, FontSource)>,
}

impl FontCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog with the default styles resolved under `dir`.
    ///
    /// Files are not touched until a style is loaded.
    pub fn with_font_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        DEFAULT_FONT_FILES
            .iter()
            .fold(Self::new(), |catalog, (style, file)| {
                catalog.register(*style, FontSource::File(dir.join(file)))
            })
    }

    /// Adds a style, replacing any existing source registered under the
    /// same name.
    pub fn register(mut self, style: impl Into<String>, source: FontSource) -> Self {
        let style = style.into();
        match self.entries.iter_mut().find(|(name, _)| *name == style) {
            Some(entry) => entry.1 = source,
            None => self.entries.push((style, source)),
        }
        self
    }

    /// Style names in registration order.
    pub fn styles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, style: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == style)
    }

    pub fn resolve(&self, style: &str) -> Result<&FontSource> {
        self.entries
            .iter()
            .find(|(name, _)| name == style)
            .map(|(_, source)| source)
            .ok_or_else(|| NoteError::invalid_selector(SelectorKind::FontStyle, style, self.styles()))
    }

    /// Resolves `style` and opens its typeface at `size`.
    pub fn load(&self, style: &str, size: f32) -> Result<Box<dyn Typeface>> {
        let source = self.resolve(style)?;
        tracing::debug!(style, ?source, size, "loading font");
        source.load(size)
    }
}
