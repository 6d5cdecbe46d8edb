use crate::error::Result;
use crate::graphics::{Canvas, PenColor, RuleStyle};
use crate::page::{LayoutSettings, PageSize};
use crate::text::{FontCatalog, TextFlow};

/// Everything needed to render one note.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub page: PageSize,
    pub pen: PenColor,
    pub font_style: String,
    pub text: String,
}

impl RenderRequest {
    pub fn new(
        page: PageSize,
        pen: PenColor,
        font_style: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            page,
            pen,
            font_style: font_style.into(),
            text: text.into(),
        }
    }

    /// Resolves raw selectors, checking page size, pen color and font
    /// style in that order. Fails with the first unknown selector before
    /// any rendering work happens.
    pub fn parse(
        page: &str,
        pen: &str,
        font_style: &str,
        text: impl Into<String>,
        catalog: &FontCatalog,
    ) -> Result<Self> {
        let page = page.parse::<PageSize>()?;
        let pen = pen.parse::<PenColor>()?;
        catalog.resolve(font_style)?;
        Ok(Self::new(page, pen, font_style, text))
    }
}

/// Turns [`RenderRequest`]s into finished pages.
///
/// Holds the font catalog and the page geometry; it has no mutable state,
/// so one renderer can serve any number of requests.
///
/// # Example
///
/// ```rust
/// use inkpage::{FontCatalog, FontSource, NoteRenderer, PageSize, PenColor, RenderRequest};
///
/// let catalog = FontCatalog::new().register("block", FontSource::Block);
/// let renderer = NoteRenderer::new(catalog);
/// let request = RenderRequest::new(PageSize::A5, PenColor::Blue, "block", "Hello world");
///
/// let page = renderer.render(&request)?;
/// assert_eq!(page.dimensions(), (874, 1240));
/// # Ok::<(), inkpage::NoteError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NoteRenderer {
    catalog: FontCatalog,
    settings: LayoutSettings,
    rules: Option<RuleStyle>,
}

impl NoteRenderer {
    pub fn new(catalog: FontCatalog) -> Self {
        Self {
            catalog,
            settings: LayoutSettings::default(),
            rules: None,
        }
    }

    pub fn with_settings(mut self, settings: LayoutSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the guide lines. Without this the rules follow the layout
    /// settings, one line per text line.
    pub fn with_rule_style(mut self, rules: RuleStyle) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn rule_style(&self) -> RuleStyle {
        self.rules
            .unwrap_or_else(|| RuleStyle::aligned_with(&self.settings))
    }

    /// Renders a note onto a freshly ruled page.
    pub fn render(&self, request: &RenderRequest) -> Result<Canvas> {
        let face = self
            .catalog
            .load(&request.font_style, self.settings.font_size)?;
        let (width, height) = request.page.dimensions();

        let flow = TextFlow::new(face.as_ref(), self.settings);
        let layout = flow.plan(&request.text, width, height)?;

        let mut canvas = Canvas::ruled(width, height, &self.rule_style());
        flow.render(&mut canvas, &layout, request.pen.rgb());

        tracing::debug!(
            page = %request.page,
            pen = %request.pen,
            font = %request.font_style,
            lines = layout.line_count(),
            "rendered note"
        );
        Ok(canvas)
    }

    /// Renders a note and encodes it as PNG.
    pub fn render_png(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        self.render(request)?.encode_png()
    }
}
