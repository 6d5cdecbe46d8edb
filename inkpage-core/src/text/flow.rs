use super::font::Typeface;
use crate::error::{NoteError, Result};
use crate::graphics::Canvas;
use crate::page::LayoutSettings;
use image::Rgb;

/// A single line of text placed on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaidOutLine {
    pub text: String,
    /// Top of the line box
    pub y: u32,
    /// Index of the source paragraph
    pub paragraph: usize,
}

/// Result of planning a page: where every line goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLayout {
    pub lines: Vec<LaidOutLine>,
    /// Cursor position after the last line (and paragraph break)
    pub cursor: u32,
}

impl PageLayout {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Every word on the page, in reading order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().flat_map(|line| split_words(&line.text))
    }
}

/// Paragraphs are separated by a single `\n` (or `\r\n`).
pub fn split_paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|paragraph| paragraph.strip_suffix('\r').unwrap_or(paragraph))
}

/// Words are separated by spaces; runs of spaces collapse.
pub fn split_words(paragraph: &str) -> impl Iterator<Item = &str> {
    paragraph.split(' ').filter(|word| !word.is_empty())
}

/// Vertical write position on the page.
struct Cursor {
    y: u32,
    spacing: u32,
    page_height: u32,
}

impl Cursor {
    fn advance(&mut self) {
        self.y = self.y.saturating_add(self.spacing);
    }

    /// A line drawn at the cursor must end above the bottom edge.
    fn ensure_room(&self, line: usize) -> Result<()> {
        if u64::from(self.y) + u64::from(self.spacing) > u64::from(self.page_height) {
            tracing::debug!(line, y = self.y, height = self.page_height, "text overflows page");
            return Err(NoteError::Overflow {
                line,
                y: self.y,
                max_y: self.page_height.saturating_sub(self.spacing),
            });
        }
        Ok(())
    }
}

/// Greedy word-wrapping layout onto ruled lines.
///
/// Text is split into paragraphs on newlines and into words on spaces. Words
/// are added to the current line while it still fits in the usable width;
/// the first word that does not fit starts a new line. Paragraphs are
/// separated by one blank line. Words are never split, so a word wider than
/// the usable width gets a line of its own and runs into the margin.
///
/// Planning and drawing are separate steps: [`TextFlow::plan`] fails with
/// [`NoteError::Overflow`] as soon as a line would start below
/// `page height - line spacing`, before any pixel has been touched.
///
/// # Example
///
/// ```rust
/// use inkpage::{FixedAdvanceFace, LayoutSettings, TextFlow};
///
/// let face = FixedAdvanceFace::new(25, 35);
/// let flow = TextFlow::new(&face, LayoutSettings::default());
/// let layout = flow.plan("Line one\nLine two", 1240, 1754)?;
///
/// assert_eq!(layout.lines[0].y, 100);
/// assert_eq!(layout.lines[1].y, 240);
/// # Ok::<(), inkpage::NoteError>(())
/// ```
pub struct TextFlow<'a> {
    face: &'a dyn Typeface,
    settings: LayoutSettings,
}

impl<'a> TextFlow<'a> {
    pub fn new(face: &'a dyn Typeface, settings: LayoutSettings) -> Self {
        Self { face, settings }
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Computes line breaks and positions for `text` on a page of the given
    /// size.
    pub fn plan(&self, text: &str, page_width: u32, page_height: u32) -> Result<PageLayout> {
        if self.settings.line_spacing == 0 {
            return Err(NoteError::InvalidLayout(
                "line spacing must be positive".to_string(),
            ));
        }

        let max_width = self.settings.usable_width(page_width);
        let mut cursor = Cursor {
            y: self.settings.top,
            spacing: self.settings.line_spacing,
            page_height,
        };
        let mut lines: Vec<LaidOutLine> = Vec::new();

        let paragraphs: Vec<&str> = split_paragraphs(text).collect();
        for (index, paragraph) in paragraphs.iter().enumerate() {
            let mut current = String::new();

            for word in split_words(paragraph) {
                if current.is_empty() {
                    current.push_str(word);
                    continue;
                }

                let candidate = format!("{current} {word}");
                if self.face.line_width(&candidate) <= max_width {
                    current = candidate;
                } else {
                    let finished = std::mem::replace(&mut current, word.to_string());
                    Self::emit(&mut lines, &mut cursor, finished, index)?;
                    cursor.ensure_room(lines.len() + 1)?;
                }
            }

            if !current.is_empty() {
                Self::emit(&mut lines, &mut cursor, current, index)?;
            }

            if index + 1 < paragraphs.len() {
                cursor.advance();
                cursor.ensure_room(lines.len() + 1)?;
            }
        }

        tracing::debug!(
            lines = lines.len(),
            paragraphs = paragraphs.len(),
            cursor = cursor.y,
            "planned page layout"
        );

        Ok(PageLayout {
            lines,
            cursor: cursor.y,
        })
    }

    fn emit(
        lines: &mut Vec<LaidOutLine>,
        cursor: &mut Cursor,
        text: String,
        paragraph: usize,
    ) -> Result<()> {
        cursor.ensure_room(lines.len() + 1)?;
        lines.push(LaidOutLine {
            text,
            y: cursor.y,
            paragraph,
        });
        cursor.advance();
        Ok(())
    }

    /// Draws a planned layout in `color`, each line starting at the left
    /// margin.
    pub fn render(&self, canvas: &mut Canvas, layout: &PageLayout, color: Rgb<u8>) {
        for line in &layout.lines {
            self.face
                .draw_line(canvas, self.settings.margin, line.y, &line.text, color);
        }
    }
}

/// Lays `text` out onto `canvas` with the default geometry.
///
/// Returns the canvas with the text drawn, or [`NoteError::Overflow`] if the
/// text does not fit on the page. The canvas is consumed either way, so no
/// partially written page can leak out.
pub fn layout_text(
    canvas: Canvas,
    pen: impl Into<Rgb<u8>>,
    face: &dyn Typeface,
    text: &str,
) -> Result<Canvas> {
    layout_text_with(canvas, pen, face, text, LayoutSettings::default())
}

/// [`layout_text`] with explicit geometry.
pub fn layout_text_with(
    mut canvas: Canvas,
    pen: impl Into<Rgb<u8>>,
    face: &dyn Typeface,
    text: &str,
    settings: LayoutSettings,
) -> Result<Canvas> {
    let flow = TextFlow::new(face, settings);
    let layout = flow.plan(text, canvas.width(), canvas.height())?;
    flow.render(&mut canvas, &layout, pen.into());
    Ok(canvas)
}
