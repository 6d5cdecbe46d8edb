use crate::error::{NoteError, Result, SelectorKind};
use std::fmt;
use std::str::FromStr;

/// Supported paper sizes, in pixels at a fixed high-resolution scale.
///
/// Selectors are matched exactly (`"A4"`, `"A5"`, `"Letter"`).
///
/// # Example
///
/// ```rust
/// use inkpage::PageSize;
///
/// let page: PageSize = "A5".parse()?;
/// assert_eq!(page.dimensions(), (874, 1240));
/// # Ok::<(), inkpage::NoteError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageSize {
    A4,
    A5,
    Letter,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::A4, PageSize::A5, PageSize::Letter];

    /// Selector name as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::A5 => "A5",
            PageSize::Letter => "Letter",
        }
    }

    /// Returns `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            PageSize::A4 => (1240, 1754),
            PageSize::A5 => (874, 1240),
            PageSize::Letter => (1275, 1650),
        }
    }

    pub fn width(&self) -> u32 {
        self.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.dimensions().1
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageSize {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self> {
        PageSize::ALL
            .into_iter()
            .find(|page| page.name() == s)
            .ok_or_else(|| {
                NoteError::invalid_selector(
                    SelectorKind::PageSize,
                    s,
                    PageSize::ALL.iter().map(PageSize::name),
                )
            })
    }
}

/// Geometry used by the layout engine, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSettings {
    /// Horizontal margin on both sides of every text line
    pub margin: u32,
    /// Cursor position of the first line
    pub top: u32,
    /// Vertical distance between successive lines
    pub line_spacing: u32,
    /// Em size of the pen font
    pub font_size: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            margin: 100,
            top: 100,
            line_spacing: 70,
            font_size: 50.0,
        }
    }
}

impl LayoutSettings {
    /// Maximum pixel width of a single drawn line on a page `page_width` wide.
    pub fn usable_width(&self, page_width: u32) -> f32 {
        page_width.saturating_sub(2 * self.margin) as f32
    }
}
