use crate::error::{NoteError, Result, SelectorKind};
use image::Rgb;
use std::fmt;
use std::str::FromStr;

/// Paper background.
pub const PAPER_WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Color of the ruled guide lines.
pub const RULE_GRAY: Rgb<u8> = Rgb([200, 200, 200]);

/// Ink colors a note can be written in.
///
/// Each pen maps to a fixed RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PenColor {
    Black,
    Red,
    Blue,
    Green,
}

impl PenColor {
    pub const ALL: [PenColor; 4] = [
        PenColor::Black,
        PenColor::Red,
        PenColor::Blue,
        PenColor::Green,
    ];

    /// Selector name as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            PenColor::Black => "black",
            PenColor::Red => "red",
            PenColor::Blue => "blue",
            PenColor::Green => "green",
        }
    }

    /// Crimson, midnight blue and forest green read more like real ink
    /// than the pure primaries.
    pub fn rgb(&self) -> Rgb<u8> {
        match self {
            PenColor::Black => Rgb([0, 0, 0]),
            PenColor::Red => Rgb([220, 20, 60]),
            PenColor::Blue => Rgb([25, 25, 112]),
            PenColor::Green => Rgb([34, 139, 34]),
        }
    }
}

impl From<PenColor> for Rgb<u8> {
    fn from(pen: PenColor) -> Self {
        pen.rgb()
    }
}

impl fmt::Display for PenColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PenColor {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self> {
        PenColor::ALL
            .into_iter()
            .find(|pen| pen.name() == s)
            .ok_or_else(|| {
                NoteError::invalid_selector(
                    SelectorKind::PenColor,
                    s,
                    PenColor::ALL.iter().map(PenColor::name),
                )
            })
    }
}
