use std::fmt;
use thiserror::Error;

/// Which lookup table a selector was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    PageSize,
    PenColor,
    FontStyle,
}

impl SelectorKind {
    /// Human-readable name used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            SelectorKind::PageSize => "page size",
            SelectorKind::PenColor => "pen color",
            SelectorKind::FontStyle => "font style",
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Invalid {kind}: {value:?}. Choose from {choices}.")]
    InvalidSelector {
        kind: SelectorKind,
        value: String,
        choices: String,
    },

    #[error("Text exceeds page size (line {line} would start at y={y}, limit is {max_y})")]
    Overflow { line: usize, y: u32, max_y: u32 },

    #[error("Font error: {0}")]
    Font(String),

    #[error("Invalid layout settings: {0}")]
    InvalidLayout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl NoteError {
    pub(crate) fn invalid_selector<I, S>(kind: SelectorKind, value: &str, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let choices: Vec<String> = choices
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect();
        NoteError::InvalidSelector {
            kind,
            value: value.to_string(),
            choices: choices.join(", "),
        }
    }

    /// Returns true for failures caused by the request itself (unknown
    /// selectors, text that does not fit) as opposed to server-side faults.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NoteError::InvalidSelector { .. } | NoteError::Overflow { .. }
        )
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, NoteError::Overflow { .. })
    }
}

pub type Result<T> = std::result::Result<T, NoteError>;
