mod catalog;
mod flow;
mod font;

pub use catalog::{FontCatalog, FontSource, DEFAULT_FONT_FILES};
pub use flow::{
    layout_text, layout_text_with, split_paragraphs, split_words, LaidOutLine, PageLayout,
    TextFlow,
};
pub use font::{FixedAdvanceFace, TrueTypeFace, Typeface};
