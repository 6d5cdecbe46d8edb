mod canvas;
mod color;

pub use canvas::{build_ruled_canvas, Canvas, RuleStyle};
pub use color::{PenColor, PAPER_WHITE, RULE_GRAY};
