use serde::{Deserialize, Serialize};
use std::fmt;

/// Formatting hint carried by nodes and mapping keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    #[default]
    Plain,
    DoubleQuoted,
    SingleQuoted,
    Literal,
    Folded,
    Flow,
}

impl Style {
    pub fn is_quoted(self) -> bool {
        matches!(self, Style::DoubleQuoted | Style::SingleQuoted)
    }

    pub fn is_block_scalar(self) -> bool {
        matches!(self, Style::Literal | Style::Folded)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Style::Plain => "plain",
            Style::DoubleQuoted => "double-quoted",
            Style::SingleQuoted => "single-quoted",
            Style::Literal => "literal",
            Style::Folded => "folded",
            Style::Flow => "flow",
        };
        f.write_str(name)
    }
}
