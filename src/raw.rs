//! Generic parse-tree node exchanged with the YAML parser and emitter.
//!
//! A mapping's `content` alternates key and value nodes; a sequence's
//! `content` holds its items in order; a scalar carries its text in `value`.

use crate::style::Style;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Scalar,
    Mapping,
    Sequence,
    Alias,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Scalar => "scalar",
            Kind::Mapping => "mapping",
            Kind::Sequence => "sequence",
            Kind::Alias => "alias",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawNode {
    pub kind: Kind,
    pub style: Style,
    pub value: String,
    pub content: Vec<RawNode>,
    /// 1-based source line, 0 when the node was not parsed from text.
    pub line: usize,
}

impl RawNode {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            style: Style::Plain,
            value: String::new(),
            content: Vec::new(),
            line: 0,
        }
    }

    pub fn scalar(value: impl Into<String>, style: Style) -> Self {
        Self {
            value: value.into(),
            style,
            ..Self::new(Kind::Scalar)
        }
    }

    pub fn mapping(content: Vec<RawNode>, style: Style) -> Self {
        Self {
            content,
            style,
            ..Self::new(Kind::Mapping)
        }
    }

    pub fn sequence(content: Vec<RawNode>, style: Style) -> Self {
        Self {
            content,
            style,
            ..Self::new(Kind::Sequence)
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}
