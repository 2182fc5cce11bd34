//! YAML text adapter: builds a [`RawNode`] tree from `yaml-rust2` parser
//! events and writes a [`RawNode`] tree back out as block YAML.
//!
//! Only the first document of a stream is read. Comments, tags, anchors and
//! document markers are not kept. Collections written in flow syntax keep
//! [`Style::Flow`] and are emitted inline again.

use crate::error::Result;
use crate::raw::{Kind, RawNode};
use crate::style::Style;
use serde::{Deserialize, Serialize};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

struct TreeBuilder {
    source: Vec<char>,
    stack: Vec<RawNode>,
    root: Option<RawNode>,
}

impl TreeBuilder {
    fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            stack: Vec::new(),
            root: None,
        }
    }

    fn push(&mut self, node: RawNode) {
        match self.stack.last_mut() {
            Some(parent) => parent.content.push(node),
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
        }
    }

    fn at(&self, mark: &Marker, c: char) -> bool {
        self.source.get(mark.index()) == Some(&c)
    }

    // Start events carry no layout information; a flow collection's marker
    // sits on its opening bracket.
    fn collection_style(&self, mark: &Marker, open: char) -> Style {
        if self.at(mark, open) {
            Style::Flow
        } else {
            Style::Plain
        }
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        let line = mark.line();
        match ev {
            Event::Scalar(value, style, ..) => {
                let style = scalar_style(style);
                let value = if style == Style::Plain && value == "~" && !self.at(&mark, '~') {
                    String::new()
                } else {
                    value
                };
                self.push(RawNode::scalar(value, style).at_line(line));
            }
            Event::SequenceStart(..) => {
                let style = self.collection_style(&mark, '[');
                self.stack
                    .push(RawNode::sequence(Vec::new(), style).at_line(line));
            }
            Event::MappingStart(..) => {
                let style = self.collection_style(&mark, '{');
                self.stack
                    .push(RawNode::mapping(Vec::new(), style).at_line(line));
            }
            Event::SequenceEnd | Event::MappingEnd => {
                if let Some(node) = self.stack.pop() {
                    self.push(node);
                }
            }
            Event::Alias(..) => self.push(RawNode::new(Kind::Alias).at_line(line)),
            _ => {}
        }
    }
}

fn scalar_style(style: TScalarStyle) -> Style {
    match style {
        TScalarStyle::SingleQuoted => Style::SingleQuoted,
        TScalarStyle::DoubleQuoted => Style::DoubleQuoted,
        TScalarStyle::Literal => Style::Literal,
        TScalarStyle::Folded => Style::Folded,
        _ => Style::Plain,
    }
}

/// Parses the first document of `source`. An empty stream yields `None`.
pub fn parse(source: &str) -> Result<Option<RawNode>> {
    let mut builder = TreeBuilder::new(source);
    let mut parser = Parser::new(source.chars());
    parser.load(&mut builder, false)?;
    Ok(builder.root)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitOptions {
    /// Spaces per nesting level for mappings and block scalar bodies.
    pub indent: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

pub fn emit(raw: &RawNode) -> String {
    Emitter::new(EmitOptions::default()).emit(raw)
}

// Width of "- "; items nested in a sequence must line up behind it.
const ITEM_OFFSET: usize = 2;

pub struct Emitter {
    opts: EmitOptions,
}

impl Emitter {
    pub fn new(opts: EmitOptions) -> Self {
        let indent = opts.indent.max(1);
        Self {
            opts: EmitOptions { indent },
        }
    }

    pub fn emit(&self, raw: &RawNode) -> String {
        let mut out = String::new();
        if is_block_collection(raw) {
            self.write_block(raw, 0, &mut out);
        } else {
            self.write_inline(raw, 0, &mut out);
            out.push('\n');
        }
        out
    }

    fn write_block(&self, raw: &RawNode, indent: usize, out: &mut String) {
        match raw.kind {
            Kind::Mapping => {
                for pair in raw.content.chunks(2) {
                    pad(out, indent);
                    write_scalar(&pair[0].value, pair[0].style, Context::Key, out);
                    out.push(':');
                    match pair.get(1) {
                        Some(value) if is_empty_plain(value) => out.push('\n'),
                        Some(value) if is_block_collection(value) => {
                            out.push('\n');
                            self.write_block(value, indent + self.opts.indent, out);
                        }
                        Some(value) => {
                            out.push(' ');
                            self.write_inline(value, indent, out);
                            out.push('\n');
                        }
                        None => out.push('\n'),
                    }
                }
            }
            Kind::Sequence => {
                for item in &raw.content {
                    pad(out, indent);
                    if is_empty_plain(item) {
                        out.push_str("-\n");
                        continue;
                    }
                    out.push_str("- ");
                    if is_block_collection(item) {
                        let mut nested = String::new();
                        self.write_block(item, indent + ITEM_OFFSET, &mut nested);
                        out.push_str(&nested[indent + ITEM_OFFSET..]);
                    } else {
                        self.write_inline(item, indent, out);
                        out.push('\n');
                    }
                }
            }
            _ => {
                pad(out, indent);
                self.write_inline(raw, indent, out);
                out.push('\n');
            }
        }
    }

    /// Writes a scalar, flow collection or empty collection starting at the
    /// current position. `indent` is the indentation of the owning line.
    fn write_inline(&self, raw: &RawNode, indent: usize, out: &mut String) {
        match raw.kind {
            Kind::Mapping | Kind::Sequence => write_flow(raw, out),
            Kind::Scalar | Kind::Alias => {
                if raw.style.is_block_scalar() && block_scalar_ok(&raw.value, raw.style) {
                    self.write_block_scalar(&raw.value, raw.style, indent, out);
                } else {
                    write_scalar(&raw.value, raw.style, Context::Block, out);
                }
            }
        }
    }

    fn write_block_scalar(&self, text: &str, style: Style, indent: usize, out: &mut String) {
        let body = text.trim_end_matches('\n');
        let trailing = text.len() - body.len();

        out.push(if style == Style::Folded { '>' } else { '|' });
        match trailing {
            0 => out.push('-'),
            1 => {}
            _ => out.push('+'),
        }
        out.push('\n');

        let content_indent = indent + self.opts.indent;
        let write_line = |out: &mut String, line: &str| {
            if !line.is_empty() {
                pad(out, content_indent);
                out.push_str(line);
            }
            out.push('\n');
        };

        let mut lines = body.split('\n');
        if style == Style::Folded {
            if let Some(first) = lines.next() {
                write_line(out, first);
            }
            for line in lines {
                out.push('\n');
                if !line.is_empty() {
                    write_line(out, line);
                }
            }
        } else {
            for line in lines {
                write_line(out, line);
            }
        }

        for _ in 1..trailing {
            out.push('\n');
        }
    }
}

fn is_block_collection(raw: &RawNode) -> bool {
    matches!(raw.kind, Kind::Mapping | Kind::Sequence)
        && raw.style != Style::Flow
        && !raw.content.is_empty()
}

// An empty value written with nothing after the indicator reads back as "".
fn is_empty_plain(raw: &RawNode) -> bool {
    raw.kind == Kind::Scalar && raw.style == Style::Plain && raw.value.is_empty()
}

fn block_scalar_ok(text: &str, style: Style) -> bool {
    let body = text.trim_end_matches('\n');
    !body.is_empty()
        && !body.contains('\r')
        && !body
            .split('\n')
            .any(|line| line.starts_with(' ') || line.starts_with('\t'))
        && !(style == Style::Folded && body.starts_with('\n'))
}

fn write_flow(raw: &RawNode, out: &mut String) {
    match raw.kind {
        Kind::Mapping => {
            out.push('{');
            for (i, pair) in raw.content.chunks(2).enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_scalar(&pair[0].value, pair[0].style, Context::Flow, out);
                out.push_str(": ");
                if let Some(value) = pair.get(1) {
                    write_flow(value, out);
                }
            }
            out.push('}');
        }
        Kind::Sequence => {
            out.push('[');
            for (i, item) in raw.content.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_flow(item, out);
            }
            out.push(']');
        }
        Kind::Scalar | Kind::Alias => write_scalar(&raw.value, raw.style, Context::Flow, out),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Block,
    Key,
    Flow,
}

fn write_scalar(text: &str, style: Style, ctx: Context, out: &mut String) {
    match style {
        Style::SingleQuoted if !text.contains(['\n', '\r']) => {
            out.push('\'');
            out.push_str(&text.replace('\'', "''"));
            out.push('\'');
        }
        Style::Plain | Style::Flow if plain_ok(text, ctx) => out.push_str(text),
        _ => write_double_quoted(text, out),
    }
}

fn write_double_quoted(text: &str, out: &mut String) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn plain_ok(text: &str, ctx: Context) -> bool {
    let Some(first) = text.chars().next() else {
        return false;
    };
    if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
        return false;
    }
    if text.chars().any(char::is_control) {
        return false;
    }
    if "[]{},#&*!|>'\"%@`".contains(first) {
        return false;
    }
    if matches!(first, '-' | '?' | ':') {
        let second = text.chars().nth(1);
        if second.is_none_or(char::is_whitespace) {
            return false;
        }
    }
    if text.starts_with("---") || text.starts_with("...") {
        return false;
    }
    if text.contains(": ") || text.contains(" #") || text.ends_with(':') {
        return false;
    }
    if ctx == Context::Flow && text.contains([',', '[', ']', '{', '}']) {
        return false;
    }
    true
}

fn pad(out: &mut String, n: usize) {
    out.extend(std::iter::repeat_n(' ', n));
}
