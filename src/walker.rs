//! Dotted-path resolution and structural mutation.
//!
//! Paths are `.`-separated mapping keys (`"server.tls.cert"`). The empty
//! path addresses the node the walk starts from. Segments are taken
//! literally, so a key that itself contains `.` cannot be addressed.
//!
//! Every operation validates the whole request before touching the tree:
//! a call either succeeds or leaves the tree exactly as it was.

use crate::error::{Result, WalkError};
use crate::node::{Mapping, Node, Scalar, Value};
use crate::observer::{NOOP, Observer};
use crate::style::Style;

pub const SEPARATOR: char = '.';

pub fn split_path(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split(SEPARATOR).collect()
    }
}

fn invalid(expected: &'static str, found: &Value) -> WalkError {
    WalkError::InvalidType {
        expected,
        found: found.type_name(),
    }
}

fn not_found(parts: &[&str]) -> WalkError {
    WalkError::NotFound(parts.join("."))
}

#[derive(Clone, Copy)]
pub struct PathWalker<'o> {
    observer: &'o dyn Observer,
}

impl Default for PathWalker<'_> {
    fn default() -> Self {
        Self { observer: &NOOP }
    }
}

impl<'o> PathWalker<'o> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(observer: &'o dyn Observer) -> Self {
        Self { observer }
    }

    pub fn find<'n>(&self, root: &'n Node, parts: &[&str]) -> Result<&'n Node> {
        let mut node = root;
        for (depth, part) in parts.iter().enumerate() {
            self.observer.path_step(part, depth);
            let m = match node.value() {
                Value::Mapping(m) => m,
                other => return Err(invalid("mapping", other)),
            };
            node = m.get(part).ok_or_else(|| not_found(&parts[..=depth]))?;
        }
        Ok(node)
    }

    pub fn find_mut<'n>(&self, root: &'n mut Node, parts: &[&str]) -> Result<&'n mut Node> {
        let mut node = root;
        for (depth, part) in parts.iter().enumerate() {
            self.observer.path_step(part, depth);
            node = match node.value_mut() {
                Value::Mapping(m) => m.get_mut(part).ok_or_else(|| not_found(&parts[..=depth]))?,
                other => return Err(invalid("mapping", other)),
            };
        }
        Ok(node)
    }

    /// Resolves everything but the last segment and hands back the parent
    /// together with the last segment. The root has no parent, so an empty
    /// path is [`WalkError::KeyMismatch`].
    pub fn find_parent_mut<'n, 'p>(
        &self,
        root: &'n mut Node,
        parts: &[&'p str],
    ) -> Result<(&'n mut Node, &'p str)> {
        let (last, parent_parts) = parts.split_last().ok_or(WalkError::KeyMismatch)?;
        let parent = self.find_mut(root, parent_parts)?;
        Ok((parent, *last))
    }

    pub fn get<'n>(&self, root: &'n Node, path: &str) -> Result<&'n Node> {
        self.find(root, &split_path(path))
    }

    pub fn get_mut<'n>(&self, root: &'n mut Node, path: &str) -> Result<&'n mut Node> {
        self.find_mut(root, &split_path(path))
    }

    /// Like [`PathWalker::get`] but every failure collapses to `None`.
    pub fn get_value<'n>(&self, root: &'n Node, path: &str) -> Option<&'n Value> {
        self.get(root, path).ok().map(Node::value)
    }

    /// Replaces the value at `path`. Does nothing if `path` does not resolve.
    pub fn set_value(&self, root: &mut Node, path: &str, value: impl Into<Value>) {
        if let Ok(target) = self.get_mut(root, path) {
            target.update(value);
        }
    }

    /// Moves the value of `node` into the node at `path`. The target keeps
    /// its own style; the source's style is discarded.
    pub fn set(&self, root: &mut Node, path: &str, node: Node) -> Result<()> {
        let target = self.get_mut(root, path)?;
        target.update(node.into_value());
        Ok(())
    }

    /// Adds `node` under a new key. The last path segment names the key and
    /// the rest addresses the parent, which must be a mapping or null. A
    /// null parent becomes a mapping.
    pub fn append(&self, root: &mut Node, path: &str, node: Node, key_style: Style) -> Result<()> {
        let parts = split_path(path);
        let (parent, name) = self.find_parent_mut(root, &parts)?;

        match parent.value_mut() {
            Value::Mapping(m) => {
                if m.contains_key(name) {
                    return Err(WalkError::DuplicateKey(path.to_string()));
                }
                m.insert(name, node, key_style);
            }
            Value::Scalar(Scalar::Null) => {
                let mut m = Mapping::new();
                m.insert(name, node, key_style);
                parent.update(m);
            }
            other => return Err(invalid("mapping", other)),
        }
        Ok(())
    }

    /// Detaches the node at `path` from its parent mapping and returns it.
    pub fn delete(&self, root: &mut Node, path: &str) -> Result<Node> {
        let parts = split_path(path);
        let (parent, name) = self.find_parent_mut(root, &parts)?;

        match parent.value_mut() {
            Value::Mapping(m) => m.remove(name).ok_or_else(|| not_found(&parts)),
            other => Err(invalid("mapping", other)),
        }
    }

    /// Inserts `node` at `index` of the sequence at `path`, shifting later
    /// items right. `index` may equal the length to append.
    pub fn insert(&self, root: &mut Node, path: &str, index: usize, node: Node) -> Result<()> {
        let items = self.sequence_mut(root, path)?;
        if index > items.len() {
            return Err(WalkError::InvalidRange {
                index,
                len: items.len(),
            });
        }
        items.insert(index, node);
        Ok(())
    }

    /// Removes and returns the item at `index` of the sequence at `path`.
    pub fn remove(&self, root: &mut Node, path: &str, index: usize) -> Result<Node> {
        let items = self.sequence_mut(root, path)?;
        if index >= items.len() {
            return Err(WalkError::InvalidRange {
                index,
                len: items.len(),
            });
        }
        Ok(items.remove(index))
    }

    pub fn item<'n>(&self, root: &'n Node, path: &str, index: usize) -> Result<&'n Node> {
        let items = self.as_slice(root, path)?;
        items.get(index).ok_or(WalkError::InvalidRange {
            index,
            len: items.len(),
        })
    }

    /// Mutable access to one sequence item, for path operations relative to
    /// it.
    pub fn item_mut<'n>(
        &self,
        root: &'n mut Node,
        path: &str,
        index: usize,
    ) -> Result<&'n mut Node> {
        let items = self.sequence_mut(root, path)?;
        let len = items.len();
        items
            .get_mut(index)
            .ok_or(WalkError::InvalidRange { index, len })
    }

    fn sequence_mut<'n>(&self, root: &'n mut Node, path: &str) -> Result<&'n mut Vec<Node>> {
        match self.get_mut(root, path)?.value_mut() {
            Value::Sequence(items) => Ok(items),
            other => Err(invalid("sequence", other)),
        }
    }

    pub fn as_map<'n>(&self, root: &'n Node, path: &str) -> Result<&'n Mapping> {
        match self.get(root, path)?.value() {
            Value::Mapping(m) => Ok(m),
            other => Err(invalid("mapping", other)),
        }
    }

    pub fn as_slice<'n>(&self, root: &'n Node, path: &str) -> Result<&'n [Node]> {
        match self.get(root, path)?.value() {
            Value::Sequence(items) => Ok(items),
            other => Err(invalid("sequence", other)),
        }
    }

    pub fn as_str<'n>(&self, root: &'n Node, path: &str) -> Result<&'n str> {
        match self.get(root, path)?.value() {
            Value::Scalar(Scalar::Str(s)) => Ok(s),
            other => Err(invalid("string", other)),
        }
    }

    pub fn as_int(&self, root: &Node, path: &str) -> Result<i64> {
        match self.get(root, path)?.value() {
            Value::Scalar(Scalar::Int(v)) => Ok(*v),
            other => Err(invalid("int", other)),
        }
    }

    pub fn as_float(&self, root: &Node, path: &str) -> Result<f64> {
        match self.get(root, path)?.value() {
            Value::Scalar(Scalar::Float(v)) => Ok(*v),
            other => Err(invalid("float", other)),
        }
    }

    pub fn as_bool(&self, root: &Node, path: &str) -> Result<bool> {
        match self.get(root, path)?.value() {
            Value::Scalar(Scalar::Bool(v)) => Ok(*v),
            other => Err(invalid("bool", other)),
        }
    }
}
