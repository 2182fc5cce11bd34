//! Path operations and typed reads directly on [`Node`], using a
//! [`PathWalker`] with no observer.

use crate::error::Result;
use crate::node::{Mapping, Node, Value};
use crate::style::Style;
use crate::walker::PathWalker;

impl Node {
    pub fn get(&self, path: &str) -> Result<&Node> {
        PathWalker::new().get(self, path)
    }

    pub fn get_mut(&mut self, path: &str) -> Result<&mut Node> {
        PathWalker::new().get_mut(self, path)
    }

    pub fn get_value(&self, path: &str) -> Option<&Value> {
        PathWalker::new().get_value(self, path)
    }

    pub fn set_value(&mut self, path: &str, value: impl Into<Value>) {
        PathWalker::new().set_value(self, path, value)
    }

    pub fn set(&mut self, path: &str, node: Node) -> Result<()> {
        PathWalker::new().set(self, path, node)
    }

    /// Appends under a plain-styled key.
    pub fn append(&mut self, path: &str, node: Node) -> Result<()> {
        PathWalker::new().append(self, path, node, Style::Plain)
    }

    pub fn append_with_style(&mut self, path: &str, node: Node, key_style: Style) -> Result<()> {
        PathWalker::new().append(self, path, node, key_style)
    }

    pub fn delete(&mut self, path: &str) -> Result<Node> {
        PathWalker::new().delete(self, path)
    }

    pub fn insert(&mut self, path: &str, index: usize, node: Node) -> Result<()> {
        PathWalker::new().insert(self, path, index, node)
    }

    pub fn remove(&mut self, path: &str, index: usize) -> Result<Node> {
        PathWalker::new().remove(self, path, index)
    }

    pub fn item(&self, path: &str, index: usize) -> Result<&Node> {
        PathWalker::new().item(self, path, index)
    }

    pub fn item_mut(&mut self, path: &str, index: usize) -> Result<&mut Node> {
        PathWalker::new().item_mut(self, path, index)
    }

    pub fn as_map(&self, path: &str) -> Result<&Mapping> {
        PathWalker::new().as_map(self, path)
    }

    pub fn as_slice(&self, path: &str) -> Result<&[Node]> {
        PathWalker::new().as_slice(self, path)
    }

    pub fn as_str(&self, path: &str) -> Result<&str> {
        PathWalker::new().as_str(self, path)
    }

    pub fn as_int(&self, path: &str) -> Result<i64> {
        PathWalker::new().as_int(self, path)
    }

    pub fn as_float(&self, path: &str) -> Result<f64> {
        PathWalker::new().as_float(self, path)
    }

    pub fn as_bool(&self, path: &str) -> Result<bool> {
        PathWalker::new().as_bool(self, path)
    }
}
