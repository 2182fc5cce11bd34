use crate::error::{Result, WalkError};
use crate::node::{Mapping, Node, Scalar, Value};
use crate::observer::{NOOP, Observer};
use crate::raw::RawNode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// Reject scalars that are not strings instead of rendering them as text.
    pub strict_scalars: bool,
}

pub struct Encoder<'o> {
    opts: EncodeOptions,
    observer: &'o dyn Observer,
}

impl Default for Encoder<'_> {
    fn default() -> Self {
        Self::new(EncodeOptions::default())
    }
}

impl<'o> Encoder<'o> {
    pub fn new(opts: EncodeOptions) -> Self {
        Self {
            opts,
            observer: &NOOP,
        }
    }

    pub fn with_observer<'a>(self, observer: &'a dyn Observer) -> Encoder<'a> {
        Encoder {
            opts: self.opts,
            observer,
        }
    }

    pub fn encode(&self, node: &Node) -> Result<RawNode> {
        self.encode_node(node, 0)
    }

    fn encode_node(&self, node: &Node, depth: usize) -> Result<RawNode> {
        self.observer.node_encoded(node.value().type_name(), depth);

        match node.value() {
            Value::Mapping(m) => self.encode_map(m, node, depth),
            Value::Sequence(items) => {
                let content = items
                    .iter()
                    .map(|item| self.encode_node(item, depth + 1))
                    .collect::<Result<Vec<_>>>()?;
                Ok(RawNode::sequence(content, node.style()))
            }
            Value::Scalar(s) => self.encode_scalar(s, node),
        }
    }

    fn encode_map(&self, m: &Mapping, node: &Node, depth: usize) -> Result<RawNode> {
        if m.keys().len() != m.len() {
            return Err(WalkError::KeyMismatch);
        }

        let mut seen = HashSet::with_capacity(m.len());
        let mut content = Vec::with_capacity(m.len() * 2);
        for key in m.keys() {
            if !seen.insert(key.name.as_str()) {
                return Err(WalkError::KeyMismatch);
            }
            let child = m.get(&key.name).ok_or(WalkError::KeyMismatch)?;
            content.push(RawNode::scalar(key.name.clone(), key.style));
            content.push(self.encode_node(child, depth + 1)?);
        }

        Ok(RawNode::mapping(content, node.style()))
    }

    fn encode_scalar(&self, s: &Scalar, node: &Node) -> Result<RawNode> {
        let text = match s {
            Scalar::Str(text) => text.clone(),
            other if self.opts.strict_scalars => {
                return Err(WalkError::NonStringScalar {
                    found: other.type_name(),
                });
            }
            other => other.to_string(),
        };
        Ok(RawNode::scalar(text, node.style()))
    }
}
