use crate::error::{Result, WalkError};
use crate::node::{Mapping, Node, Scalar, Value};
use crate::observer::{NOOP, Observer};
use crate::raw::{Kind, RawNode};
use serde::{Deserialize, Serialize};

/// What to do when a mapping repeats a key name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeys {
    /// Fail with [`WalkError::DuplicateMappingKey`].
    #[default]
    Reject,
    /// Keep the first occurrence's position and style, take the last value.
    LastWins,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    pub duplicate_keys: DuplicateKeys,
}

pub struct Decoder<'o> {
    opts: DecodeOptions,
    observer: &'o dyn Observer,
}

impl Default for Decoder<'_> {
    fn default() -> Self {
        Self::new(DecodeOptions::default())
    }
}

impl<'o> Decoder<'o> {
    pub fn new(opts: DecodeOptions) -> Self {
        Self {
            opts,
            observer: &NOOP,
        }
    }

    pub fn with_observer<'a>(self, observer: &'a dyn Observer) -> Decoder<'a> {
        Decoder {
            opts: self.opts,
            observer,
        }
    }

    pub fn decode(&self, raw: &RawNode) -> Result<Node> {
        self.decode_node(raw, 0)
    }

    fn decode_node(&self, raw: &RawNode, depth: usize) -> Result<Node> {
        self.observer.node_decoded(raw.kind, raw.line, depth);

        let value = match raw.kind {
            Kind::Mapping => Value::Mapping(self.decode_map(raw, depth)?),
            Kind::Sequence => Value::Sequence(self.decode_seq(raw, depth)?),
            Kind::Scalar => Value::Scalar(Scalar::Str(raw.value.clone())),
            Kind::Alias => {
                return Err(WalkError::UnsupportedNodeKind {
                    line: raw.line,
                    kind: raw.kind.name(),
                });
            }
        };

        Ok(Node::from(value).with_style(raw.style))
    }

    fn decode_map(&self, raw: &RawNode, depth: usize) -> Result<Mapping> {
        if raw.content.len() % 2 != 0 {
            return Err(WalkError::MalformedMapping { line: raw.line });
        }

        let mut mapping = Mapping::new();
        for pair in raw.content.chunks_exact(2) {
            let (key, value) = (&pair[0], &pair[1]);
            if key.kind != Kind::Scalar {
                return Err(WalkError::UnsupportedKey {
                    line: key.line,
                    kind: key.kind.name(),
                });
            }

            let child = self.decode_node(value, depth + 1)?;
            self.observer.key_decoded(&key.value, depth);

            let previous = mapping.insert(key.value.clone(), child, key.style);
            if previous.is_some() && self.opts.duplicate_keys == DuplicateKeys::Reject {
                return Err(WalkError::DuplicateMappingKey {
                    line: key.line,
                    key: key.value.clone(),
                });
            }
        }

        Ok(mapping)
    }

    fn decode_seq(&self, raw: &RawNode, depth: usize) -> Result<Vec<Node>> {
        raw.content
            .iter()
            .map(|item| self.decode_node(item, depth + 1))
            .collect()
    }
}
