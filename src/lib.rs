mod accessor;
pub mod decode;
pub mod encode;
pub mod error;
pub mod json;
pub mod node;
pub mod observer;
pub mod raw;
pub mod style;
pub mod walker;
pub mod yaml;

pub use decode::{DecodeOptions, Decoder, DuplicateKeys};
pub use encode::{EncodeOptions, Encoder};
pub use error::{Result, WalkError};
pub use node::{Key, Mapping, Node, Scalar, Value};
pub use observer::{NoopObserver, Observer, TracingObserver};
pub use raw::{Kind, RawNode};
pub use style::Style;
pub use walker::PathWalker;

/// Parses YAML text into a tree. An empty document yields a null node.
pub fn from_str(source: &str) -> Result<Node> {
    match yaml::parse(source)? {
        Some(raw) => Decoder::default().decode(&raw),
        None => Ok(Node::new()),
    }
}

/// Serializes a tree as block YAML.
pub fn to_string(node: &Node) -> Result<String> {
    let raw = Encoder::default().encode(node)?;
    Ok(yaml::emit(&raw))
}
