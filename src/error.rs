use thiserror::Error;
use yaml_rust2::scanner::ScanError;

pub type Result<T> = std::result::Result<T, WalkError>;

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid type conversion: expected {expected}, found {found}")]
    InvalidType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("list of keys does not match map keys")]
    KeyMismatch,

    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("index {index} out of range for sequence of length {len}")]
    InvalidRange { index: usize, len: usize },

    #[error("line {line}: unsupported node kind {kind}")]
    UnsupportedNodeKind { line: usize, kind: &'static str },

    #[error("line {line}: unsupported mapping key kind {kind}")]
    UnsupportedKey { line: usize, kind: &'static str },

    #[error("line {line}: mapping content is not a list of key-value pairs")]
    MalformedMapping { line: usize },

    #[error("line {line}: duplicate mapping key {key:?}")]
    DuplicateMappingKey { line: usize, key: String },

    #[error("conversion from type {found} failed")]
    NonStringScalar { found: &'static str },

    #[error("YAML error: {0}")]
    Parse(#[from] ScanError),
}
