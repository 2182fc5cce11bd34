use crate::style::Style;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Str(_) => "string",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Str(s) => f.write_str(s),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) if v.is_nan() => f.write_str(".nan"),
            Scalar::Float(v) if v.is_infinite() => {
                f.write_str(if v.is_sign_negative() { "-.inf" } else { ".inf" })
            }
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Bool(v) => write!(f, "{}", v),
        }
    }
}

/// Entry of a mapping's key index: the key name and the style it is
/// written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub name: String,
    pub style: Style,
}

impl Key {
    pub fn new(name: impl Into<String>, style: Style) -> Self {
        Self {
            name: name.into(),
            style,
        }
    }
}

/// Name-keyed children plus the ordered key index that drives
/// serialization order.
///
/// Every method except [`Mapping::from_parts`] keeps the index and the
/// entries in exact correspondence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: HashMap<String, Node>,
    keys: Vec<Key>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a mapping without checking that `keys` indexes exactly the
    /// names in `entries`. Inconsistent mappings fail to encode.
    pub fn from_parts(entries: HashMap<String, Node>, keys: Vec<Key>) -> Self {
        Self { entries, keys }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.entries.get_mut(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.keys.iter().any(|k| k.name == name) || self.entries.contains_key(name)
    }

    /// Inserts `node` under `name`. A new name is appended to the key index
    /// with `style`; an existing name keeps its position and style and the
    /// previous node is returned.
    pub fn insert(&mut self, name: impl Into<String>, node: Node, style: Style) -> Option<Node> {
        let name = name.into();
        if !self.keys.iter().any(|k| k.name == name) {
            self.keys.push(Key::new(name.clone(), style));
        }
        self.entries.insert(name, node)
    }

    /// Detaches `name` from both the key index and the entries.
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        let pos = self.keys.iter().position(|k| k.name == name)?;
        self.keys.remove(pos);
        self.entries.remove(name)
    }

    /// Children in key-index order. Index entries with no matching child
    /// are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Node)> {
        self.keys
            .iter()
            .filter_map(|k| self.entries.get(&k.name).map(|n| (k, n)))
    }

    /// True when the key index names every entry exactly once.
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.keys.len());
        self.keys.len() == self.entries.len()
            && self
                .keys
                .iter()
                .all(|k| seen.insert(k.name.as_str()) && self.entries.contains_key(&k.name))
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (name, node) in iter {
            mapping.insert(name, node, Style::Plain);
        }
        mapping
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Mapping(Mapping),
    Sequence(Vec<Node>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(s) => s.type_name(),
            Value::Mapping(_) => "mapping",
            Value::Sequence(_) => "sequence",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Scalar(Scalar::Null))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Scalar(Scalar::Null)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::Str(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::Str(s))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Scalar(Scalar::Int(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Scalar(Scalar::Int(v.into()))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(Scalar::Float(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Scalar(Scalar::Bool(v))
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl From<Vec<Node>> for Value {
    fn from(items: Vec<Node>) -> Self {
        Value::Sequence(items)
    }
}

/// One element of the document tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    value: Value,
    style: Style,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mapping() -> Self {
        Self::from(Mapping::new())
    }

    pub fn sequence() -> Self {
        Self::from(Vec::<Node>::new())
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Read-only view of the current value. Structural changes go through
    /// the path operations so the key index cannot drift from the entries.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Replaces the value wholesale. Key metadata of a replaced mapping is
    /// dropped along with it.
    pub fn update(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub(crate) fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }
}

macro_rules! node_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Self {
                        value: value.into(),
                        style: Style::Plain,
                    }
                }
            }
        )*
    };
}

node_from!(Value, Scalar, &str, String, i64, i32, f64, bool, Mapping, Vec<Node>);
