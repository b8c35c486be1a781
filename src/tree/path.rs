use std::fmt;

use crate::foundation::error::{ModelError, ModelResult};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// One typed navigation step inside a tree.
///
/// Paths are sequences of these steps instead of raw strings, so traversal
/// never re-parses text and field names containing dots cannot corrupt a
/// path once it exists as a value. The dot-delimited string form is only a
/// boundary encoding (see [`TreePath::parse`]).
pub enum Segment {
    /// Projection of a named field (`left`, `condition`, `indices`, …).
    Field(String),
    /// Projection of an array element by position.
    Index(usize),
}

impl Segment {
    /// Field segment.
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// True when this segment projects the given field name.
    pub fn is_field(&self, name: &str) -> bool {
        matches!(self, Self::Field(f) if f == name)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Address of one node inside a named root object.
///
/// A path starts at a root key (the name of the object being edited, e.g.
/// `constraint`) and descends through field and array-index steps. Paths are
/// plain values: they stay meaningful across copy-on-write edits of the tree
/// they point into, but are NOT stable across structural edits that remove
/// or reorder array elements. A dangling path simply stops resolving.
pub struct TreePath {
    root: String,
    segments: Vec<Segment>,
}

impl TreePath {
    /// Path addressing the root object itself.
    pub fn root(key: impl Into<String>) -> Self {
        Self {
            root: key.into(),
            segments: Vec::new(),
        }
    }

    /// Extend with a field step.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.segments.push(Segment::Field(name.into()));
        self
    }

    /// Extend with an array-index step.
    pub fn index(mut self, i: usize) -> Self {
        self.segments.push(Segment::Index(i));
        self
    }

    /// Root key this path is anchored at.
    pub fn root_key(&self) -> &str {
        &self.root
    }

    /// Steps below the root, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Path of the enclosing node, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            root: self.root.clone(),
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// True when `self`'s steps are a prefix of `other`'s under the same
    /// root key.
    pub fn starts_with(&self, other: &Self) -> bool {
        self.root == other.root
            && self.segments.len() >= other.segments.len()
            && self.segments[..other.segments.len()] == other.segments[..]
    }

    /// True when `self` is a strict ancestor of `other`.
    pub fn is_strict_ancestor_of(&self, other: &Self) -> bool {
        other.starts_with(self) && self.segments.len() < other.segments.len()
    }

    /// Parse the collaborator string form `"<root>.<segment>(.<segment>)*"`.
    ///
    /// All-digit segments become array-index steps. There is no escaping
    /// mechanism: a field name containing a dot cannot round-trip through
    /// this encoding (acknowledged limitation of the string boundary).
    pub fn parse(s: &str) -> ModelResult<Self> {
        let mut parts = s.split('.');
        let root = parts.next().unwrap_or_default();
        if root.is_empty() {
            return Err(ModelError::validation(
                "path must start with a non-empty root key",
            ));
        }
        let mut segments = Vec::new();
        for part in parts {
            if part.is_empty() {
                return Err(ModelError::validation(format!(
                    "path '{s}' contains an empty segment"
                )));
            }
            if part.bytes().all(|b| b.is_ascii_digit()) {
                let i = part
                    .parse::<usize>()
                    .map_err(|_| ModelError::validation(format!("index segment '{part}' overflows")))?;
                segments.push(Segment::Index(i));
            } else {
                segments.push(Segment::Field(part.to_string()));
            }
        }
        Ok(Self {
            root: root.to_string(),
            segments,
        })
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for seg in &self.segments {
            write!(f, ".{seg}")?;
        }
        Ok(())
    }
}

impl serde::Serialize for TreePath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for TreePath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
