use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    None,
    Text(String),
    File(PathBuf),
    List(Vec<Value>),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.trim().is_empty(),
            Self::File(p) => p.as_os_str().is_empty(),
            Self::List(v) => v.is_empty() || (v.len() == 1 && v[0].is_empty()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            Self::List(v) if v.len() == 1 => v[0].as_text(),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&Path> {
        match self {
            Self::File(p) => Some(p.as_path()),
            Self::List(v) if v.len() == 1 => v[0].as_file(),
            _ => None,
        }
    }

    /// Text form of a scalar, looking through a one-element list.
    pub fn to_text_scalar(&self) -> Option<String> {
        match self {
            Self::None => Some(String::new()),
            Self::Text(v) => Some(v.clone()),
            Self::File(p) => Some(p.display().to_string()),
            Self::List(v) if v.len() == 1 => v[0].to_text_scalar(),
            Self::List(_) => None,
        }
    }

    /// Wraps `self` into a one-element list.
    pub fn wrapped(self) -> Self {
        Self::List(vec![self])
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_none(),
            Self::Text(v) => serializer.serialize_str(v),
            Self::File(p) => serializer.serialize_str(&p.to_string_lossy()),
            Self::List(items) => items.serialize(serializer),
        }
    }
}
