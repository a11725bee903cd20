use std::iter::{empty, once};
use std::sync::Arc;

/// One segment of a location inside a JSON document, either an object
/// member name or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyOrIndex {
    Index(usize),
    Key(String),
}

impl KeyOrIndex {
    pub fn index(v: usize) -> Self {
        Self::Index(v)
    }

    pub fn property(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    pub fn to_join_string(&self) -> String {
        format!(".{}", self)
    }
}

impl core::fmt::Display for KeyOrIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyOrIndex::Index(v) => v.fmt(f),
            KeyOrIndex::Key(v) => v.fmt(f),
        }
    }
}

impl From<usize> for KeyOrIndex {
    fn from(v: usize) -> Self {
        Self::Index(v)
    }
}

impl From<&str> for KeyOrIndex {
    fn from(v: &str) -> Self {
        Self::Key(v.to_string())
    }
}

impl From<String> for KeyOrIndex {
    fn from(v: String) -> Self {
        Self::Key(v)
    }
}

/// An ordered path of [`KeyOrIndex`] segments identifying a location
/// inside a document, displayed in dotted form (`profile.tags.1`).
///
/// The empty path displays as the empty string and identifies the
/// document root.
#[derive(Debug, Clone)]
pub struct Keys {
    dotted: Arc<str>,
    keys: Arc<[KeyOrIndex]>,
}

impl Keys {
    pub fn new(keys: impl Iterator<Item = KeyOrIndex>) -> Self {
        let keys: Arc<[KeyOrIndex]> = keys.collect();
        let mut dotted = String::new();
        for (i, k) in keys.iter().enumerate() {
            if i == 0 {
                dotted.push_str(&k.to_string());
            } else {
                dotted.push_str(&k.to_join_string());
            }
        }
        let dotted: Arc<str> = Arc::from(dotted);
        Self { keys, dotted }
    }

    pub fn single(key: impl Into<KeyOrIndex>) -> Self {
        Self::new(once(key.into()))
    }

    pub fn join(&self, key: impl Into<KeyOrIndex>) -> Self {
        self.extend(once(key.into()))
    }

    pub fn extend<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<KeyOrIndex>,
    {
        Self::new(
            self.keys
                .iter()
                .cloned()
                .chain(keys.into_iter().map(Into::into)),
        )
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &KeyOrIndex> + DoubleEndedIterator {
        self.keys.iter()
    }

    pub fn dotted(&self) -> &str {
        &self.dotted
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self::new(empty())
    }
}

impl IntoIterator for Keys {
    type Item = KeyOrIndex;

    type IntoIter = std::vec::IntoIter<KeyOrIndex>;

    fn into_iter(self) -> Self::IntoIter {
        Vec::from(&*self.keys).into_iter()
    }
}

impl core::fmt::Display for Keys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.dotted().fmt(f)
    }
}

impl serde::Serialize for Keys {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.dotted())
    }
}

impl PartialEq for Keys {
    fn eq(&self, other: &Self) -> bool {
        self.dotted == other.dotted
    }
}

impl Eq for Keys {}

impl std::hash::Hash for Keys {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.dotted.hash(state);
    }
}
