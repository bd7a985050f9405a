use serde::Serialize;

/// A field marker in a command argument string, e.g. `n/` for a name.
///
/// Equality and ordering follow the tag text. Prefixes are cheap `Copy`
/// values and are normally declared as `const` items (see
/// [`syntax`](super::syntax)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Prefix(&'static str);

impl Prefix {
    /// Create a prefix from its literal tag.
    ///
    /// Panics (at compile time for `const` prefixes) if `tag` is empty.
    pub const fn new(tag: &'static str) -> Self {
        assert!(!tag.is_empty(), "prefix tag must not be empty");
        Self(tag)
    }

    /// The literal tag text.
    pub const fn tag(&self) -> &'static str {
        self.0
    }

    /// Length of the tag in bytes.
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; tags are never empty.
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        self.0
    }
}
