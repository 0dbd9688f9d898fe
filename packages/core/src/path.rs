//! Dotted field paths used to locate projection failures.

use std::fmt;

/// Token every projection path starts from.
pub const ROOT: &str = "root";

/// Position of a field within the record tree being projected, e.g.
/// `root.Address.City`.
///
/// Paths only appear in errors; they never affect the projected mapping.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FieldPath {
    components: Vec<String>,
}

impl FieldPath {
    pub fn root() -> Self {
        FieldPath {
            components: vec![ROOT.to_string()],
        }
    }

    /// Path of a field directly beneath this one.
    pub fn child(&self, field: &str) -> Self {
        let mut components = self.components.clone();
        components.push(field.to_string());
        FieldPath { components }
    }

    /// Number of fields below the root (the root itself has depth 0).
    pub fn depth(&self) -> usize {
        self.components.len() - 1
    }

    /// Field names below the root.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.components[1..].iter().map(String::as_str)
    }

    /// The last component (`root` for the root path).
    pub fn last(&self) -> &str {
        self.components
            .last()
            .map(String::as_str)
            .unwrap_or(ROOT)
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        FieldPath::root()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}
