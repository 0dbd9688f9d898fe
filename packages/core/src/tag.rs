//! Annotation parsing.
//!
//! An annotation is a comma-separated string. The first segment is the destination
//! key; the rest are option flags. No option currently changes how a field is
//! projected, but they are parsed and kept so callers can inspect them.

use std::fmt;

/// A parsed field annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagSpec {
    /// Destination key in the output mapping.
    pub name: String,
    /// Option segments after the name, in order.
    pub options: Vec<String>,
}

impl TagSpec {
    /// Parse an annotation value.
    ///
    /// Returns `None` for an empty annotation, which marks the field as untagged.
    ///
    /// ```rust
    /// use tagmap_core::TagSpec;
    ///
    /// let spec = TagSpec::parse("full_name,omitempty").unwrap();
    /// assert_eq!(spec.name, "full_name");
    /// assert!(spec.has_option("omitempty"));
    ///
    /// assert_eq!(TagSpec::parse("full_name").unwrap().name, "full_name");
    /// assert!(TagSpec::parse("").is_none());
    /// ```
    pub fn parse(tag: &str) -> Option<Self> {
        if tag.is_empty() {
            return None;
        }

        let mut segments = tag.split(',');
        let name = segments.next()?.to_string();
        let options = segments.map(str::to_string).collect();

        Some(TagSpec { name, options })
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

impl fmt::Display for TagSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for option in &self.options {
            write!(f, ",{}", option)?;
        }
        Ok(())
    }
}
