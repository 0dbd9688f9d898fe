//! The Record trait - structured values that describe their own fields.
//!
//! A projection needs to list a record's fields, read each field's value, and read
//! each field's annotations under a tag key. Types opt in by implementing [`Record`],
//! usually through `#[derive(Record)]`. [`DynamicRecord`] covers records whose shape
//! is only known at runtime.

use crate::value::{ToValue, Value};

/// A structured value made of named, annotated fields.
///
/// Implementations must be consistent: every name returned by `field_names` must
/// resolve through `field_value`. The projector reports a violation as
/// [`Error::MissingField`](crate::Error::MissingField).
///
/// # Example
///
/// ```rust
/// use tagmap_core::{Record, Value};
///
/// struct Point {
///     x: i64,
/// }
///
/// impl Record for Point {
///     fn type_name(&self) -> &'static str {
///         "Point"
///     }
///
///     fn field_names(&self) -> Vec<&str> {
///         vec!["x"]
///     }
///
///     fn field_value(&self, field: &str) -> Option<Value> {
///         match field {
///             "x" => Some(Value::Integer(self.x)),
///             _ => None,
///         }
///     }
///
///     fn field_tag(&self, field: &str, key: &str) -> Option<&str> {
///         match (field, key) {
///             ("x", "json") => Some("x_coord"),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record: Send + Sync + 'static {
    /// Name of the record type, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Field names in declaration order.
    fn field_names(&self) -> Vec<&str>;

    /// Current value of a field, or `None` if the record has no such field.
    fn field_value(&self, field: &str) -> Option<Value>;

    /// The annotation attached to `field` under `key`, if any.
    fn field_tag(&self, field: &str, key: &str) -> Option<&str>;
}

/// A single field of a [`DynamicRecord`].
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicField {
    pub name: String,
    pub value: Value,
    /// (tag key, annotation) pairs in the order they were attached.
    pub tags: Vec<(String, String)>,
}

impl DynamicField {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A record assembled at runtime.
///
/// Field names are unique; adding a field with an existing name replaces it in place,
/// keeping its original position.
///
/// ```rust
/// use tagmap_core::{DynamicRecord, Record};
///
/// let user = DynamicRecord::new("User")
///     .with_field("Name", "Alice", [("json", "full_name")])
///     .with_field("Internal", 7i64, [] as [(&str, &str); 0]);
///
/// assert_eq!(user.field_names(), vec!["Name", "Internal"]);
/// assert_eq!(user.field_tag("Name", "json"), Some("full_name"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicRecord {
    type_name: &'static str,
    fields: Vec<DynamicField>,
}

impl DynamicRecord {
    pub fn new(type_name: &'static str) -> Self {
        DynamicRecord {
            type_name,
            fields: Vec::new(),
        }
    }

    /// Builder form of [`DynamicRecord::insert`].
    pub fn with_field<K, V>(
        mut self,
        name: impl Into<String>,
        value: impl ToValue,
        tags: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(name, value, tags);
        self
    }

    /// Add or replace a field.
    pub fn insert<K, V>(
        &mut self,
        name: impl Into<String>,
        value: impl ToValue,
        tags: impl IntoIterator<Item = (K, V)>,
    ) where
        K: Into<String>,
        V: Into<String>,
    {
        let field = DynamicField {
            name: name.into(),
            value: value.to_value(),
            tags: tags
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        };

        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn field(&self, name: &str) -> Option<&DynamicField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[DynamicField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Record for DynamicRecord {
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    fn field_value(&self, field: &str) -> Option<Value> {
        self.field(field).map(|f| f.value.clone())
    }

    fn field_tag(&self, field: &str, key: &str) -> Option<&str> {
        self.field(field)?.tag(key)
    }
}

impl ToValue for DynamicRecord {
    fn to_value(&self) -> Value {
        Value::record(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_TAGS: [(&str, &str); 0] = [];

    #[test]
    fn fields_keep_declaration_order() {
        let record = DynamicRecord::new("Order")
            .with_field("b", 1i64, NO_TAGS)
            .with_field("a", 2i64, NO_TAGS)
            .with_field("c", 3i64, NO_TAGS);

        assert_eq!(record.field_names(), vec!["b", "a", "c"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut record = DynamicRecord::new("Order")
            .with_field("a", 1i64, [("json", "first")])
            .with_field("b", 2i64, NO_TAGS);
        record.insert("a", 10i64, [("json", "renamed")]);

        assert_eq!(record.len(), 2);
        assert_eq!(record.field_names(), vec!["a", "b"]);
        assert_eq!(record.field_value("a"), Some(Value::Integer(10)));
        assert_eq!(record.field_tag("a", "json"), Some("renamed"));
    }

    #[test]
    fn later_tag_for_same_key_wins() {
        let record =
            DynamicRecord::new("T").with_field("a", true, [("json", "x"), ("json", "y")]);
        assert_eq!(record.field_tag("a", "json"), Some("y"));
    }

    #[test]
    fn unknown_field_and_tag_are_none() {
        let record = DynamicRecord::new("T").with_field("a", true, [("json", "x")]);

        assert_eq!(record.field_value("missing"), None);
        assert_eq!(record.field_tag("missing", "json"), None);
        assert_eq!(record.field_tag("a", "form"), None);
    }

    #[test]
    fn nested_dynamic_record_becomes_record_value() {
        let inner = DynamicRecord::new("Inner").with_field("v", 1i64, NO_TAGS);
        let outer = DynamicRecord::new("Outer").with_field("inner", inner.clone(), NO_TAGS);

        assert_eq!(outer.field_value("inner"), Some(Value::record(inner)));
    }
}
