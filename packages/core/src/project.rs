//! The tagged struct projector.
//!
//! Walks a record's fields, reads each field's annotation under a tag key, and builds
//! a [`Mapping`] from destination key to field value. In deep mode, fields holding
//! records are projected recursively into nested mappings.
//!
//! # Example
//!
//! ```rust
//! use tagmap_core::{deep_project, shallow_project, DynamicRecord, Value};
//!
//! let address = DynamicRecord::new("Address").with_field("City", "NYC", [("tag", "city")]);
//! let person = DynamicRecord::new("Person")
//!     .with_field("Name", "Alice", [("tag", "full_name")])
//!     .with_field("Address", address.clone(), [("tag", "address")]);
//! let person = Value::record(person);
//!
//! let shallow = shallow_project(&person, "tag").unwrap();
//! assert_eq!(shallow["address"], Value::record(address));
//!
//! let deep = deep_project(&person, "tag").unwrap();
//! assert_eq!(deep["address"].get("city"), Some(&Value::from("NYC")));
//! ```

use crate::error::{Error, Result};
use crate::path::FieldPath;
use crate::record::Record;
use crate::tag::TagSpec;
use crate::value::{Mapping, Value};

/// Whether nested records are expanded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Top-level fields only; nested records are kept as opaque values.
    #[default]
    Shallow,
    /// Nested records are replaced by their own projected mappings.
    Deep,
}

/// Project the top-level fields of `record` under `tag_key`.
pub fn shallow_project(record: &Value, tag_key: &str) -> Result<Mapping> {
    Projector::new(tag_key).shallow(record)
}

/// Project `record` under `tag_key`, expanding nested records.
pub fn deep_project(record: &Value, tag_key: &str) -> Result<Mapping> {
    Projector::new(tag_key).deep(record)
}

/// Project a concrete record without wrapping it in a [`Value`] first.
pub fn project_record<R: Record + Clone>(
    record: &R,
    tag_key: &str,
    mode: Mode,
) -> Result<Mapping> {
    Projector::new(tag_key).project(&Value::record(record.clone()), mode)
}

/// A configured projection.
///
/// ```rust
/// use tagmap_core::{Mode, Projector};
///
/// let projector = Projector::new("json").with_max_depth(8);
/// assert_eq!(projector.tag_key(), "json");
/// assert_eq!(projector.max_depth(), Some(8));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projector {
    tag_key: String,
    max_depth: Option<usize>,
}

impl Projector {
    /// A projector reading annotations under `tag_key`, with unbounded nesting.
    pub fn new(tag_key: impl Into<String>) -> Self {
        Projector {
            tag_key: tag_key.into(),
            max_depth: None,
        }
    }

    /// Fail deep projections that would expand records more than `limit` levels
    /// below the root.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Remove any depth limit.
    pub fn unbounded(mut self) -> Self {
        self.max_depth = None;
        self
    }

    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn shallow(&self, record: &Value) -> Result<Mapping> {
        self.project(record, Mode::Shallow)
    }

    pub fn deep(&self, record: &Value) -> Result<Mapping> {
        self.project(record, Mode::Deep)
    }

    pub fn project(&self, record: &Value, mode: Mode) -> Result<Mapping> {
        self.project_at(record, &FieldPath::root(), mode == Mode::Deep)
    }

    fn project_at(&self, record: &Value, path: &FieldPath, deep: bool) -> Result<Mapping> {
        let record = match record {
            Value::Record(record) => record,
            other => {
                return Err(Error::InvalidInput {
                    path: path.clone(),
                    found: other.kind(),
                })
            }
        };

        if let Some(limit) = self.max_depth {
            if path.depth() > limit {
                return Err(Error::DepthExceeded {
                    path: path.clone(),
                    limit,
                });
            }
        }

        let mut mapping = Mapping::new();

        for name in record.field_names() {
            let field_path = path.child(name);

            let Some(tag) = record.field_tag(name, &self.tag_key) else {
                continue;
            };
            let Some(spec) = TagSpec::parse(tag) else {
                continue;
            };

            let value = record
                .field_value(name)
                .ok_or_else(|| Error::MissingField {
                    record: record.type_name(),
                    field: name.to_string(),
                    path: field_path.clone(),
                })?;

            let value = match value {
                nested @ Value::Record(_) if deep => {
                    let projected = self
                        .project_at(&nested, &field_path, deep)
                        .map_err(|e| Error::nested(name, field_path.clone(), e))?;
                    Value::Map(projected)
                }
                other => other,
            };

            mapping.insert(spec.name, value);
        }

        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DynamicRecord, RecordRef};
    use collection_literals::btree;

    const NO_TAGS: [(&str, &str); 0] = [];

    fn address() -> DynamicRecord {
        DynamicRecord::new("Address").with_field("City", "NYC", [("tag", "city")])
    }

    fn person() -> Value {
        Value::record(
            DynamicRecord::new("Person")
                .with_field("Name", "Alice", [("tag", "full_name")])
                .with_field("Address", address(), [("tag", "address")]),
        )
    }

    /// Lists a field it cannot produce.
    struct Broken;

    impl Record for Broken {
        fn type_name(&self) -> &'static str {
            "Broken"
        }

        fn field_names(&self) -> Vec<&str> {
            vec!["ghost"]
        }

        fn field_value(&self, _field: &str) -> Option<Value> {
            None
        }

        fn field_tag(&self, _field: &str, _key: &str) -> Option<&str> {
            Some("ghost")
        }
    }

    #[test]
    fn shallow_keeps_nested_record_opaque() {
        let mapping = shallow_project(&person(), "tag").unwrap();
        let expected: Mapping = btree! {
            "full_name".into() => Value::from("Alice"),
            "address".into() => Value::record(address()),
        };

        assert_eq!(mapping, expected);
    }

    #[test]
    fn deep_expands_nested_record() {
        let mapping = deep_project(&person(), "tag").unwrap();
        let expected: Mapping = btree! {
            "full_name".into() => Value::from("Alice"),
            "address".into() => Value::Map(btree! {
                "city".into() => Value::from("NYC"),
            }),
        };

        assert_eq!(mapping, expected);
    }

    #[test]
    fn untagged_record_projects_to_empty_mapping() {
        let record = Value::record(
            DynamicRecord::new("Plain")
                .with_field("a", 1i64, NO_TAGS)
                .with_field("b", address(), [("other", "b")]),
        );

        assert!(shallow_project(&record, "tag").unwrap().is_empty());
        assert!(deep_project(&record, "tag").unwrap().is_empty());
    }

    #[test]
    fn scalar_fields_are_identical_in_both_modes() {
        let record = Value::record(
            DynamicRecord::new("Scalars")
                .with_field("n", 5i64, [("tag", "x")])
                .with_field("list", vec![1i64, 2], [("tag", "list")])
                .with_field("map", Value::map(), [("tag", "map")]),
        );

        let shallow = shallow_project(&record, "tag").unwrap();
        let deep = deep_project(&record, "tag").unwrap();
        assert_eq!(shallow, deep);
        assert_eq!(shallow["x"], Value::Integer(5));
        assert_eq!(shallow["map"], Value::map());
    }

    #[test]
    fn reserved_options_do_not_change_the_key() {
        let plain = Value::record(DynamicRecord::new("T").with_field("f", 1i64, [("tag", "x")]));
        let optioned = Value::record(
            DynamicRecord::new("T").with_field("f", 1i64, [("tag", "x,extra")]),
        );

        assert_eq!(
            shallow_project(&plain, "tag").unwrap(),
            shallow_project(&optioned, "tag").unwrap()
        );
    }

    #[test]
    fn empty_annotation_excludes_field() {
        let record = Value::record(
            DynamicRecord::new("T")
                .with_field("kept", 1i64, [("tag", "kept")])
                .with_field("dropped", 2i64, [("tag", "")]),
        );

        let mapping = deep_project(&record, "tag").unwrap();
        assert_eq!(mapping.len(), 1);
        assert!(mapping.contains_key("kept"));
    }

    #[test]
    fn duplicate_destination_key_keeps_later_field() {
        let record = Value::record(
            DynamicRecord::new("T")
                .with_field("first", "one", [("tag", "dup")])
                .with_field("second", "two", [("tag", "dup,omitempty")]),
        );

        let mapping = shallow_project(&record, "tag").unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping["dup"], Value::from("two"));
    }

    #[test]
    fn non_record_input_is_rejected() {
        for input in [Value::Null, Value::from("text"), Value::map()] {
            let found = input.kind();
            for result in [shallow_project(&input, "tag"), deep_project(&input, "tag")] {
                assert_eq!(
                    result,
                    Err(Error::InvalidInput {
                        path: FieldPath::root(),
                        found,
                    })
                );
            }
        }
    }

    #[test]
    fn nested_failure_names_the_field_path() {
        let record = Value::record(
            DynamicRecord::new("Outer")
                .with_field("Name", "x", [("tag", "name")])
                .with_field("Inner", RecordRef::new(Broken), [("tag", "inner")]),
        );

        let err = deep_project(&record, "tag").unwrap_err();
        match &err {
            Error::NestedProjection { field, path, .. } => {
                assert_eq!(field, "Inner");
                assert_eq!(path.to_string(), "root.Inner");
            }
            other => panic!("expected nested error, got {:?}", other),
        }
        assert_eq!(err.field_path().to_string(), "root.Inner.ghost");
        assert!(matches!(err.root_cause(), Error::MissingField { record: "Broken", .. }));

        // Shallow mode never looks inside the broken record.
        assert!(shallow_project(&record, "tag").is_ok());
    }

    #[test]
    fn untagged_nested_record_is_not_visited() {
        let record = Value::record(
            DynamicRecord::new("Outer").with_field("Inner", RecordRef::new(Broken), NO_TAGS),
        );
        assert!(deep_project(&record, "tag").unwrap().is_empty());
    }

    #[test]
    fn depth_limit_wraps_through_each_level() {
        let level2 = DynamicRecord::new("L2").with_field("v", 1i64, [("tag", "v")]);
        let level1 = DynamicRecord::new("L1").with_field("next", level2, [("tag", "next")]);
        let root = Value::record(
            DynamicRecord::new("L0").with_field("next", level1, [("tag", "next")]),
        );

        assert!(Projector::new("tag").with_max_depth(2).deep(&root).is_ok());

        let err = Projector::new("tag").with_max_depth(1).deep(&root).unwrap_err();
        assert_eq!(err.chain().count(), 3);
        assert_eq!(err.field_path().to_string(), "root.next.next");
        assert!(matches!(err.root_cause(), Error::DepthExceeded { limit: 1, .. }));

        // The limit only applies to expansion.
        assert!(Projector::new("tag").with_max_depth(0).shallow(&root).is_ok());
    }

    #[test]
    fn projection_is_repeatable() {
        let record = person();
        assert_eq!(
            deep_project(&record, "tag").unwrap(),
            deep_project(&record, "tag").unwrap()
        );
        assert_eq!(
            shallow_project(&record, "tag").unwrap(),
            shallow_project(&record, "tag").unwrap()
        );
    }

    #[test]
    fn tag_key_selects_namespace() {
        let record = Value::record(
            DynamicRecord::new("T")
                .with_field("f", 1i64, [("json", "json_name"), ("form", "FormName")]),
        );

        let json = shallow_project(&record, "json").unwrap();
        let form = shallow_project(&record, "form").unwrap();
        assert!(json.contains_key("json_name"));
        assert!(form.contains_key("FormName"));
    }

    #[test]
    fn project_record_wraps_concrete_records() {
        let mapping = project_record(&address(), "tag", Mode::Deep).unwrap();
        assert_eq!(mapping["city"], Value::from("NYC"));
    }
}
