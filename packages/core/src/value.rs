//! The Value type - the generic container a projection reads from and writes to.
//!
//! A record's fields are surfaced as `Value`s, and the output of a projection is a
//! [`Mapping`] of destination keys to `Value`s.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::record::Record;

/// The output of a projection: destination key to value.
pub type Mapping = BTreeMap<String, Value>;

/// A dynamically-typed value read from a record field.
///
/// # Design Notes
///
/// - `Record` holds a nested structured record, unexpanded. A shallow projection
///   leaves nested records in this form; a deep projection replaces them with `Map`.
/// - `Map` uses `BTreeMap` so projected output compares and prints deterministically.
/// - Uses `i64` for integers; unsigned values that don't fit are carried as strings.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Binary data.
    Bytes(Vec<u8>),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Key-value map with string keys.
    Map(BTreeMap<String, Value>),
    /// A nested structured record.
    Record(RecordRef),
}

impl Value {
    /// Wrap a record as a value.
    pub fn record<R: Record>(record: R) -> Self {
        Value::Record(RecordRef::new(record))
    }

    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Check if this value is a structured record.
    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordRef> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a key in a map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.get(key)
    }

    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }
}

/// Shared handle to a nested record.
///
/// Records are immutable once wrapped, so cloning a `RecordRef` (and therefore a
/// `Value`) never copies the record itself.
#[derive(Clone)]
pub struct RecordRef(Arc<dyn Record>);

impl RecordRef {
    pub fn new<R: Record>(record: R) -> Self {
        RecordRef(Arc::new(record))
    }

    pub fn from_arc(record: Arc<dyn Record>) -> Self {
        RecordRef(record)
    }

    pub fn as_record(&self) -> &dyn Record {
        self.0.as_ref()
    }
}

impl std::ops::Deref for RecordRef {
    type Target = dyn Record;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for RecordRef {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        let names = self.field_names();
        self.type_name() == other.type_name()
            && names == other.field_names()
            && names
                .iter()
                .all(|name| self.field_value(name) == other.field_value(name))
    }
}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.type_name());
        for name in self.field_names() {
            match self.field_value(name) {
                Some(value) => out.field(name, &value),
                None => out.field(name, &format_args!("<missing>")),
            };
        }
        out.finish()
    }
}

/// Conversion of a field's Rust type into a [`Value`].
///
/// `#[derive(Record)]` calls this for every field, so any type used as a field of a
/// derived record must implement it.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for RecordRef {
    fn to_value(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! signed_to_value {
    ($($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }
            }
        )*
    };
}

signed_to_value!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! wide_to_value {
    ($($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    match i64::try_from(*self) {
                        Ok(i) => Value::Integer(i),
                        // Too large for i64
                        Err(_) => Value::String(self.to_string()),
                    }
                }
            }
        )*
    };
}

wide_to_value!(u64, usize, isize, i128, u128);

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl<T: ToValue, S> ToValue for HashMap<String, T, S> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<Mapping> for Value {
    fn from(v: Mapping) -> Self {
        Value::Map(v)
    }
}

impl From<RecordRef> for Value {
    fn from(v: RecordRef) -> Self {
        Value::Record(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DynamicRecord;

    fn city(name: &str) -> DynamicRecord {
        DynamicRecord::new("Address").with_field("City", name, [("tag", "city")])
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(None::<i32>.to_value(), Value::Null);
        assert_eq!(Some(7i32).to_value(), Value::Integer(7));
    }

    #[test]
    fn wide_integers_fall_back_to_strings() {
        assert_eq!(42u64.to_value(), Value::Integer(42));
        assert_eq!(
            u64::MAX.to_value(),
            Value::String(u64::MAX.to_string())
        );
    }

    #[test]
    fn collections_convert_elementwise() {
        let v = vec!["a", "b"];
        assert_eq!(
            v.to_value(),
            Value::Array(vec![Value::from("a"), Value::from("b")])
        );

        let mut m = HashMap::new();
        m.insert("k".to_string(), 1i32);
        assert_eq!(m.to_value().get("k"), Some(&Value::Integer(1)));
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::map().kind(), "map");
        assert_eq!(Value::record(city("NYC")).kind(), "record");
    }

    #[test]
    fn records_compare_by_content() {
        let a = Value::record(city("NYC"));
        let b = Value::record(city("NYC"));
        let c = Value::record(city("LA"));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn record_debug_lists_fields() {
        let debug = format!("{:?}", Value::record(city("NYC")));
        assert!(debug.contains("Address"));
        assert!(debug.contains("City"));
        assert!(debug.contains("NYC"));
    }
}
