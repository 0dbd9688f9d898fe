//! URL form encoding of projected mappings.
//!
//! HTTP APIs that take `application/x-www-form-urlencoded` bodies want flat key/value
//! pairs. Nested maps are flattened by joining keys with a separator, arrays repeat
//! their key once per element, and nulls and non-finite floats are left out.

use base64::Engine;
use tagmap_core::{deep_project, Mapping, Value};

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormEncoder {
    separator: String,
}

impl Default for FormEncoder {
    fn default() -> Self {
        FormEncoder {
            separator: ".".to_string(),
        }
    }
}

impl FormEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join nested keys with `separator` instead of `.`.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Flatten a mapping into ordered form pairs.
    ///
    /// Fails on a nested record that was never projected (a shallow mapping), since
    /// there is no tag key to name its fields by.
    pub fn pairs(&self, mapping: &Mapping) -> Result<Vec<(String, String)>> {
        let mut out = Vec::new();
        for (key, value) in mapping {
            self.push(key.clone(), value, &mut out)?;
        }
        log::debug!("Flattened {} form pairs", out.len());
        Ok(out)
    }

    /// Encode a mapping as an `application/x-www-form-urlencoded` string.
    pub fn encode(&self, mapping: &Mapping) -> Result<String> {
        let pairs = self.pairs(mapping)?;
        Ok(url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish())
    }

    fn push(&self, key: String, value: &Value, out: &mut Vec<(String, String)>) -> Result<()> {
        let scalar = match value {
            Value::Null => {
                log::trace!("Skipping null form value for {}", key);
                return Ok(());
            }
            Value::Float(f) if !f.is_finite() => {
                log::trace!("Skipping non-finite form value {} for {}", f, key);
                return Ok(());
            }
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Bytes(b) => base64::engine::general_purpose::STANDARD.encode(b),
            Value::Array(items) => {
                for item in items {
                    self.push(key.clone(), item, out)?;
                }
                return Ok(());
            }
            Value::Map(map) => {
                for (child, item) in map {
                    self.push(format!("{}{}{}", key, self.separator, child), item, out)?;
                }
                return Ok(());
            }
            Value::Record(_) => {
                return Err(Error::Unsupported {
                    key,
                    kind: value.kind(),
                })
            }
        };
        out.push((key, scalar));
        Ok(())
    }
}

/// Deep-project `record` under `tag_key` and form-encode the result.
pub fn project_form(record: &Value, tag_key: &str) -> Result<String> {
    let mapping = deep_project(record, tag_key)?;
    FormEncoder::default().encode(&mapping)
}
