//! TagMap core: tag-driven projection of structured records into generic mappings.
//!
//! - `Record`: a value that can list its fields, their values, and their annotations
//! - `Value`: the generic container fields are read into
//! - `TagSpec`: a parsed `"name,option,..."` annotation
//! - `Projector`: turns a record into a `Mapping` keyed by annotation names
//!
//! # Example
//!
//! ```rust
//! use tagmap_core::{deep_project, DynamicRecord, Value};
//!
//! let user = DynamicRecord::new("User")
//!     .with_field("Name", "Alice", [("json", "full_name,omitempty")])
//!     .with_field("Secret", "hunter2", [] as [(&str, &str); 0]);
//!
//! let mapping = deep_project(&Value::record(user), "json").unwrap();
//! assert_eq!(mapping.len(), 1);
//! assert_eq!(mapping["full_name"], Value::from("Alice"));
//! ```
//!
//! Projection is a pure function of its input: nothing is logged, nothing is
//! mutated, and a failure anywhere aborts the whole call.

mod error;
mod path;
mod project;
mod record;
mod tag;
mod value;

pub use error::{Chain, Error, Result};
pub use path::{FieldPath, ROOT};
pub use project::{deep_project, project_record, shallow_project, Mode, Projector};
pub use record::{DynamicField, DynamicRecord, Record};
pub use tag::TagSpec;
pub use value::{Mapping, RecordRef, ToValue, Value};
