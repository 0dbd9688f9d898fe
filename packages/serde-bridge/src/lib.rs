//! Serde integration for TagMap.
//!
//! Projection stops at an in-memory [`Mapping`](tagmap_core::Mapping). This layer is
//! what the callers then do with it:
//! - `mapping_to_json` / `json_to_mapping`: JSON conversion, both directions
//! - `SerializeMapping` / `SerializeValue`: serialize with any serde format
//! - `FormEncoder`: flatten into an HTTP form body
//!
//! # Example
//!
//! ```rust
//! use tagmap_core::{DynamicRecord, Value};
//! use tagmap_serde::project_form;
//!
//! let params = DynamicRecord::new("WorkflowParams")
//!     .with_field("Name", "Support", [("form", "FriendlyName")]);
//!
//! let body = project_form(&Value::record(params), "form").unwrap();
//! assert_eq!(body, "FriendlyName=Support");
//! ```

mod convert;
mod error;
mod form;

pub use convert::{
    json_to_mapping, json_to_value, mapping_to_json, record_to_json, to_json_string, value_to_json,
    SerializeMapping, SerializeValue,
};
pub use error::{Error, Result};
pub use form::{project_form, FormEncoder};
