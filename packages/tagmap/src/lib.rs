//! TagMap: project tagged structs into generic key/value mappings.
//!
//! Annotate fields with `#[tag(scheme = "destination_key")]`, derive [`Record`], and
//! project under whichever scheme a caller needs. Shallow projection maps top-level
//! fields only; deep projection expands nested records into nested mappings.
//!
//! ```rust
//! use tagmap::{deep_project, shallow_project, Record, Value};
//!
//! #[derive(Clone, Record)]
//! #[record(crate = "tagmap")]
//! struct Address {
//!     #[tag(json = "city")]
//!     city: String,
//! }
//!
//! #[derive(Clone, Record)]
//! #[record(crate = "tagmap")]
//! struct Person {
//!     #[tag(json = "full_name")]
//!     name: String,
//!     #[tag(json = "address")]
//!     address: Address,
//! }
//!
//! let alice = Value::record(Person {
//!     name: "Alice".into(),
//!     address: Address { city: "NYC".into() },
//! });
//!
//! let shallow = shallow_project(&alice, "json").unwrap();
//! assert!(shallow["address"].is_record());
//!
//! let deep = deep_project(&alice, "json").unwrap();
//! assert_eq!(deep["address"].get("city"), Some(&Value::from("NYC")));
//! ```
//!
//! The [`encode`] module turns mappings into JSON or URL form bodies.

pub use tagmap_core::*;
pub use tagmap_derive::Record;

pub mod encode {
    //! Downstream encodings of a projected mapping.
    pub use tagmap_serde::*;
}
