//! `#[derive(Record)]` for TagMap.
//!
//! Generates `tagmap_core::Record` and `tagmap_core::ToValue` for a struct with named
//! fields. Annotations come from `#[tag(key = "annotation")]` field attributes:
//!
//! ```rust,ignore
//! use tagmap_derive::Record;
//!
//! #[derive(Clone, Record)]
//! struct Address {
//!     #[tag(json = "city")]
//!     city: String,
//! }
//!
//! #[derive(Clone, Record)]
//! struct Person {
//!     #[tag(json = "full_name,omitempty", form = "FullName")]
//!     name: String,
//!     #[tag(json = "address")]
//!     address: Address,
//!     // No tag: never projected.
//!     internal_id: u64,
//! }
//! ```
//!
//! Every field type must implement `ToValue`. Derived types must be `Clone`, since a
//! nested record is stored by value inside the parent's projection.
//!
//! The generated code refers to `::tagmap_core`. When depending on the `tagmap`
//! facade instead, point it there with `#[record(crate = "tagmap")]`.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod expand;
mod parse;

#[proc_macro_derive(Record, attributes(tag, record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    parse::RecordDef::from_derive_input(&input)
        .map(expand::expand)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
