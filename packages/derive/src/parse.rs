//! Attribute parsing for the Record derive.
//!
//! Struct level: `#[record(crate = "path::to::tagmap_core", name = "TypeName")]`,
//! both optional.
//!
//! Field level: `#[tag(json = "full_name,omitempty", form = "FullName")]`. Any number
//! of `#[tag]` attributes may appear on a field; a key repeated later overrides the
//! earlier annotation while keeping its position.

use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Generics, Ident, LitStr};

pub struct RecordDef {
    pub ident: Ident,
    pub generics: Generics,
    /// Reported by `Record::type_name`.
    pub type_name: String,
    /// Path the generated code uses to reach the core crate.
    pub krate: syn::Path,
    pub fields: Vec<FieldDef>,
}

pub struct FieldDef {
    pub ident: Ident,
    /// Field name as the record reports it (raw identifier prefix stripped).
    pub name: String,
    /// (tag key, annotation) in first-seen key order.
    pub tags: Vec<(String, String)>,
}

impl RecordDef {
    pub fn from_derive_input(input: &DeriveInput) -> syn::Result<Self> {
        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named
                    .named
                    .iter()
                    .map(FieldDef::from_field)
                    .collect::<syn::Result<Vec<_>>>()?,
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "Record can only be derived for structs with named fields",
                    ))
                }
                Fields::Unit => Vec::new(),
            },
            Data::Enum(_) | Data::Union(_) => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "Record can only be derived for structs",
                ))
            }
        };

        if let Some(lifetime) = input.generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "Record types must be 'static and cannot have lifetime parameters",
            ));
        }

        let mut type_name = input.ident.unraw().to_string();
        let mut krate: syn::Path = syn::parse_quote!(::tagmap_core);

        for attr in input.attrs.iter().filter(|a| a.path().is_ident("record")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    let lit: LitStr = meta.value()?.parse()?;
                    krate = lit.parse()?;
                    Ok(())
                } else if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    type_name = lit.value();
                    Ok(())
                } else {
                    Err(meta.error("unknown record attribute, expected `crate` or `name`"))
                }
            })?;
        }

        Ok(RecordDef {
            ident: input.ident.clone(),
            generics: input.generics.clone(),
            type_name,
            krate,
            fields,
        })
    }
}

impl FieldDef {
    fn from_field(field: &syn::Field) -> syn::Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;

        let mut tags: Vec<(String, String)> = Vec::new();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("tag")) {
            attr.parse_nested_meta(|meta| {
                let key = meta.path.require_ident()?.unraw().to_string();
                let lit: LitStr = meta.value()?.parse()?;
                let annotation = lit.value();

                match tags.iter_mut().find(|(k, _)| *k == key) {
                    Some(existing) => existing.1 = annotation,
                    None => tags.push((key, annotation)),
                }
                Ok(())
            })?;
        }

        Ok(FieldDef {
            name: ident.unraw().to_string(),
            ident,
            tags,
        })
    }
}
