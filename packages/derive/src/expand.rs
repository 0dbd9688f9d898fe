//! Code generation for the Record derive.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse_quote;

use crate::parse::RecordDef;

pub fn expand(def: RecordDef) -> TokenStream {
    let RecordDef {
        ident,
        mut generics,
        type_name,
        krate,
        fields,
    } = def;

    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(#krate::ToValue));
        param.bounds.push(parse_quote!(::core::clone::Clone));
        param.bounds.push(parse_quote!(::core::marker::Send));
        param.bounds.push(parse_quote!(::core::marker::Sync));
        param.bounds.push(parse_quote!('static));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    let idents: Vec<_> = fields.iter().map(|f| &f.ident).collect();

    let tag_arms = fields.iter().flat_map(|f| {
        let name = f.name.as_str();
        f.tags.iter().map(move |(key, annotation)| {
            quote! {
                (#name, #key) => ::core::option::Option::Some(#annotation),
            }
        })
    });

    quote! {
        impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn field_names(&self) -> ::std::vec::Vec<&str> {
                ::std::vec![#(#names),*]
            }

            fn field_value(&self, field: &str) -> ::core::option::Option<#krate::Value> {
                match field {
                    #(
                        #names => ::core::option::Option::Some(
                            #krate::ToValue::to_value(&self.#idents)
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_tag(&self, field: &str, key: &str) -> ::core::option::Option<&str> {
                match (field, key) {
                    #(#tag_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics #krate::ToValue for #ident #ty_generics #where_clause {
            fn to_value(&self) -> #krate::Value {
                #krate::Value::record(::core::clone::Clone::clone(self))
            }
        }
    }
}
