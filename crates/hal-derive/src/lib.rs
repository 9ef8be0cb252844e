//! # hal-derive
//!
//! `#[derive(HalData)]` for structs with named fields. Implements
//! `hal_core::HalData`, `hal_core::IsEmpty` and `hal_core::DataValue`.
//!
//! Field attributes:
//!
//! - `#[hal(name = "x")]`: emit the field under `x`
//! - `#[hal(omitempty)]`: leave the field out when it is empty
//! - `#[hal(directive = "x,omitempty")]`: the textual form of both; `"-"` opts out
//! - `#[hal]`: emit the field under its own name
//! - `#[hal(embed)]`: promote the fields of a nested record into the parent
//! - `#[hal(skip)]`: ignore the field entirely, including for emptiness
//!
//! A field without a `#[hal]` attribute is never emitted, but still counts
//! for emptiness and can be embedded.
//!
//! ```ignore
//! #[derive(HalData)]
//! struct Order {
//!     #[hal(name = "id")]
//!     id: u64,
//!     #[hal(name = "note", omitempty)]
//!     note: Option<String>,
//!     #[hal(embed)]
//!     audit: Audit,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, Ident, LitStr, Meta};

static HAL_ATTRIBUTE_NAME: &str = "hal";

#[proc_macro_derive(HalData, attributes(hal))]
pub fn derive_hal_data(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Parsed `#[hal(...)]` attributes of one field.
#[derive(Default)]
struct FieldAttrs {
    tagged: bool,
    name: Option<String>,
    omit_empty: bool,
    directive: Option<String>,
    embed: bool,
    skip: bool,
}

impl FieldAttrs {
    fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(HAL_ATTRIBUTE_NAME) {
                continue;
            }

            if let Meta::Path(_) = attr.meta {
                parsed.tagged = true;
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    parsed.name = Some(meta.value()?.parse::<LitStr>()?.value());
                    parsed.tagged = true;
                } else if meta.path.is_ident("omitempty") {
                    parsed.omit_empty = true;
                    parsed.tagged = true;
                } else if meta.path.is_ident("directive") {
                    parsed.directive = Some(meta.value()?.parse::<LitStr>()?.value());
                    parsed.tagged = true;
                } else if meta.path.is_ident("embed") {
                    parsed.embed = true;
                } else if meta.path.is_ident("skip") {
                    parsed.skip = true;
                } else {
                    return Err(meta.error("unsupported hal attribute"));
                }
                Ok(())
            })?;
        }

        if parsed.directive.is_some() && (parsed.name.is_some() || parsed.omit_empty) {
            return Err(syn::Error::new_spanned(
                &attrs[0],
                "`directive` cannot be combined with `name` or `omitempty`",
            ));
        }

        Ok(parsed)
    }

    /// Textual directive, or `None` when the field has no `#[hal]` tag.
    fn directive(&self) -> Option<String> {
        if !self.tagged {
            return None;
        }
        if let Some(directive) = &self.directive {
            return Some(directive.clone());
        }

        let mut directive = self.name.clone().unwrap_or_default();
        if self.omit_empty {
            directive.push_str(",omitempty");
        }
        Some(directive)
    }
}

fn expand(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "HalData can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "HalData can only be derived for structs",
            ))
        }
    };

    let mut described: Vec<(Ident, TokenStream2)> = Vec::new();
    for field in fields {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let ident_str = ident.to_string();

        let mut expr = quote! { ::hal_core::Field::new(#ident_str, &self.#ident) };
        if let Some(directive) = attrs.directive() {
            expr = quote! { #expr.tagged(#directive) };
        }
        if attrs.embed {
            expr = quote! { #expr.embedded() };
        }
        described.push((ident, expr));
    }

    let type_params: Vec<Ident> = input
        .generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let where_clause = input.generics.make_where_clause();
    for param in &type_params {
        where_clause
            .predicates
            .push(parse_quote! { #param: ::hal_core::DataValue });
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let field_exprs = described.iter().map(|(_, expr)| expr);
    let field_idents = described.iter().map(|(ident, _)| ident);

    Ok(quote! {
        impl #impl_generics ::hal_core::HalData for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::hal_core::Field<'_>> {
                ::std::vec![#(#field_exprs),*]
            }
        }

        impl #impl_generics ::hal_core::IsEmpty for #name #ty_generics #where_clause {
            fn is_empty_value(&self) -> bool {
                true #(&& ::hal_core::IsEmpty::is_empty_value(&self.#field_idents))*
            }
        }

        impl #impl_generics ::hal_core::DataValue for #name #ty_generics #where_clause {
            fn to_value(&self) -> ::hal_core::Value {
                ::hal_core::Value::Object(::hal_core::data::record_fields(self))
            }

            fn as_record(&self) -> ::std::option::Option<&dyn ::hal_core::HalData> {
                ::std::option::Option::Some(self)
            }
        }
    })
}
