use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use std::collections::HashSet;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, LitStr};

/// Derive macro for tagged records.
///
/// On a struct with named fields, generates `binmap::BinRecord` and
/// `binmap::Convertible` impls. Only fields carrying a non-empty
/// `#[bin(...)]` tag take part in encoding and decoding; every other field is
/// ignored in both directions.
///
/// On a tuple struct with a single field (a newtype such as a string alias),
/// generates a transparent `binmap::Convertible` impl that delegates to the
/// wrapped type.
///
/// The struct must implement `Default`; nested records are decoded into a
/// default instance.
///
/// # Example
///
/// ```ignore
/// #[derive(BinRecord, Default)]
/// pub struct User {
///     #[bin(name = "id")]
///     pub id: u64,
///
///     #[bin("email")]
///     pub email: Option<String>,
///
///     // not stored
///     pub session: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(BinRecord, attributes(bin))]
pub fn derive_bin_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;

    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => derive_record(input, fields.named.iter().collect()),
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                derive_newtype(input, &fields.unnamed[0])
            }
            _ => Err(syn::Error::new_spanned(
                name,
                "BinRecord only supports structs with named fields or single-field newtypes",
            )),
        },
        _ => Err(syn::Error::new_spanned(
            name,
            "BinRecord only supports structs",
        )),
    }
}

/// Read the bin name from `#[bin("...")]` or `#[bin(name = "...")]`.
///
/// An empty name counts as no tag.
fn field_tag(field: &Field) -> Result<Option<String>, syn::Error> {
    let mut tag: Option<String> = None;

    for attr in &field.attrs {
        if !attr.path().is_ident("bin") {
            continue;
        }
        if let Ok(value) = attr.parse_args::<LitStr>() {
            tag = Some(value.value());
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                tag = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unknown bin attribute (expected `name = \"...\"`)"))
            }
        })?;
    }

    Ok(tag.filter(|t| !t.is_empty()))
}

fn derive_record(input: &DeriveInput, fields: Vec<&Field>) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut seen = HashSet::new();
    let mut descriptor_tokens = Vec::new();
    let mut encode_tokens = Vec::new();
    let mut decode_tokens = Vec::new();
    let mut is_default_tokens = Vec::new();

    for field in fields {
        let Some(tag) = field_tag(field)? else {
            continue;
        };
        let field_ident = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "expected named field")
        })?;
        if !seen.insert(tag.clone()) {
            return Err(syn::Error::new_spanned(
                field_ident,
                format!("duplicate bin name '{tag}'"),
            ));
        }

        let field_name = field_ident.to_string();
        let field_ty = &field.ty;
        let type_name = quote!(#field_ty).to_string().replace(' ', "");

        descriptor_tokens.push(quote! {
            ::binmap::FieldDescriptor {
                name: #field_name,
                tag: #tag,
                type_name: #type_name,
                shape: <#field_ty as ::binmap::Convertible>::SHAPE,
            }
        });
        encode_tokens.push(quote! {
            ::binmap::record::encode_field(__out, #field_name, #tag, &self.#field_ident)?;
        });
        decode_tokens.push(quote! {
            ::binmap::record::decode_field(__source, #field_name, #tag, &mut self.#field_ident)?;
        });
        is_default_tokens.push(quote! {
            && ::binmap::Convertible::is_default(&self.#field_ident)
        });
    }

    let expanded = quote! {
        impl #impl_generics ::binmap::BinRecord for #name #ty_generics #where_clause {
            const FIELDS: &'static [::binmap::FieldDescriptor] = &[
                #(#descriptor_tokens),*
            ];

            fn encode_fields(
                &self,
                __out: &mut dyn ::binmap::BinSink,
            ) -> ::binmap::Result<()> {
                #(#encode_tokens)*
                ::core::result::Result::Ok(())
            }

            fn decode_fields(
                &mut self,
                __source: &dyn ::binmap::BinSource,
            ) -> ::binmap::Result<()> {
                #(#decode_tokens)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::binmap::Convertible for #name #ty_generics #where_clause {
            const SHAPE: ::binmap::Shape = ::binmap::Shape::Struct;

            fn is_default(&self) -> bool {
                true #(#is_default_tokens)*
            }

            fn to_bin(&self) -> ::binmap::Result<::binmap::BinValue> {
                ::binmap::record::record_to_bin(self)
            }

            fn from_bin(value: &::binmap::BinValue) -> ::binmap::Result<Self> {
                ::binmap::record::record_from_bin(value)
            }

            fn merge_bin(&mut self, value: &::binmap::BinValue) -> ::binmap::Result<()> {
                ::binmap::record::record_merge_bin(self, value)
            }

            fn to_bins(&self) -> ::binmap::Result<::binmap::BinMap> {
                ::binmap::record::record_to_bins(self)
            }

            fn merge_bins(&mut self, bins: &::binmap::BinMap) -> ::binmap::Result<()> {
                ::binmap::record::record_merge_bins(self, bins)
            }
        }
    };

    Ok(expanded)
}

fn derive_newtype(input: &DeriveInput, field: &Field) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let inner = &field.ty;

    if let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("bin")) {
        return Err(syn::Error::new_spanned(
            attr,
            "newtypes are transparent and take no bin name",
        ));
    }

    Ok(quote! {
        impl #impl_generics ::binmap::Convertible for #name #ty_generics #where_clause {
            const SHAPE: ::binmap::Shape = <#inner as ::binmap::Convertible>::SHAPE;

            fn is_default(&self) -> bool {
                ::binmap::Convertible::is_default(&self.0)
            }

            fn to_bin(&self) -> ::binmap::Result<::binmap::BinValue> {
                ::binmap::Convertible::to_bin(&self.0)
            }

            fn from_bin(value: &::binmap::BinValue) -> ::binmap::Result<Self> {
                <#inner as ::binmap::Convertible>::from_bin(value).map(Self)
            }

            fn merge_bin(&mut self, value: &::binmap::BinValue) -> ::binmap::Result<()> {
                ::binmap::Convertible::merge_bin(&mut self.0, value)
            }
        }
    })
}
