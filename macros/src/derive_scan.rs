use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, spanned::Spanned};

/// Convert PascalCase to snake_case
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Options from a `#[scan(...)]` attribute.
#[derive(Default)]
struct ScanAttrs {
    expected: Option<LitStr>,
    rename: Option<LitStr>,
}

impl ScanAttrs {
    fn from_attrs(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("scan")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("expected") {
                    out.expected = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    out.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("expected `expected = \"...\"` or `rename = \"...\"`"))
                }
            })?;
        }
        Ok(out)
    }
}

pub fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let attrs = ScanAttrs::from_attrs(&input.attrs)?;
    if let Some(rename) = &attrs.rename {
        return Err(syn::Error::new(
            rename.span(),
            "`rename` applies to enum variants, not to the type",
        ));
    }
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let (expected, body) = match &input.data {
        Data::Struct(data) => expand_newtype(name, &data.fields, attrs.expected)?,
        Data::Enum(data) => {
            let expected = attrs
                .expected
                .unwrap_or_else(|| LitStr::new(&to_snake_case(&name.to_string()), name.span()));
            let mut arms = Vec::with_capacity(data.variants.len());
            for variant in &data.variants {
                if !matches!(variant.fields, Fields::Unit) {
                    return Err(syn::Error::new(
                        variant.fields.span(),
                        "#[derive(Scan)] only supports fieldless enum variants",
                    ));
                }
                let v_attrs = ScanAttrs::from_attrs(&variant.attrs)?;
                if let Some(expected) = &v_attrs.expected {
                    return Err(syn::Error::new(
                        expected.span(),
                        "`expected` applies to the type, not to enum variants",
                    ));
                }
                let ident = &variant.ident;
                let spelling = v_attrs.rename.unwrap_or_else(|| {
                    LitStr::new(&to_snake_case(&ident.to_string()), ident.span())
                });
                arms.push(quote! { #spelling => ::core::result::Result::Ok(Self::#ident) });
            }
            let body = quote! {
                match token {
                    #(#arms,)*
                    _ => ::core::result::Result::Err(::scankit::ScanError::new::<Self>(token)),
                }
            };
            (quote! { #expected }, body)
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "#[derive(Scan)] does not support unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::scankit::Scan for #name #ty_generics #where_clause {
            const EXPECTED: &'static str = #expected;

            fn scan(token: &str) -> ::core::result::Result<Self, ::scankit::ScanError> {
                #body
            }
        }
    })
}

/// A single-field struct scans as its field.
fn expand_newtype(
    name: &syn::Ident,
    fields: &Fields,
    expected: Option<LitStr>,
) -> syn::Result<(TokenStream, TokenStream)> {
    let field = match fields {
        Fields::Named(named) if named.named.len() == 1 => &named.named[0],
        Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => &unnamed.unnamed[0],
        _ => {
            return Err(syn::Error::new(
                name.span(),
                "#[derive(Scan)] on a struct requires exactly one field",
            ));
        }
    };
    let inner = &field.ty;
    let construct = match &field.ident {
        Some(ident) => quote! { Self { #ident: value } },
        None => quote! { Self(value) },
    };
    let expected = match expected {
        Some(lit) => quote! { #lit },
        None => quote! { <#inner as ::scankit::Scan>::EXPECTED },
    };
    let body = quote! {
        match <#inner as ::scankit::Scan>::scan(token) {
            ::core::result::Result::Ok(value) => ::core::result::Result::Ok(#construct),
            ::core::result::Result::Err(_) => {
                ::core::result::Result::Err(::scankit::ScanError::new::<Self>(token))
            }
        }
    };
    Ok((expected, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Celsius"), "celsius");
        assert_eq!(to_snake_case("TrafficLight"), "traffic_light");
        assert_eq!(to_snake_case("lower"), "lower");
    }

    #[test]
    fn test_expand_rejects_tuple_variants() {
        let input: DeriveInput = syn::parse_quote! {
            enum Bad { Ok, Value(u8) }
        };
        let err = expand(input).err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("#[derive(Scan)] only supports fieldless enum variants")
        );
    }

    #[test]
    fn test_expand_rejects_expected_on_variant() {
        let input: DeriveInput = syn::parse_quote! {
            enum Mode {
                #[scan(expected = "fast mode")]
                Fast,
                Slow,
            }
        };
        let err = expand(input).err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("`expected` applies to the type, not to enum variants")
        );
    }

    #[test]
    fn test_expand_rejects_rename_on_type() {
        let input: DeriveInput = syn::parse_quote! {
            #[scan(rename = "m")]
            struct Meters(f64);
        };
        let err = expand(input).err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("`rename` applies to enum variants, not to the type")
        );
    }

    #[test]
    fn test_expand_rejects_multi_field_struct() {
        let input: DeriveInput = syn::parse_quote! {
            struct Point(i32, i32);
        };
        assert!(expand(input).is_err());
    }

    #[test]
    fn test_expand_newtype_mentions_inner_type() {
        let input: DeriveInput = syn::parse_quote! {
            struct Meters(f64);
        };
        let out = expand(input).map(|ts| ts.to_string()).unwrap_or_default();
        assert!(out.contains("f64"));
        assert!(out.contains("EXPECTED"));
        assert!(out.contains("Self (value)"));
    }
}
