//
// Copyright 2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Parsing of `#[derive(Describe)]` input.

use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Error, Fields, Generics, Ident, LitStr, Result, Type, Visibility};

/// Name of the helper attribute.
const ATTRIBUTE: &str = "codec";

/// Parsed struct definition.
#[derive(Debug)]
pub struct StructDef {
    /// Struct identifier
    pub ident: Ident,
    /// Generic parameters as declared
    pub generics: Generics,
    /// `#[codec(anonymous)]` was given
    pub anonymous: bool,
    /// Named fields in declaration order
    pub fields: Vec<FieldDef>,
}

/// Parsed field definition.
#[derive(Debug)]
pub struct FieldDef {
    /// Declared name without any `r#` prefix
    pub name: String,
    /// Field type
    pub ty: Type,
    /// Field is `pub`
    pub exported: bool,
    /// `(format, value)` pairs from `#[codec(format = "value")]`
    pub tags: Vec<(String, String)>,
}

/// Parses a struct with named fields.
pub fn parse_struct(input: &DeriveInput) -> Result<StructDef> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) => {
                return Err(Error::new(
                    input.ident.span(),
                    "Describe can only be derived for structs with named fields; tuple structs are not supported",
                ));
            }
            Fields::Unit => {
                return Err(Error::new(
                    input.ident.span(),
                    "Describe can only be derived for structs with named fields; unit structs are not supported",
                ));
            }
        },
        Data::Enum(_) => {
            return Err(Error::new(
                input.ident.span(),
                "Describe cannot be derived for enums",
            ));
        }
        Data::Union(_) => {
            return Err(Error::new(
                input.ident.span(),
                "Describe cannot be derived for unions",
            ));
        }
    };

    let anonymous = parse_struct_attrs(&input.attrs)?;

    let fields = fields
        .iter()
        .map(|field| {
            let ident = field
                .ident
                .as_ref()
                .ok_or_else(|| Error::new(field.span(), "expected a named field"))?;
            Ok(FieldDef {
                name: unraw(ident),
                ty: field.ty.clone(),
                exported: matches!(field.vis, Visibility::Public(_)),
                tags: parse_field_attrs(&field.attrs)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(StructDef {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        anonymous,
        fields,
    })
}

fn parse_struct_attrs(attrs: &[Attribute]) -> Result<bool> {
    let mut anonymous = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident(ATTRIBUTE)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("anonymous") {
                anonymous = true;
                Ok(())
            } else {
                Err(meta.error("unknown struct attribute; expected `anonymous`"))
            }
        })?;
    }
    Ok(anonymous)
}

fn parse_field_attrs(attrs: &[Attribute]) -> Result<Vec<(String, String)>> {
    let mut tags = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident(ATTRIBUTE)) {
        attr.parse_nested_meta(|meta| {
            let key = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .ok_or_else(|| meta.error("expected `format = \"tag\"`"))?;
            let value: LitStr = meta.value()?.parse()?;
            if tags.iter().any(|(k, _)| *k == key) {
                return Err(meta.error(format!("duplicate `{key}` tag")));
            }
            tags.push((key, value.value()));
            Ok(())
        })?;
    }
    Ok(tags)
}

/// Returns the identifier text without a raw-identifier prefix.
fn unraw(ident: &Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_fields_and_tags() {
        let input: DeriveInput = parse_quote! {
            pub struct User {
                #[codec(avro = "user_name", json = "name")]
                pub name: String,
                pub r#type: u8,
                secret: String,
            }
        };
        let def = parse_struct(&input).unwrap();
        assert!(!def.anonymous);
        assert_eq!(def.fields.len(), 3);
        assert_eq!(
            def.fields[0].tags,
            vec![
                ("avro".to_string(), "user_name".to_string()),
                ("json".to_string(), "name".to_string())
            ]
        );
        assert_eq!(def.fields[1].name, "type");
        assert!(def.fields[1].exported);
        assert!(!def.fields[2].exported);
    }

    #[test]
    fn test_anonymous_attribute() {
        let input: DeriveInput = parse_quote! {
            #[codec(anonymous)]
            struct Point { pub x: i32 }
        };
        assert!(parse_struct(&input).unwrap().anonymous);
    }

    #[test]
    fn test_rejects_non_struct_shapes() {
        let inputs: [DeriveInput; 3] = [
            parse_quote! { enum Color { Red } },
            parse_quote! { struct Pair(i32, i32); },
            parse_quote! { struct Marker; },
        ];
        for input in inputs {
            assert!(parse_struct(&input).is_err());
        }
    }

    #[test]
    fn test_rejects_duplicate_and_unknown_attrs() {
        let duplicate: DeriveInput = parse_quote! {
            struct A { #[codec(avro = "a", avro = "b")] pub x: i32 }
        };
        assert!(parse_struct(&duplicate).is_err());

        let unknown: DeriveInput = parse_quote! {
            #[codec(sealed)]
            struct B { pub x: i32 }
        };
        assert!(parse_struct(&unknown).is_err());
    }
}
