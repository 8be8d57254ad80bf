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

//! Code generation for `#[derive(Describe)]`.

use crate::parse::{FieldDef, StructDef};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericParam, parse_quote};

/// Generates the `Describe` implementation for a parsed struct.
pub fn generate_describe(def: &StructDef) -> TokenStream {
    let ident = &def.ident;
    let name = ident.to_string();

    let mut generics = def.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(parse_quote!(::polycodec::Describe));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let record = if def.anonymous {
        quote! { ::polycodec::StructDescriptor::anonymous() }
    } else {
        quote! { ::polycodec::StructDescriptor::named(#name, ::core::module_path!()) }
    };
    let fields = def.fields.iter().map(generate_field);

    quote! {
        #[automatically_derived]
        impl #impl_generics ::polycodec::Describe for #ident #ty_generics #where_clause {
            fn describe() -> ::polycodec::TypeDescriptor {
                ::polycodec::TypeDescriptor::of::<Self>(::polycodec::TypeKind::Struct(
                    #record #(#fields)*
                ))
            }
        }
    }
}

fn generate_field(field: &FieldDef) -> TokenStream {
    let name = &field.name;
    let ty = &field.ty;
    let exported = field.exported;
    let tags = field.tags.iter().map(|(key, value)| {
        quote! { .with_tag(#key, #value) }
    });

    quote! {
        .with_field(
            ::polycodec::FieldDescriptor::new(#name, <#ty as ::polycodec::Describe>::describe)
                .exported(#exported)
                #(#tags)*
        )
    }
}
