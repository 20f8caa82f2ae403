//! Struct-specific `LogFields` derivation.
//!
//! This module decides which fields are members, generates their
//! registrations in declaration order, and collects generic parameters that
//! require trait bounds.

use std::collections::BTreeSet;

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{ext::IdentExt, spanned::Spanned, DataStruct, Fields, LitStr, Result};

use crate::{
    accessor::{generate_member_registration, DeriveContext, Member},
    container::ContainerOptions,
    strategy::parse_field_options,
    types::is_phantom_data,
};

pub(crate) struct StructDeriveOutput {
    pub(crate) describe_body: TokenStream,
    pub(crate) value_generics: Vec<Ident>,
    pub(crate) debug_generics: Vec<Ident>,
    pub(crate) display_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    data: &DataStruct,
    generics: &syn::Generics,
    options: &ContainerOptions,
) -> Result<StructDeriveOutput> {
    let mut registrations = Vec::new();
    let mut value_generics = Vec::new();
    let mut debug_generics = Vec::new();
    let mut display_generics = Vec::new();
    let mut names = BTreeSet::new();

    let mut ctx = DeriveContext {
        generics,
        value_generics: &mut value_generics,
        debug_generics: &mut debug_generics,
        display_generics: &mut display_generics,
    };

    let fields = match &data.fields {
        Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
        Fields::Unnamed(fields) => fields.unnamed.iter().collect::<Vec<_>>(),
        Fields::Unit => Vec::new(),
    };

    for (index, field) in fields.into_iter().enumerate() {
        let span = field.span();
        let field_options = parse_field_options(&field.attrs)?;
        let readable =
            options.include_private || matches!(field.vis, syn::Visibility::Public(_));

        let phantom = is_phantom_data(&field.ty);

        if field_options.is_annotated() {
            if !readable {
                return Err(syn::Error::new(
                    field_options.marker_span.unwrap_or(span),
                    "attributes on a private field have no effect: make the field `pub` \
                    or add #[log_fields(include_private)] to the type",
                ));
            }
            if phantom {
                return Err(syn::Error::new(
                    field_options.marker_span.unwrap_or(span),
                    "attributes on a `PhantomData` field have no effect: it is never logged",
                ));
            }
        }
        if field_options.skip || phantom || !readable {
            continue;
        }

        let access = field.ident.clone().map_or_else(
            || syn::Member::Unnamed(syn::Index::from(index)),
            syn::Member::Named,
        );
        let name = field_options.rename.clone().unwrap_or_else(|| {
            let default_name = field
                .ident
                .as_ref()
                .map_or_else(|| index.to_string(), |ident| ident.unraw().to_string());
            LitStr::new(&default_name, span)
        });

        if !names.insert(name.value()) {
            return Err(syn::Error::new(
                name.span(),
                format!("duplicate log field name `{}`", name.value()),
            ));
        }

        let member = Member {
            access,
            name,
            ty: &field.ty,
            read: field_options.read,
            marker: field_options.marker,
            span,
        };
        registrations.push(generate_member_registration(&mut ctx, &member));
    }

    Ok(StructDeriveOutput {
        describe_body: quote! {
            #(#registrations)*
        },
        value_generics,
        debug_generics,
        display_generics,
    })
}
