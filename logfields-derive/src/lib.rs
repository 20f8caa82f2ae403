//! Derive macros for `logfields`.
//!
//! This crate generates the `describe` function behind `#[derive(LogFields)]`.
//! It:
//! - reads `#[sensitive(...)]` and `#[log_fields(...)]` attributes
//! - emits a `LogFields` implementation that registers one accessor per member
//!
//! It does **not** cache anything. Metadata is built and cached at runtime by
//! the main `logfields` crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Result, TypeParamBound};

mod accessor;
mod container;
mod derive_struct;
mod generics;
mod strategy;
mod types;
use container::parse_container_options;
use derive_struct::derive_struct;
use generics::{add_bounds, add_static_bounds, reject_lifetimes};

/// Derives `logfields::LogFields` for structs.
///
/// # Members
///
/// Every `pub` field is a member, in declaration order. Tuple fields are named
/// by their index (`"0"`, `"1"`, ...). Raw identifiers lose their `r#` prefix.
/// `PhantomData` fields are never members.
///
/// # Container Attributes
///
/// - `#[log_fields(include_private)]` - Make every field a member, not only `pub` ones.
///
/// # Field Attributes
///
/// - **No annotation**: The member is not sensitive. Its value is read with
///   `ToParamValue`.
/// - `#[sensitive]` or `#[sensitive(secretive = false)]`: The member is `Sensitive`.
/// - `#[sensitive(secretive)]` or `#[sensitive(secretive = true)]`: The member is `Secretive`.
/// - `#[log_fields(skip)]`: The field is not a member.
/// - `#[log_fields(rename = "name")]`: The member is registered under `name`.
/// - `#[log_fields(debug)]` / `#[log_fields(display)]`: The value is captured as
///   a string using the field's `Debug` or `Display` impl instead of `ToParamValue`.
///   A formatter error drops that one param from the event.
///
/// Duplicate member names are compile errors, as are attributes on fields that
/// can never be members (private fields without `include_private`, `PhantomData`).
/// Enums, unions and types with lifetime parameters are rejected.
#[proc_macro_derive(LogFields, attributes(sensitive, log_fields))]
pub fn derive_log_fields(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the logfields crate root.
///
/// Handles crate renaming (e.g., `fields = { package = "logfields", ... }`).
/// The crate itself declares `extern crate self as logfields`, so internal
/// usage resolves through `::logfields` as well.
fn crate_root() -> TokenStream {
    match crate_name("logfields") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::logfields },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item_path = syn::parse_str::<syn::Path>(item).expect("logfields crate path should parse");
    quote! { #root::#item_path }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let options = parse_container_options(&attrs)?;
    reject_lifetimes(&generics)?;

    let output = match &data {
        Data::Struct(data) => derive_struct(data, &generics, &options)?,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "`LogFields` can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "`LogFields` can only be derived for structs",
            ));
        }
    };

    let crate_root = crate_root();
    let to_param_value = crate_path("ToParamValue");
    let value_bound: TypeParamBound = parse_quote!(#to_param_value);
    let debug_bound: TypeParamBound = parse_quote!(::core::fmt::Debug);
    let display_bound: TypeParamBound = parse_quote!(::core::fmt::Display);

    let bounded = add_static_bounds(generics);
    let bounded = add_bounds(bounded, &output.value_generics, &value_bound);
    let bounded = add_bounds(bounded, &output.debug_generics, &debug_bound);
    let bounded = add_bounds(bounded, &output.display_generics, &display_bound);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();
    let describe_body = &output.describe_body;

    Ok(quote! {
        impl #impl_generics #crate_root::LogFields for #ident #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn describe(builder: &mut #crate_root::DescriptorBuilder<Self>) {
                #describe_body
            }
        }
    })
}
