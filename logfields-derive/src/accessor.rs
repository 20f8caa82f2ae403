//! Field accessor generation.
//!
//! Each member becomes one `DescriptorBuilder` registration whose read
//! closure borrows the field from `&Self` and converts it per the field's
//! [`ReadStrategy`]. Formatted reads can fail, so they register through
//! `try_field`.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote_spanned};

use crate::{crate_path, generics::collect_generics_from_type, strategy::ReadStrategy};

/// Generics collected while generating accessors, grouped by the bound they need.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) value_generics: &'a mut Vec<Ident>,
    pub(crate) debug_generics: &'a mut Vec<Ident>,
    pub(crate) display_generics: &'a mut Vec<Ident>,
}

/// One member to register.
pub(crate) struct Member<'a> {
    /// `this.<access>`: a field ident or a tuple index.
    pub(crate) access: syn::Member,
    pub(crate) name: syn::LitStr,
    pub(crate) ty: &'a syn::Type,
    pub(crate) read: ReadStrategy,
    pub(crate) marker: Option<bool>,
    pub(crate) span: Span,
}

/// Generates the registration statement for a single member.
///
/// ## Read Generation
///
/// | Strategy | Registration | Read | Bound on used generics |
/// |----------|--------------|------|------------------------|
/// | `Value` | `field` | `ToParamValue::to_param_value(&this.field)` | `ToParamValue` |
/// | `Debug` | `try_field` | `ParamValue::debug(&this.field)` | `Debug` |
/// | `Display` | `try_field` | `ParamValue::display(&this.field)` | `Display` |
pub(crate) fn generate_member_registration(
    ctx: &mut DeriveContext<'_>,
    member: &Member<'_>,
) -> TokenStream {
    let Member {
        access,
        name,
        ty,
        read,
        marker,
        span,
    } = member;
    let span = *span;

    let (register, read) = match read {
        ReadStrategy::Value => {
            collect_generics_from_type(ty, ctx.generics, ctx.value_generics);
            let to_param_value = crate_path("ToParamValue");
            let read = quote_spanned! { span =>
                #to_param_value::to_param_value(&this.#access)
            };
            (format_ident!("field"), read)
        }
        ReadStrategy::Debug => {
            collect_generics_from_type(ty, ctx.generics, ctx.debug_generics);
            let param_value = crate_path("ParamValue");
            let read = quote_spanned! { span =>
                #param_value::debug(&this.#access)
            };
            (format_ident!("try_field"), read)
        }
        ReadStrategy::Display => {
            collect_generics_from_type(ty, ctx.generics, ctx.display_generics);
            let param_value = crate_path("ParamValue");
            let read = quote_spanned! { span =>
                #param_value::display(&this.#access)
            };
            (format_ident!("try_field"), read)
        }
    };

    let sensitivity = sensitivity_tokens(*marker);
    quote_spanned! { span =>
        builder.#register(#name, #sensitivity, |this: &Self| #read);
    }
}

/// Resolves the marker to a `Sensitivity` variant at expansion time.
fn sensitivity_tokens(marker: Option<bool>) -> TokenStream {
    let variant = match marker {
        None => "None",
        Some(false) => "Sensitive",
        Some(true) => "Secretive",
    };
    crate_path(&format!("Sensitivity::{variant}"))
}
