//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added only for generics that appear in member fields, and only
//! the bound the field's read strategy needs (`ToParamValue`, `Debug` or
//! `Display`). Every type parameter is additionally bounded by `'static`,
//! since metadata is keyed by `TypeId`.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` fields are never members and are skipped when collecting
//! generics:
//!
//! ```ignore
//! #[derive(LogFields)]
//! pub struct TypedId<T> {
//!     pub id: String,
//!     _marker: PhantomData<T>,  // T should NOT require ToParamValue
//! }
//! ```

use syn::{parse_quote, spanned::Spanned, Ident, Result, TypeParamBound};

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            if let Some(qself) = &path.qself {
                collect_generics_from_type(&qself.ty, generics, result);
            }
            for segment in &path.path.segments {
                if segment.ident == "PhantomData" {
                    return;
                }
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        if let syn::GenericArgument::Type(inner_ty) = arg {
                            collect_generics_from_type(inner_ty, generics, result);
                        }
                    }
                }
            }

            // Only a single-segment path can name a type parameter
            if let Some(ident) = path.path.get_ident() {
                for param in generics.type_params() {
                    if *ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                        result.push(param.ident.clone());
                    }
                }
            }
        }
        syn::Type::Reference(reference) => {
            collect_generics_from_type(&reference.elem, generics, result);
        }
        syn::Type::Slice(slice) => collect_generics_from_type(&slice.elem, generics, result),
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_generics_from_type(elem, generics, result);
            }
        }
        _ => {}
    }
}

/// Adds `bound` to every generic parameter listed in `used_generics`.
pub(crate) fn add_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
    bound: &TypeParamBound,
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(bound.clone());
        }
    }
    generics
}

/// Adds `'static` to every type parameter.
pub(crate) fn add_static_bounds(mut generics: syn::Generics) -> syn::Generics {
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }
    generics
}

/// Rejects lifetime parameters: metadata is keyed by `TypeId`, which needs `'static` types.
pub(crate) fn reject_lifetimes(generics: &syn::Generics) -> Result<()> {
    match generics.lifetimes().next() {
        Some(lifetime) => Err(syn::Error::new(
            lifetime.span(),
            "`LogFields` cannot be derived for types with lifetime parameters",
        )),
        None => Ok(()),
    }
}
