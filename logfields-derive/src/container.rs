//! Container-level attribute parsing for `#[derive(LogFields)]`.
//!
//! This module handles attributes on the struct itself, not on fields.

use syn::{spanned::Spanned, Attribute, Meta, Result};

/// Options parsed from container-level `#[log_fields(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// If true, non-`pub` fields are members too.
    pub(crate) include_private: bool,
}

/// Parses container-level `#[log_fields(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if attr.path().is_ident("sensitive") {
            return Err(syn::Error::new(
                attr.span(),
                "#[sensitive] marks fields, not types; put it on the fields to classify",
            ));
        }
        if !attr.path().is_ident("log_fields") {
            continue;
        }

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("include_private") {
                        options.include_private = true;
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `include_private`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::Path(_) | Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected a list of options, e.g. #[log_fields(include_private)]",
                ));
            }
        }
    }

    Ok(options)
}
