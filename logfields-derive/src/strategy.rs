//! Parsing of field attributes.
//!
//! This module maps `#[sensitive(...)]` and `#[log_fields(...)]` field syntax
//! to descriptor decisions and produces structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, LitBool, LitStr, Meta, Result};

/// How a field's value is captured.
///
/// ## Strategy Mapping
///
/// | Attribute | Strategy | Generated read |
/// |-----------|----------|----------------|
/// | None | `Value` | `ToParamValue::to_param_value(&field)` |
/// | `#[log_fields(debug)]` | `Debug` | `ParamValue::debug(&field)` |
/// | `#[log_fields(display)]` | `Display` | `ParamValue::display(&field)` |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ReadStrategy {
    Value,
    Debug,
    Display,
}

/// Everything the field attributes say about one field.
#[derive(Clone, Debug)]
pub(crate) struct FieldOptions {
    /// `#[log_fields(skip)]`: never a member.
    pub(crate) skip: bool,
    /// `#[log_fields(rename = "...")]`: member name override.
    pub(crate) rename: Option<LitStr>,
    pub(crate) read: ReadStrategy,
    /// `None` without `#[sensitive]`, otherwise the marker's `secretive` flag.
    pub(crate) marker: Option<bool>,
    /// Span of the `#[sensitive]` attribute, for diagnostics.
    pub(crate) marker_span: Option<Span>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            skip: false,
            rename: None,
            read: ReadStrategy::Value,
            marker: None,
            marker_span: None,
        }
    }
}

impl FieldOptions {
    /// Returns `true` when any attribute of ours is present on the field.
    pub(crate) fn is_annotated(&self) -> bool {
        self.skip
            || self.rename.is_some()
            || self.read != ReadStrategy::Value
            || self.marker.is_some()
    }
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs {
        if attr.path().is_ident("sensitive") {
            parse_sensitive(attr, &mut options)?;
        } else if attr.path().is_ident("log_fields") {
            parse_log_fields(attr, &mut options)?;
        }
    }
    Ok(options)
}

fn parse_sensitive(attr: &Attribute, options: &mut FieldOptions) -> Result<()> {
    if options.marker.is_some() {
        return Err(syn::Error::new(
            attr.span(),
            "multiple #[sensitive] attributes specified on the same field",
        ));
    }

    let secretive = match &attr.meta {
        // Bare #[sensitive] is the non-secretive level
        Meta::Path(_) => false,
        Meta::List(list) => {
            let mut secretive = None;
            list.parse_nested_meta(|meta| {
                if !meta.path.is_ident("secretive") {
                    return Err(meta.error(format!(
                        "unknown #[sensitive] option `{}`; expected `secretive`",
                        meta.path
                            .get_ident()
                            .map_or_else(|| "?".to_string(), ToString::to_string)
                    )));
                }
                if secretive.is_some() {
                    return Err(meta.error("`secretive` specified more than once"));
                }
                let value = if meta.input.peek(syn::Token![=]) {
                    meta.value()?.parse::<LitBool>()?.value
                } else {
                    true
                };
                secretive = Some(value);
                Ok(())
            })?;
            secretive.unwrap_or(false)
        }
        Meta::NameValue(_) => {
            return Err(syn::Error::new(
                attr.span(),
                "name-value syntax is not supported for #[sensitive]; use #[sensitive(secretive = true)]",
            ));
        }
    };

    options.marker = Some(secretive);
    options.marker_span = Some(attr.span());
    Ok(())
}

fn parse_log_fields(attr: &Attribute, options: &mut FieldOptions) -> Result<()> {
    let Meta::List(list) = &attr.meta else {
        return Err(syn::Error::new(
            attr.span(),
            "expected a list of options, e.g. #[log_fields(skip)]",
        ));
    };

    list.parse_nested_meta(|meta| {
        if meta.path.is_ident("skip") {
            options.skip = true;
            Ok(())
        } else if meta.path.is_ident("rename") {
            if options.rename.is_some() {
                return Err(meta.error("`rename` specified more than once"));
            }
            let name: LitStr = meta.value()?.parse()?;
            if name.value().is_empty() {
                return Err(syn::Error::new(name.span(), "`rename` must not be empty"));
            }
            options.rename = Some(name);
            Ok(())
        } else if meta.path.is_ident("debug") {
            set_read(options, ReadStrategy::Debug, meta.path.span())
        } else if meta.path.is_ident("display") {
            set_read(options, ReadStrategy::Display, meta.path.span())
        } else {
            Err(meta.error(format!(
                "unknown field option `{}`; expected `skip`, `rename`, `debug` or `display`",
                meta.path
                    .get_ident()
                    .map_or_else(|| "?".to_string(), ToString::to_string)
            )))
        }
    })
}

fn set_read(options: &mut FieldOptions, read: ReadStrategy, span: Span) -> Result<()> {
    if options.read != ReadStrategy::Value {
        return Err(syn::Error::new(
            span,
            "`debug` and `display` are mutually exclusive and may appear once",
        ));
    }
    options.read = read;
    Ok(())
}
