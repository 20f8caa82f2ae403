//! Cached, sensitivity-tagged field lists for structured logging.
//!
//! This crate turns domain objects (RPC arguments, request payloads) into
//! ordered lists of `(name, value, sensitivity)` params without re-inspecting
//! the type on every log event:
//! - **Descriptors**: each loggable type describes its readable fields once,
//!   producing a name, a bound value accessor and a [`Sensitivity`] per field.
//! - **Cache**: descriptors are memoized per type in a process-wide
//!   [`MetadataCache`] shared by every thread.
//! - **Extraction**: per event, the cached accessors are applied to the
//!   instance to produce [`Param`]s.
//!
//! Key rules:
//! - Derive [`LogFields`] on structs; `pub` fields become params in declaration order.
//! - `#[sensitive]` tags a field [`Sensitivity::Sensitive`];
//!   `#[sensitive(secretive)]` tags it [`Sensitivity::Secretive`].
//! - A field that cannot be described is left out of its type's descriptors; a
//!   field that cannot be read is left out of that one param list. Neither fails
//!   the whole type or the whole event.
//!
//! What this crate does:
//! - classifies fields and surfaces the classification on every param
//! - provides integrations behind feature flags (`serde`, `slog`)
//!
//! What it does not do:
//! - decide whether to log
//! - mask or drop sensitive values; that is the consumer's call
//!
//! The `LogFields` derive macro lives in `logfields-derive` and is re-exported here.

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

pub use logfields_derive::LogFields;

// The derive refers to this crate as `::logfields`, including from inside it.
#[allow(unused_extern_crates)]
extern crate self as logfields;

// Module declarations
mod error;
mod metadata;
#[cfg(feature = "serde")]
mod json;
mod sensitivity;
#[cfg(feature = "slog")]
pub mod slog;
mod value;

// Re-exports
pub use error::{AccessError, BuildError, FieldError};
pub use metadata::{
    build_metadata, extract_metadata, parse_into_params, AnyLogFields, DescriptorBuilder,
    Extraction, LogFields, MetadataCache, Param, PropertyDescriptor, TypeMetadata, ValueExtractor,
};
#[cfg(feature = "serde")]
pub use json::params_to_json;
pub use sensitivity::Sensitivity;
pub use value::{ParamValue, ToParamValue};
