//! Per-type field metadata and its process-wide cache.
//!
//! - **`descriptor`**: what was learned about a type (`PropertyDescriptor`, `TypeMetadata`)
//! - **`builder`**: how it is learned (`LogFields`, `DescriptorBuilder`)
//! - **`cache`**: where it is kept (`MetadataCache`)
//! - **`params`**: what one instance yields (`Param`, `Extraction`)
//!
//! Sensitivity levels live in `crate::sensitivity`, values in `crate::value`.

mod builder;
mod cache;
mod descriptor;
mod params;

pub use builder::{build_metadata, AnyLogFields, DescriptorBuilder, LogFields};
pub use cache::{extract_metadata, parse_into_params, MetadataCache};
pub use descriptor::{PropertyDescriptor, TypeMetadata, ValueExtractor};
pub use params::{Extraction, Param};
