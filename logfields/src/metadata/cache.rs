//! Memoized per-type metadata.
//!
//! ## Concurrency
//!
//! Entries live in a sharded [`DashMap`] keyed by [`TypeId`]. A lookup of a
//! cached type takes one shard read lock and clones an `Arc`. On a miss the
//! metadata is built with no lock held, then inserted first-writer-wins: when
//! several callers race on the same unseen type, each may build, but all of
//! them return the single entry that landed in the map. Entries are inserted
//! only once complete and are never updated or removed.

use std::{
    any::TypeId,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, OnceLock,
    },
};

use dashmap::DashMap;

use super::{
    builder::{build_metadata, AnyLogFields, LogFields},
    descriptor::TypeMetadata,
    params::{Extraction, Param},
};

static GLOBAL: OnceLock<MetadataCache> = OnceLock::new();

/// Type identity to descriptor list table.
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: DashMap<TypeId, Arc<TypeMetadata>>,
    builds: AtomicUsize,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache with room for `capacity` types before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(capacity),
            builds: AtomicUsize::new(0),
        }
    }

    /// The process-wide cache used by [`extract_metadata`] and [`parse_into_params`].
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// Returns the descriptors of `T`, building them on first use.
    pub fn metadata<T: LogFields>(&self) -> Arc<TypeMetadata> {
        self.get_or_build(TypeId::of::<T>(), build_metadata::<T>)
    }

    /// Returns the descriptors of the runtime type behind `instance`.
    pub fn metadata_of(&self, instance: &dyn AnyLogFields) -> Arc<TypeMetadata> {
        self.get_or_build(instance.as_any().type_id(), || instance.build_metadata())
    }

    /// Reads every field of `instance`, reporting the ones that failed.
    pub fn extract<T: LogFields>(&self, instance: &T) -> Extraction {
        self.metadata::<T>().extract(instance)
    }

    /// Reads every readable field of `instance` into ordered params.
    ///
    /// Fields whose read fails are left out; the rest are still returned.
    pub fn parse_into_params<T: LogFields>(&self, instance: &T) -> Vec<Param> {
        report(self.extract(instance))
    }

    /// [`MetadataCache::parse_into_params`] for an instance whose type is only
    /// known at runtime.
    pub fn parse_dyn(&self, instance: &dyn AnyLogFields) -> Vec<Param> {
        report(self.metadata_of(instance).extract(instance.as_any()))
    }

    /// Returns `true` once metadata for `T` has been cached.
    pub fn contains<T: LogFields>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of cached types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of metadata builds so far, including builds that lost an insert race.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    fn get_or_build(
        &self,
        type_id: TypeId,
        build: impl FnOnce() -> TypeMetadata,
    ) -> Arc<TypeMetadata> {
        if let Some(entry) = self.entries.get(&type_id) {
            return Arc::clone(entry.value());
        }

        let built = Arc::new(build());
        self.builds.fetch_add(1, Ordering::Relaxed);
        let entry = self.entries.entry(type_id).or_insert(built);
        Arc::clone(entry.value())
    }
}

fn report(extraction: Extraction) -> Vec<Param> {
    for failure in &extraction.errors {
        tracing::debug!(field = failure.field, error = %failure.error, "dropping unreadable log field");
    }
    extraction.into_params()
}

/// Returns the descriptors of `T` from the process-wide cache.
pub fn extract_metadata<T: LogFields>() -> Arc<TypeMetadata> {
    MetadataCache::global().metadata::<T>()
}

/// Reads `instance` into ordered params through the process-wide cache.
pub fn parse_into_params<T: LogFields>(instance: &T) -> Vec<Param> {
    MetadataCache::global().parse_into_params(instance)
}
