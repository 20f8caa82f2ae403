//! Descriptor construction.
//!
//! Types describe their readable members through [`LogFields::describe`].
//! `#[derive(LogFields)]` writes that function from the struct definition;
//! hand-written impls can register computed or fallible members.
//!
//! ## Member Registration
//!
//! | Method | Read | Failure |
//! |--------|------|---------|
//! | [`DescriptorBuilder::field`] | `Fn(&T) -> ParamValue` | never fails |
//! | [`DescriptorBuilder::try_field`] | `Fn(&T) -> Result<ParamValue, AccessError>` | per instance |
//! | [`DescriptorBuilder::probe`] | built by a fallible factory | at build time |
//!
//! A member that fails at build time (empty name, duplicate name, failed probe)
//! is left out and recorded on the resulting [`TypeMetadata`]. The other
//! members are unaffected.

use std::{
    any::{type_name, Any, TypeId},
    marker::PhantomData,
};

use super::descriptor::{PropertyDescriptor, TypeMetadata, ValueExtractor};
use crate::{
    error::{AccessError, BuildError},
    ParamValue, Sensitivity,
};

/// Types whose fields can be logged as params.
///
/// Usually derived:
///
/// ```rust
/// use logfields::LogFields;
///
/// #[derive(LogFields)]
/// pub struct Login {
///     pub user: String,
///     #[sensitive(secretive)]
///     pub password: String,
/// }
///
/// let params = logfields::parse_into_params(&Login {
///     user: "ada".into(),
///     password: "hunter2".into(),
/// });
/// assert_eq!(params.len(), 2);
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `LogFields`",
    label = "this type cannot be broken into log params",
    note = "use `#[derive(LogFields)]` on the type definition"
)]
pub trait LogFields: Sized + 'static {
    /// Registers the type's readable members, in order.
    fn describe(builder: &mut DescriptorBuilder<Self>);
}

/// Object-safe view of a [`LogFields`] value whose concrete type is only
/// known at runtime.
///
/// Blanket-implemented for every `LogFields` type.
pub trait AnyLogFields: Any {
    fn as_any(&self) -> &dyn Any;

    /// Builds metadata for the concrete type behind `self`, bypassing any cache.
    fn build_metadata(&self) -> TypeMetadata;
}

impl<T> AnyLogFields for T
where
    T: LogFields,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn build_metadata(&self) -> TypeMetadata {
        build_metadata::<T>()
    }
}

/// Builds the descriptors for `T` without consulting any cache.
pub fn build_metadata<T: LogFields>() -> TypeMetadata {
    let mut builder = DescriptorBuilder::new();
    T::describe(&mut builder);
    let metadata = builder.finish();
    tracing::debug!(
        type_name = metadata.type_name(),
        members = metadata.len(),
        skipped = metadata.skipped().len(),
        "built log field metadata"
    );
    metadata
}

/// Collects the descriptors of `T` during [`LogFields::describe`].
#[derive(Debug)]
pub struct DescriptorBuilder<T> {
    descriptors: Vec<PropertyDescriptor>,
    skipped: Vec<BuildError>,
    _marker: PhantomData<fn(&T)>,
}

impl<T> DescriptorBuilder<T>
where
    T: 'static,
{
    pub(crate) fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            skipped: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Registers a member whose read cannot fail.
    pub fn field<F>(&mut self, name: &'static str, sensitivity: Sensitivity, read: F) -> &mut Self
    where
        F: Fn(&T) -> ParamValue + Send + Sync + 'static,
    {
        self.try_field(name, sensitivity, move |instance: &T| Ok(read(instance)))
    }

    /// Registers a member whose read may fail for some instances.
    pub fn try_field<F>(
        &mut self,
        name: &'static str,
        sensitivity: Sensitivity,
        read: F,
    ) -> &mut Self
    where
        F: Fn(&T) -> Result<ParamValue, AccessError> + Send + Sync + 'static,
    {
        if let Err(error) = self.check_name(name) {
            return self.skip(error);
        }
        self.push(name, sensitivity, ValueExtractor::new(read))
    }

    /// Registers a member whose accessor has to be constructed first.
    ///
    /// `factory` runs once, now. If it fails, the member is skipped.
    pub fn probe<F, R>(
        &mut self,
        name: &'static str,
        sensitivity: Sensitivity,
        factory: F,
    ) -> &mut Self
    where
        F: FnOnce() -> Result<R, BuildError>,
        R: Fn(&T) -> Result<ParamValue, AccessError> + Send + Sync + 'static,
    {
        if let Err(error) = self.check_name(name) {
            return self.skip(error);
        }
        match factory() {
            Ok(read) => self.push(name, sensitivity, ValueExtractor::new(read)),
            Err(error) => self.skip(error),
        }
    }

    /// Number of members registered so far.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub(crate) fn finish(self) -> TypeMetadata {
        TypeMetadata::new(
            TypeId::of::<T>(),
            type_name::<T>(),
            self.descriptors,
            self.skipped,
        )
    }

    fn check_name(&self, name: &'static str) -> Result<(), BuildError> {
        if name.is_empty() {
            return Err(BuildError::EmptyName);
        }
        if self
            .descriptors
            .iter()
            .any(|descriptor| descriptor.name() == name)
        {
            return Err(BuildError::DuplicateName { name });
        }
        Ok(())
    }

    fn push(
        &mut self,
        name: &'static str,
        sensitivity: Sensitivity,
        extractor: ValueExtractor,
    ) -> &mut Self {
        self.descriptors
            .push(PropertyDescriptor::new(name, sensitivity, extractor));
        self
    }

    fn skip(&mut self, error: BuildError) -> &mut Self {
        tracing::warn!(type_name = type_name::<T>(), %error, "skipping log field member");
        self.skipped.push(error);
        self
    }
}
