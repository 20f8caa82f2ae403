//! Immutable per-type metadata.
//!
//! A [`TypeMetadata`] is the ordered list of [`PropertyDescriptor`]s for one
//! type. Each descriptor owns a [`ValueExtractor`]: a field read bound to the
//! field's identity, never to an instance, so one extractor serves every
//! instance of its type on every thread.

use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};

use super::params::{Extraction, Param};
use crate::{
    error::{AccessError, BuildError, FieldError},
    ParamValue, Sensitivity,
};

type ErasedRead = dyn Fn(&dyn Any) -> Result<ParamValue, AccessError> + Send + Sync;

/// A type-erased field read.
///
/// Cloning shares the underlying closure.
#[derive(Clone)]
pub struct ValueExtractor {
    read: Arc<ErasedRead>,
}

impl ValueExtractor {
    /// Binds a typed read to an erased extractor.
    ///
    /// Applying the result to anything other than a `T` yields
    /// [`AccessError::TypeMismatch`].
    pub fn new<T, F>(read: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> Result<ParamValue, AccessError> + Send + Sync + 'static,
    {
        let expected = std::any::type_name::<T>();
        let erased: Arc<ErasedRead> =
            Arc::new(move |instance: &dyn Any| match instance.downcast_ref::<T>() {
                Some(instance) => read(instance),
                None => Err(AccessError::TypeMismatch { expected }),
            });
        Self { read: erased }
    }

    /// Reads the bound field from `instance`.
    pub fn apply(&self, instance: &dyn Any) -> Result<ParamValue, AccessError> {
        (self.read)(instance)
    }
}

impl fmt::Debug for ValueExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueExtractor").finish_non_exhaustive()
    }
}

/// One readable field of a type.
#[derive(Clone, Debug)]
pub struct PropertyDescriptor {
    name: &'static str,
    sensitivity: Sensitivity,
    extractor: ValueExtractor,
}

impl PropertyDescriptor {
    pub(crate) fn new(
        name: &'static str,
        sensitivity: Sensitivity,
        extractor: ValueExtractor,
    ) -> Self {
        Self {
            name,
            sensitivity,
            extractor,
        }
    }

    /// Field name, unique within its type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn sensitivity(&self) -> Sensitivity {
        self.sensitivity
    }

    pub fn extractor(&self) -> &ValueExtractor {
        &self.extractor
    }

    /// Reads this field from `instance` and tags it.
    pub fn read(&self, instance: &dyn Any) -> Result<Param, AccessError> {
        let value = self.extractor.apply(instance)?;
        Ok(Param {
            name: self.name,
            value,
            sensitivity: self.sensitivity,
        })
    }
}

/// The ordered descriptors of one type, built once and shared.
#[derive(Debug)]
pub struct TypeMetadata {
    type_id: TypeId,
    type_name: &'static str,
    descriptors: Box<[PropertyDescriptor]>,
    skipped: Box<[BuildError]>,
}

impl TypeMetadata {
    pub(crate) fn new(
        type_id: TypeId,
        type_name: &'static str,
        descriptors: Vec<PropertyDescriptor>,
        skipped: Vec<BuildError>,
    ) -> Self {
        Self {
            type_id,
            type_name,
            descriptors: descriptors.into_boxed_slice(),
            skipped: skipped.into_boxed_slice(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Descriptors in their stable enumeration order.
    pub fn descriptors(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    /// Members left out when the metadata was built.
    pub fn skipped(&self) -> &[BuildError] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropertyDescriptor> {
        self.descriptors.iter()
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.descriptors.iter().find(|descriptor| descriptor.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.iter().map(PropertyDescriptor::name)
    }

    /// Applies every descriptor to `instance`, in order.
    ///
    /// A failing read drops that field and is recorded in
    /// [`Extraction::errors`]; the remaining fields are still read.
    pub fn extract(&self, instance: &dyn Any) -> Extraction {
        let mut extraction = Extraction::with_capacity(self.descriptors.len());
        for descriptor in self.descriptors.iter() {
            match descriptor.read(instance) {
                Ok(param) => extraction.params.push(param),
                Err(error) => extraction.errors.push(FieldError {
                    field: descriptor.name,
                    error,
                }),
            }
        }
        extraction
    }
}

impl<'a> IntoIterator for &'a TypeMetadata {
    type Item = &'a PropertyDescriptor;
    type IntoIter = std::slice::Iter<'a, PropertyDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use super::{PropertyDescriptor, TypeMetadata, ValueExtractor};
    use crate::{AccessError, ParamValue, Sensitivity};

    struct Account {
        owner: String,
        balance: i64,
    }

    fn owner_descriptor() -> PropertyDescriptor {
        PropertyDescriptor::new(
            "owner",
            Sensitivity::Sensitive,
            ValueExtractor::new(|account: &Account| Ok(ParamValue::Str(account.owner.clone()))),
        )
    }

    fn balance_descriptor() -> PropertyDescriptor {
        PropertyDescriptor::new(
            "balance",
            Sensitivity::None,
            ValueExtractor::new(|account: &Account| {
                if account.balance < 0 {
                    Err(AccessError::unavailable("overdrawn"))
                } else {
                    Ok(ParamValue::I64(account.balance))
                }
            }),
        )
    }

    fn account_metadata() -> TypeMetadata {
        TypeMetadata::new(
            TypeId::of::<Account>(),
            "Account",
            vec![owner_descriptor(), balance_descriptor()],
            Vec::new(),
        )
    }

    #[test]
    fn extractor_reads_bound_field() {
        let account = Account {
            owner: "ada".into(),
            balance: 3,
        };
        let param = owner_descriptor().read(&account).unwrap();
        assert_eq!(param.name, "owner");
        assert_eq!(param.value, ParamValue::Str("ada".into()));
        assert_eq!(param.sensitivity, Sensitivity::Sensitive);
    }

    #[test]
    fn extractor_rejects_other_types() {
        let err = owner_descriptor().extractor().apply(&7_u32).unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { expected } if expected.ends_with("Account")));
    }

    #[test]
    fn extract_keeps_order_and_skips_failed_reads() {
        let metadata = account_metadata();
        let healthy = Account {
            owner: "ada".into(),
            balance: 10,
        };
        let extraction = metadata.extract(&healthy);
        assert!(extraction.is_complete());
        let names: Vec<_> = extraction.params.iter().map(|param| param.name).collect();
        assert_eq!(names, ["owner", "balance"]);

        let overdrawn = Account {
            owner: "bob".into(),
            balance: -1,
        };
        let extraction = metadata.extract(&overdrawn);
        assert_eq!(extraction.params.len(), 1);
        assert_eq!(extraction.params[0].name, "owner");
        assert_eq!(extraction.errors.len(), 1);
        assert_eq!(extraction.errors[0].field, "balance");
    }

    #[test]
    fn extract_on_wrong_type_yields_no_params() {
        let extraction = account_metadata().extract(&"not an account");
        assert!(extraction.params.is_empty());
        assert_eq!(extraction.errors.len(), 2);
    }

    #[test]
    fn lookup_by_name() {
        let metadata = account_metadata();
        assert_eq!(metadata.len(), 2);
        assert!(metadata.get("balance").is_some());
        assert!(metadata.get("missing").is_none());
        assert_eq!(metadata.names().collect::<Vec<_>>(), ["owner", "balance"]);
        assert_eq!((&metadata).into_iter().count(), 2);
    }
}
