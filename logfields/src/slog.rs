//! Adapters for emitting params through `slog`.
//!
//! This module exists to connect extracted [`Param`] lists with `slog`:
//! - [`ParamValue`] implements `slog::Value`, emitting scalars natively and
//!   lists as nested JSON via `slog`'s nested-value support.
//! - [`ParamsKv`] implements `slog::KV` for a param slice, keyed by param name.
//!
//! It does not configure `slog` and does not mask anything. Filtering by
//! sensitivity is opt-in through [`ParamsKv::max_sensitivity`].

use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue, KV};

use crate::{Param, ParamValue, Sensitivity};

impl SlogValue for ParamValue {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        match self {
            ParamValue::Null => serializer.emit_none(key),
            ParamValue::Bool(value) => serializer.emit_bool(key, *value),
            ParamValue::I64(value) => serializer.emit_i64(key, *value),
            ParamValue::U64(value) => serializer.emit_u64(key, *value),
            ParamValue::F64(value) => serializer.emit_f64(key, *value),
            ParamValue::Str(value) => serializer.emit_str(key, value),
            ParamValue::List(_) => {
                let nested = slog::Serde(self.to_json());
                SlogValue::serialize(&nested, record, key, serializer)
            }
        }
    }
}

/// A `slog::KV` over extracted params.
///
/// ## Example
/// ```ignore
/// use logfields::slog::ParamsKv;
///
/// let params = logfields::parse_into_params(&request);
/// let kv = ParamsKv::new(&params).max_sensitivity(Sensitivity::None);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ParamsKv<'a> {
    params: &'a [Param],
    ceiling: Option<Sensitivity>,
}

impl<'a> ParamsKv<'a> {
    /// Emits every param.
    pub fn new(params: &'a [Param]) -> Self {
        Self {
            params,
            ceiling: None,
        }
    }

    /// Leaves out params classified above `ceiling`.
    #[must_use]
    pub fn max_sensitivity(mut self, ceiling: Sensitivity) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    fn admits(&self, param: &Param) -> bool {
        self.ceiling
            .is_none_or(|ceiling| param.sensitivity <= ceiling)
    }
}

impl KV for ParamsKv<'_> {
    fn serialize(&self, record: &Record<'_>, serializer: &mut dyn Serializer) -> SlogResult {
        for param in self.params.iter().filter(|param| self.admits(param)) {
            SlogValue::serialize(&param.value, record, param.name, serializer)?;
        }
        Ok(())
    }
}
