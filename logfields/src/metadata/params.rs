//! Per-instance output of an extraction.

use crate::{error::FieldError, ParamValue, Sensitivity};

/// One field of one instance, tagged with its field's sensitivity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Param {
    pub name: &'static str,
    pub value: ParamValue,
    pub sensitivity: Sensitivity,
}

/// Params read from one instance, plus the fields that could not be read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    pub params: Vec<Param>,
    pub errors: Vec<FieldError>,
}

impl Extraction {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            params: Vec::with_capacity(capacity),
            errors: Vec::new(),
        }
    }

    /// Returns `true` when every descriptor produced a param.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_params(self) -> Vec<Param> {
        self.params
    }
}
