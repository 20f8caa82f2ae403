//! JSON rendering of param lists.
//!
//! Produces the flat `{ "name": value }` shape most JSON log sinks expect.
//! Sensitivity is not part of that shape; serialize [`Param`] directly to keep
//! it.

use serde_json::{Map, Value as JsonValue};

use crate::{Param, ParamValue};

impl ParamValue {
    /// Converts the value into a `serde_json::Value`.
    ///
    /// Non-finite floats become `null`.
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}

/// Renders params as a JSON object keyed by param name.
pub fn params_to_json(params: &[Param]) -> JsonValue {
    let mut object = Map::with_capacity(params.len());
    for param in params {
        object.insert(param.name.to_owned(), param.value.to_json());
    }
    JsonValue::Object(object)
}
