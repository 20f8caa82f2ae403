//! Loggable field values.
//!
//! - [`ParamValue`]: the owned value a field accessor produces
//! - [`ToParamValue`]: conversion from a field's type into a [`ParamValue`]
//!
//! ## Field Handling
//!
//! The derive macro picks the conversion per field:
//!
//! | Annotation | Generated read | Requirement |
//! |------------|----------------|-------------|
//! | None | `ToParamValue::to_param_value(&field)` | `ToParamValue` |
//! | `#[log_fields(debug)]` | `ParamValue::debug(&field)` | `Debug` |
//! | `#[log_fields(display)]` | `ParamValue::display(&field)` | `Display` |
//!
//! ## Foreign types
//!
//! Types from other crates (timestamps, decimals, ids) rarely implement
//! `ToParamValue`. Use the `display` or `debug` read strategy for them rather
//! than a wrapper type.

use std::{borrow::Cow, fmt, rc::Rc, sync::Arc};

use crate::error::AccessError;

/// A field value captured from one instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
    /// Absent value (`None`, `()`).
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Str(String),
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Captures a value through its `Debug` representation.
    ///
    /// A `Debug` impl that returns `fmt::Error` yields
    /// [`AccessError::Unavailable`] instead of a value.
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Result<Self, AccessError> {
        Self::render(format_args!("{value:?}"))
    }

    /// Captures a value through its `Display` representation.
    ///
    /// A `Display` impl that returns `fmt::Error` yields
    /// [`AccessError::Unavailable`] instead of a value.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Result<Self, AccessError> {
        Self::render(format_args!("{value}"))
    }

    fn render(args: fmt::Arguments<'_>) -> Result<Self, AccessError> {
        let mut rendered = String::new();
        fmt::write(&mut rendered, args)
            .map_err(|_| AccessError::unavailable("formatter returned an error"))?;
        Ok(Self::Str(rendered))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as `i64` when it is an integer that fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(value) => Some(*value),
            Self::U64(value) => i64::try_from(*value).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::I64(value) => write!(f, "{value}"),
            Self::U64(value) => write!(f, "{value}"),
            Self::F64(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
            Self::List(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Types whose values can be captured as a [`ParamValue`].
///
/// Field accessors read through a shared reference, so the conversion never
/// consumes or mutates the instance being logged.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be captured as a log field value",
    label = "this field type does not implement `ToParamValue`",
    note = "use `#[log_fields(display)]` or `#[log_fields(debug)]` to capture it as a string",
    note = "or `#[log_fields(skip)]` to leave the field out"
)]
pub trait ToParamValue {
    fn to_param_value(&self) -> ParamValue;
}

macro_rules! impl_to_param_value_as {
    ($variant:ident: $target:ty => $($ty:ty),+ $(,)?) => {
        $(
            impl ToParamValue for $ty {
                fn to_param_value(&self) -> ParamValue {
                    ParamValue::$variant(<$target>::from(*self))
                }
            }
        )+
    };
}

impl_to_param_value_as!(I64: i64 => i8, i16, i32, i64);
impl_to_param_value_as!(U64: u64 => u8, u16, u32, u64);
impl_to_param_value_as!(F64: f64 => f32, f64);
impl_to_param_value_as!(Bool: bool => bool);

impl ToParamValue for isize {
    fn to_param_value(&self) -> ParamValue {
        // isize is at most 64 bits on every supported target
        i64::try_from(*self).map_or_else(|_| ParamValue::Str(self.to_string()), ParamValue::I64)
    }
}

impl ToParamValue for usize {
    fn to_param_value(&self) -> ParamValue {
        u64::try_from(*self).map_or_else(|_| ParamValue::Str(self.to_string()), ParamValue::U64)
    }
}

// 128-bit integers do not fit the numeric variants; keep their exact digits.
impl ToParamValue for i128 {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Str(self.to_string())
    }
}

impl ToParamValue for u128 {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Str(self.to_string())
    }
}

impl ToParamValue for char {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Str(self.to_string())
    }
}

impl ToParamValue for str {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Str(self.to_owned())
    }
}

impl ToParamValue for String {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Str(self.clone())
    }
}

impl ToParamValue for Cow<'_, str> {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Str(self.as_ref().to_owned())
    }
}

impl ToParamValue for () {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Null
    }
}

impl ToParamValue for ParamValue {
    fn to_param_value(&self) -> ParamValue {
        self.clone()
    }
}

impl<T> ToParamValue for Option<T>
where
    T: ToParamValue,
{
    fn to_param_value(&self) -> ParamValue {
        self.as_ref()
            .map_or(ParamValue::Null, ToParamValue::to_param_value)
    }
}

impl<T> ToParamValue for [T]
where
    T: ToParamValue,
{
    fn to_param_value(&self) -> ParamValue {
        ParamValue::List(self.iter().map(ToParamValue::to_param_value).collect())
    }
}

impl<T, const N: usize> ToParamValue for [T; N]
where
    T: ToParamValue,
{
    fn to_param_value(&self) -> ParamValue {
        self.as_slice().to_param_value()
    }
}

impl<T> ToParamValue for Vec<T>
where
    T: ToParamValue,
{
    fn to_param_value(&self) -> ParamValue {
        self.as_slice().to_param_value()
    }
}

macro_rules! impl_to_param_value_deref {
    ($($wrapper:ident),+) => {
        $(
            impl<T> ToParamValue for $wrapper<T>
            where
                T: ToParamValue + ?Sized,
            {
                fn to_param_value(&self) -> ParamValue {
                    (**self).to_param_value()
                }
            }
        )+
    };
}

impl_to_param_value_deref!(Box, Arc, Rc);

impl<T> ToParamValue for &T
where
    T: ToParamValue + ?Sized,
{
    fn to_param_value(&self) -> ParamValue {
        (**self).to_param_value()
    }
}
