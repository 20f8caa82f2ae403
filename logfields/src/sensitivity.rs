//! Sensitivity classification for logged fields.
//!
//! A field's classification is resolved once, when its type's descriptors are
//! built, from the `#[sensitive(...)]` marker on the field. Nothing here masks
//! or drops values; consumers decide what to do with each level.

use std::fmt;

/// How carefully a logged field must be handled downstream.
///
/// Levels are ordered from least to most sensitive, so consumers can filter
/// with a threshold (`param.sensitivity <= Sensitivity::Sensitive`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum Sensitivity {
    /// No marker on the field.
    #[default]
    None,
    /// Marked `#[sensitive]` or `#[sensitive(secretive = false)]`.
    Sensitive,
    /// Marked `#[sensitive(secretive)]` or `#[sensitive(secretive = true)]`.
    Secretive,
}

impl Sensitivity {
    /// Resolves the classification of a field from its declared marker.
    ///
    /// `None` means the field carries no marker. `Some(secretive)` is the
    /// marker's configured flag.
    #[must_use]
    pub const fn from_marker(marker: Option<bool>) -> Self {
        match marker {
            None => Self::None,
            Some(false) => Self::Sensitive,
            Some(true) => Self::Secretive,
        }
    }

    /// Returns `true` for any level above [`Sensitivity::None`].
    #[must_use]
    pub const fn is_marked(self) -> bool {
        !matches!(self, Self::None)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sensitive => "sensitive",
            Self::Secretive => "secretive",
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
