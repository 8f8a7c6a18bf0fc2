//! Field-level validation shared by the library drafts.
//!
//! Drafts validate on construction so repositories and handlers only ever see
//! values that satisfy the column limits enforced by the schema.

use std::fmt;

/// Reason a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The value is empty once surrounding whitespace is removed.
    Blank,
    /// The value exceeds the maximum number of characters.
    TooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
    /// The value lies outside the accepted numeric range.
    OutOfRange {
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },
    /// A date precedes the date it must follow.
    BeforeStart,
}

impl FieldErrorKind {
    /// Stable machine-readable code used in error details.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::TooLong { .. } => "too_long",
            Self::OutOfRange { .. } => "out_of_range",
            Self::BeforeStart => "before_start",
        }
    }
}

/// A single rejected field together with the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    field: &'static str,
    kind: FieldErrorKind,
}

impl FieldError {
    /// Build an error for `field`.
    #[must_use]
    pub const fn new(field: &'static str, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }

    /// Name of the offending field as it appears on the wire.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Why the field was rejected.
    #[must_use]
    pub const fn kind(&self) -> FieldErrorKind {
        self.kind
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FieldErrorKind::Blank => write!(f, "{} must not be blank", self.field),
            FieldErrorKind::TooLong { max } => {
                write!(f, "{} must be at most {max} characters", self.field)
            }
            FieldErrorKind::OutOfRange { min, max } => {
                write!(f, "{} must be between {min} and {max}", self.field)
            }
            FieldErrorKind::BeforeStart => {
                write!(f, "{} must not precede the start date", self.field)
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// Trim `value` and check it is non-blank and at most `max` characters.
pub(crate) fn bounded_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(field, FieldErrorKind::Blank));
    }
    if trimmed.chars().count() > max {
        return Err(FieldError::new(field, FieldErrorKind::TooLong { max }));
    }
    Ok(trimmed.to_owned())
}

/// Check free text against a length limit, keeping it verbatim.
///
/// Empty values are accepted.
pub(crate) fn limited_text(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, FieldError> {
    if value.chars().count() > max {
        return Err(FieldError::new(field, FieldErrorKind::TooLong { max }));
    }
    Ok(value)
}

/// Check `value` lies within `min..=max`.
pub(crate) fn in_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<i64, FieldError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(FieldError::new(field, FieldErrorKind::OutOfRange { min, max }))
    }
}
