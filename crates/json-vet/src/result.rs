//! Validation outcome types: the flat error list and its records.

use std::fmt;

use crate::context::Context;

/// The keyword family an error originated from.
///
/// Mostly diagnostic, but `Dependencies` is load-bearing: the `oneOf`
/// mutual-exclusion policy treats a branch whose failures are all
/// dependency-related as merely "guarded off", not invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Required,
    Type,
    Enum,
    Format,
    Range,
    Divisor,
    Length,
    Pattern,
    Items,
    AdditionalItems,
    UniqueItems,
    Size,
    AdditionalProperties,
    Dependencies,
    AllOf,
    OneOf,
    Not,
}

/// One validation failure, addressed to the sub-instance that failed.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Property path of the failing sub-instance (`instance.items[2].name`).
    pub property: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// Keyword family the failure came from.
    pub kind: ErrorKind,
    /// Child errors carried by wrapping shapes (`allOf`, schema-valued
    /// dependencies); empty for plain failures.
    pub nested: Vec<ValidationError>,
}

impl ValidationError {
    /// Plain failure at the context's current path.
    pub(crate) fn at(ctx: &Context, kind: ErrorKind, message: impl Into<String>) -> Self {
        ValidationError {
            property: ctx.path().to_string(),
            message: message.into(),
            kind,
            nested: Vec::new(),
        }
    }

    /// Failure addressed to a named property below the context's path.
    pub(crate) fn at_property(
        ctx: &Context,
        name: &str,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        ValidationError {
            property: format!("{}.{}", ctx.path(), name),
            message: message.into(),
            kind,
            nested: Vec::new(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.property, self.message)?;
        for nested in &self.nested {
            write!(f, "\n  {}", nested)?;
        }
        Ok(())
    }
}

/// Accumulated outcome of one validation call.
///
/// A successful validation is a result with an empty error list; there is no
/// separate "no error" sentinel. Child results are merged in flat via
/// [`import`](ValidationResult::import), with paths already prefixed, so the
/// final list needs no re-addressing at any level.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        ValidationResult::default()
    }

    /// True iff no violations were recorded.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The violations, in keyword order then branch order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub(crate) fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Appends another result's errors, preserving their order. Errors are
    /// merged, never re-wrapped.
    pub fn import(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    pub(crate) fn take_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Renders a human-readable report, one line per error.
    pub fn summary(&self) -> String {
        if self.valid() {
            return "valid".to_string();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
