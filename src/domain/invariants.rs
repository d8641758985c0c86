// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Field Invariants
//!
//! Every value object constructor funnels through these functions, so the
//! command service gets a single [`ValidationError`] type for all malformed
//! input regardless of which entity it targets.
//!
//! # Design Principles
//!
//! - **Pure Functions**: No I/O, no mutations, deterministic
//! - **Explicit Errors**: The failing field is always named
//! - **Composable**: Small functions that combine

/// Validation result with detailed error information
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Input rejected by a field invariant
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Required text was empty or whitespace only
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Text exceeded its maximum length (in characters)
    #[error("{field} exceeds maximum length of {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Numeric value was zero or negative
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    /// Numeric value was NaN or infinite
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Empty { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::NotFinite { field } => field,
        }
    }
}

/// Trim and check that text is non-empty and within `max` characters
pub fn validate_text(field: &'static str, value: &str, max: usize) -> ValidationResult<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    let length = trimmed.chars().count();
    if length > max {
        return Err(ValidationError::TooLong {
            field,
            max,
            actual: length,
        });
    }

    Ok(trimmed.to_string())
}

/// Check that a quantity is a finite number greater than zero
pub fn validate_positive(field: &'static str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }

    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field, value });
    }

    Ok(value)
}
