//! Reusable field rules. Each rule is built from a message and an accessor
//! so record types declare their constraints next to their definition.

use super::validation_chain::{ValidationResult, ValidationRule};

/// Fails when the accessed string is empty or whitespace only
pub struct NotBlankRule<T> {
    message: &'static str,
    accessor: fn(&T) -> &str,
}

impl<T> NotBlankRule<T> {
    pub fn new(message: &'static str, accessor: fn(&T) -> &str) -> Self {
        Self { message, accessor }
    }
}

impl<T> ValidationRule<T> for NotBlankRule<T> {
    fn validate(&self, target: &T) -> ValidationResult {
        if (self.accessor)(target).trim().is_empty() {
            ValidationResult::invalid(self.message)
        } else {
            ValidationResult::valid()
        }
    }

    fn rule_name(&self) -> &'static str {
        "NotBlank"
    }
}

/// Reports one violation per blank element
pub struct EachNotBlankRule<T> {
    message: &'static str,
    accessor: fn(&T) -> &[String],
}

impl<T> EachNotBlankRule<T> {
    pub fn new(message: &'static str, accessor: fn(&T) -> &[String]) -> Self {
        Self { message, accessor }
    }
}

impl<T> ValidationRule<T> for EachNotBlankRule<T> {
    fn validate(&self, target: &T) -> ValidationResult {
        (self.accessor)(target)
            .iter()
            .filter(|entry| entry.trim().is_empty())
            .fold(ValidationResult::valid(), |result, _| {
                result.with_error(self.message)
            })
    }

    fn rule_name(&self) -> &'static str {
        "EachNotBlank"
    }
}

/// Fails when an optional field is absent
pub struct RequiredRule<T> {
    message: &'static str,
    is_present: fn(&T) -> bool,
}

impl<T> RequiredRule<T> {
    pub fn new(message: &'static str, is_present: fn(&T) -> bool) -> Self {
        Self {
            message,
            is_present,
        }
    }
}

impl<T> ValidationRule<T> for RequiredRule<T> {
    fn validate(&self, target: &T) -> ValidationResult {
        if (self.is_present)(target) {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(self.message)
        }
    }

    fn rule_name(&self) -> &'static str {
        "Required"
    }
}

/// Numeric lower bound. Absent values pass, pair with [`RequiredRule`].
pub struct LowerBoundRule<T> {
    message: &'static str,
    accessor: fn(&T) -> Option<f64>,
    inclusive: bool,
}

impl<T> LowerBoundRule<T> {
    /// Value must be strictly greater than zero
    pub fn positive(message: &'static str, accessor: fn(&T) -> Option<f64>) -> Self {
        Self {
            message,
            accessor,
            inclusive: false,
        }
    }

    /// Value must be zero or greater
    pub fn non_negative(message: &'static str, accessor: fn(&T) -> Option<f64>) -> Self {
        Self {
            message,
            accessor,
            inclusive: true,
        }
    }
}

impl<T> ValidationRule<T> for LowerBoundRule<T> {
    fn validate(&self, target: &T) -> ValidationResult {
        match (self.accessor)(target) {
            Some(value) if value > 0.0 || (self.inclusive && value == 0.0) => {
                ValidationResult::valid()
            }
            Some(_) => ValidationResult::invalid(self.message),
            None => ValidationResult::valid(),
        }
    }

    fn rule_name(&self) -> &'static str {
        if self.inclusive {
            "NonNegative"
        } else {
            "Positive"
        }
    }
}
