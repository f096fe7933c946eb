use crate::shared::errors::{AppError, AppResult};
use std::sync::Arc;

/// Result of a validation rule check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![error.into()],
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.errors.push(error.into());
        self.is_valid = false;
        self
    }

    /// Merge two validation results
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self.is_valid = self.is_valid && other.is_valid;
        self
    }

    /// Sorted rule messages joined with `separator`, or `None` when valid.
    ///
    /// The ordering and separator are user-visible.
    pub fn message(&self, separator: &str) -> Option<String> {
        if self.is_valid {
            return None;
        }
        let mut errors = self.errors.clone();
        errors.sort();
        Some(errors.join(separator))
    }

    pub fn into_app_result(self, separator: &str) -> AppResult<()> {
        match self.message(separator) {
            Some(message) => Err(AppError::ValidationError(message)),
            None => Ok(()),
        }
    }
}

/// A single field rule checked against a request body
pub trait ValidationRule<T>: Send + Sync {
    fn validate(&self, target: &T) -> ValidationResult;

    /// Get the name of this validation rule for logging
    fn rule_name(&self) -> &'static str;
}

/// Chain of validation rules, every rule contributes its violations
pub struct ValidationChain<T> {
    rules: Vec<Arc<dyn ValidationRule<T>>>,
}

impl<T> Clone for ValidationChain<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<T> ValidationChain<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a validation rule to the chain
    pub fn add_rule(mut self, rule: Arc<dyn ValidationRule<T>>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Execute all validation rules in the chain
    pub fn validate(&self, target: &T) -> ValidationResult {
        let mut combined_result = ValidationResult::valid();

        for rule in &self.rules {
            let rule_result = rule.validate(target);

            if !rule_result.is_valid {
                log::debug!("Validation rule '{}' failed", rule.rule_name());
            }

            combined_result = combined_result.merge(rule_result);
        }

        combined_result
    }
}

impl<T> Default for ValidationChain<T> {
    fn default() -> Self {
        Self::new()
    }
}
