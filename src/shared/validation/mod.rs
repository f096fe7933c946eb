pub mod validation_chain;
pub mod validation_rules;

pub use validation_chain::{ValidationChain, ValidationResult, ValidationRule};
pub use validation_rules::{EachNotBlankRule, LowerBoundRule, NotBlankRule, RequiredRule};
