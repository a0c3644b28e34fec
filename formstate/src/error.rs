//! Error types.

use thiserror::Error;

/// Errors returned by form operations.
#[derive(Debug, Error)]
pub enum FormError {
    /// The field name collides with a status flag or the field list key.
    #[error("field name '{name}' is reserved, use another name")]
    ReservedName { name: String },

    /// A second binding tried to claim a field name that is already bound.
    #[error("duplicated validation field name: '{name}'")]
    DuplicateField { name: String },

    /// The field is not registered on this form.
    #[error("field '{name}' is not registered")]
    UnknownField { name: String },

    /// The rule name is not in the form's rule library.
    #[error("rule '{name}' is not registered in the rule library")]
    UnknownRule { name: String },

    /// A rule failed to run. The evaluation pass stopped at this rule and
    /// flags written before it are kept.
    #[error("rule evaluation failed on field '{field}': {source}")]
    Rule {
        field: String,
        #[source]
        source: RuleError,
    },
}

impl FormError {
    pub fn reserved_name(name: impl Into<String>) -> Self {
        Self::ReservedName { name: name.into() }
    }

    pub fn duplicate_field(name: impl Into<String>) -> Self {
        Self::DuplicateField { name: name.into() }
    }

    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }

    pub fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }
}

/// Errors raised while running a single rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A `pattern` config string that does not compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The config has a shape the rule cannot use at all.
    #[error("rule '{rule}' cannot use config {config}")]
    UnsupportedConfig { rule: &'static str, config: String },

    /// Raised by user-registered rules.
    #[error("{0}")]
    Custom(String),
}

impl RuleError {
    /// Convenience constructor for user rules.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}
