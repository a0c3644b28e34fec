//! Form configuration.

use std::sync::Arc;

use crate::rules::RuleLibrary;

/// Per-form configuration.
///
/// # Example
///
/// ```ignore
/// let config = FormConfig::new("signup")
///     .library(my_library)
///     .evaluate_on_attach(true);
/// let form = FormValidationState::with_config(config);
/// ```
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Display name used in log lines and snapshots.
    pub name: String,

    /// Rules available to `attach_rule`. Shared between forms.
    pub library: Arc<RuleLibrary>,

    /// Re-evaluate a field (and aggregate) as soon as a new rule is attached.
    /// Off by default: fields are only evaluated on events and explicit checks.
    pub evaluate_on_attach: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            name: "form".to_string(),
            library: Arc::new(RuleLibrary::builtin()),
            evaluate_on_attach: false,
        }
    }
}

impl FormConfig {
    /// Create a new config with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Use a custom rule library.
    pub fn library(mut self, library: impl Into<Arc<RuleLibrary>>) -> Self {
        self.library = library.into();
        self
    }

    /// Set whether attaching a rule evaluates the field right away.
    pub fn evaluate_on_attach(mut self, enabled: bool) -> Self {
        self.evaluate_on_attach = enabled;
        self
    }
}
