use std::fmt;

use crate::rules::{RuleDefinition, RuleFn};
use crate::value::Value;

/// A rule attached to one field.
pub struct RuleInstance {
    pub(crate) name: String,
    pub(crate) priority: i32,
    pub(crate) config: Value,
    /// Whether the rule failed on its last evaluation.
    pub(crate) failing: bool,
    pub(crate) check: RuleFn,
}

impl RuleInstance {
    pub(crate) fn new(definition: &RuleDefinition, config: Value) -> Self {
        Self {
            name: definition.name().to_string(),
            priority: definition.priority(),
            config,
            failing: false,
            check: definition.check(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn config(&self) -> &Value {
        &self.config
    }

    /// The per-rule flag: `true` while the rule is failing.
    pub fn is_failing(&self) -> bool {
        self.failing
    }
}

impl fmt::Debug for RuleInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleInstance")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("config", &self.config)
            .field("failing", &self.failing)
            .finish_non_exhaustive()
    }
}
