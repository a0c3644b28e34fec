//! Rule library.
//!
//! A [`RuleLibrary`] maps rule names to [`RuleDefinition`]s: the check itself,
//! its priority (lower runs first) and whether it is a boolean directive (a
//! rule whose missing config means `true`, so a bare `required` reads as
//! `required = true`).
//!
//! [`RuleLibrary::builtin`] carries the standard rules. More can be added with
//! [`RuleLibrary::register`].
//!
//! # Example
//!
//! ```ignore
//! use formstate::rules::{RuleDefinition, RuleLibrary};
//! use formstate::value::Value;
//!
//! let mut library = RuleLibrary::builtin();
//! library.register(RuleDefinition::new("even", 50, |value, _config| {
//!     Ok(value.coerce_number() % 2.0 == 0.0)
//! }));
//! ```

pub mod builtin;
pub mod types;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::RuleError;
use crate::value::Value;

pub const REQUIRED: &str = "required";
pub const TYPE: &str = "type";
pub const LENGTH: &str = "length";
pub const MIN_LENGTH: &str = "minLength";
pub const MAX_LENGTH: &str = "maxLength";
pub const MIN: &str = "min";
pub const MAX: &str = "max";
pub const PATTERN: &str = "pattern";
pub const CUSTOM: &str = "custom";

/// A rule check: `(value, config) -> valid?`.
pub type RuleFn = Arc<dyn Fn(&Value, &Value) -> Result<bool, RuleError> + Send + Sync>;

/// A named rule with its priority and directive semantics.
#[derive(Clone)]
pub struct RuleDefinition {
    name: String,
    priority: i32,
    boolean_directive: bool,
    check: RuleFn,
}

impl RuleDefinition {
    /// Define a rule. The name is normalized to camelCase.
    pub fn new<F>(name: impl AsRef<str>, priority: i32, check: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<bool, RuleError> + Send + Sync + 'static,
    {
        Self {
            name: to_camel_case(name.as_ref()),
            priority,
            boolean_directive: false,
            check: Arc::new(check),
        }
    }

    /// Mark this rule as a boolean directive.
    pub fn boolean_directive(mut self) -> Self {
        self.boolean_directive = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn is_boolean_directive(&self) -> bool {
        self.boolean_directive
    }

    /// Shared handle to the check function.
    pub fn check(&self) -> RuleFn {
        Arc::clone(&self.check)
    }

    /// Run the check.
    pub fn evaluate(&self, value: &Value, config: &Value) -> Result<bool, RuleError> {
        (self.check)(value, config)
    }

    /// Apply the boolean-directive default: an undefined config becomes `true`.
    pub fn normalize_config(&self, config: Value) -> Value {
        if self.boolean_directive && config.is_undefined() {
            Value::Bool(true)
        } else {
            config
        }
    }
}

impl fmt::Debug for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDefinition")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("boolean_directive", &self.boolean_directive)
            .finish_non_exhaustive()
    }
}

/// Registry of rule definitions keyed by name.
#[derive(Debug, Clone)]
pub struct RuleLibrary {
    rules: HashMap<String, RuleDefinition>,
}

impl RuleLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// A library holding the built-in rules.
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.register(RuleDefinition::new(REQUIRED, 1, builtin::required).boolean_directive());
        library.register(RuleDefinition::new(TYPE, 2, builtin::type_format));
        library.register(RuleDefinition::new(LENGTH, 3, builtin::length));
        library.register(RuleDefinition::new(MIN_LENGTH, 4, builtin::min_length));
        library.register(RuleDefinition::new(MAX_LENGTH, 5, builtin::max_length));
        library.register(RuleDefinition::new(MIN, 6, builtin::min));
        library.register(RuleDefinition::new(MAX, 7, builtin::max));
        library.register(RuleDefinition::new(PATTERN, 100, builtin::pattern));
        library.register(RuleDefinition::new(CUSTOM, 200, builtin::custom));
        library
    }

    /// Add a rule, returning the definition it replaced.
    pub fn register(&mut self, definition: RuleDefinition) -> Option<RuleDefinition> {
        self.rules.insert(definition.name.clone(), definition)
    }

    /// Look up a rule. Accepts kebab-case names (`min-length`).
    pub fn get(&self, name: &str) -> Option<&RuleDefinition> {
        self.rules.get(&to_camel_case(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Priority of a rule, if registered.
    pub fn priority(&self, name: &str) -> Option<i32> {
        self.get(name).map(RuleDefinition::priority)
    }

    /// Registered rule names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `min-length` → `minLength`. Names without dashes pass through.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-'
            && let Some(next) = chars.peek().copied().filter(char::is_ascii_alphabetic)
        {
            out.push(next.to_ascii_uppercase());
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}
