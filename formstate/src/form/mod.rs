//! Form-level validation state.
//!
//! [`FormValidationState`] owns every [`Field`] of one form instance, the
//! order fields were registered in, and the aggregate status folded from
//! them. The host drives it through the registry operations
//! (`register_field`, `attach_rule`, ...) and the event entry points
//! (`on_value_change`, `on_focus`, `on_blur`, `on_related_trigger`).
//!
//! # Example
//!
//! ```ignore
//! use formstate::prelude::*;
//!
//! let mut form = FormValidationState::new();
//! form.register_field("email", "", Binding::control())?;
//! form.attach_rule("email", "required", Value::Undefined)?;
//! form.attach_rule("email", "type", "email")?;
//!
//! form.on_value_change("email", "not-an-email", "")?;
//! assert_eq!(form.field_flag("email", "type"), Some(true));
//! assert!(form.status().invalid);
//! ```

mod aggregate;
mod attach;
mod evaluate;
mod events;
mod registry;
mod shared;
mod snapshot;

pub use shared::SharedForm;
pub use snapshot::{FieldSnapshot, FormSnapshot, RuleSnapshot};

use std::collections::HashMap;

use crate::config::FormConfig;
use crate::field::{Field, Flag, StatusFlags};
use crate::id::FormId;

/// Validation state of one form instance.
#[derive(Debug)]
pub struct FormValidationState {
    id: FormId,
    config: FormConfig,
    fields: HashMap<String, Field>,
    /// Registered field names, in registration order.
    order: Vec<String>,
    status: StatusFlags,
}

impl FormValidationState {
    /// An empty form with the default config.
    pub fn new() -> Self {
        Self::with_config(FormConfig::default())
    }

    /// An empty form with the given config.
    pub fn with_config(config: FormConfig) -> Self {
        Self {
            id: FormId::new(),
            config,
            fields: HashMap::new(),
            order: Vec::new(),
            status: StatusFlags::INITIAL,
        }
    }

    pub fn id(&self) -> FormId {
        self.id
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Aggregate status, as of the last aggregation.
    pub fn status(&self) -> &StatusFlags {
        &self.status
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Registered field names, in registration order.
    pub fn field_names(&self) -> &[String] {
        &self.order
    }

    /// Fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.order.iter().filter_map(|name| self.fields.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Read a status flag or per-rule flag of a field.
    ///
    /// `None` if the field is unknown or carries no flag by that name.
    pub fn field_flag(&self, field: &str, flag: &str) -> Option<bool> {
        self.fields.get(field).and_then(|f| f.flag(flag))
    }

    /// Shorthand for the `invalid` flag of a field.
    pub fn is_invalid(&self, field: &str) -> Option<bool> {
        self.fields.get(field).map(|f| f.status.get(Flag::Invalid))
    }

    /// Serializable view of the whole form.
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::capture(self)
    }
}

impl Default for FormValidationState {
    fn default() -> Self {
        Self::new()
    }
}
