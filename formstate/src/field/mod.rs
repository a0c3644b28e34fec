//! Field records.
//!
//! A [`Field`] is the per-name validation state: current, previous and
//! original value, the seven status flags, the attached rules in evaluation
//! order, and the host listeners it owns.
//!
//! Fields are owned by a [`FormValidationState`](crate::form::FormValidationState)
//! and are read-only from the outside; all writes go through the form.

mod flags;
mod rule_instance;

pub use flags::{FIELD_LIST_KEY, Flag, StatusFlags, is_reserved};
pub use rule_instance::RuleInstance;

use crate::binding::{Binding, ListenerHandle};
use crate::value::Value;

/// Validation state of one named field.
#[derive(Debug)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) binding: Binding,
    pub(crate) value: Value,
    pub(crate) previous_value: Value,
    pub(crate) origin_value: Value,
    pub(crate) initialized: bool,
    pub(crate) status: StatusFlags,
    /// Sorted by priority, ties in attachment order.
    pub(crate) rules: Vec<RuleInstance>,
    /// Raw config last seen by the `custom` rule.
    pub(crate) custom_code: Option<Value>,
    pub(crate) listeners: Vec<ListenerHandle>,
    pub(crate) related: Option<ListenerHandle>,
}

impl Field {
    pub(crate) fn new(name: &str, initial: Value, binding: Binding) -> Self {
        Self {
            name: name.to_string(),
            binding,
            previous_value: initial.clone(),
            origin_value: initial.clone(),
            value: initial,
            initialized: false,
            status: StatusFlags::INITIAL,
            rules: Vec::new(),
            custom_code: None,
            listeners: Vec::new(),
            related: None,
        }
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn previous_value(&self) -> &Value {
        &self.previous_value
    }

    pub fn origin_value(&self) -> &Value {
        &self.origin_value
    }

    /// Whether a value change has been observed since registration.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn status(&self) -> &StatusFlags {
        &self.status
    }

    pub fn is_invalid(&self) -> bool {
        self.status.invalid
    }

    pub fn is_valid(&self) -> bool {
        self.status.valid
    }

    /// Attached rules in evaluation order.
    pub fn rules(&self) -> &[RuleInstance] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&RuleInstance> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// The per-rule flag for an attached rule.
    pub fn rule_flag(&self, name: &str) -> Option<bool> {
        self.rule(name).map(RuleInstance::is_failing)
    }

    /// A status flag or per-rule flag by name.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match name.parse::<Flag>() {
            Ok(flag) => Some(self.status.get(flag)),
            Err(()) => self.rule_flag(name),
        }
    }

    /// Raw result last handed to the `custom` rule.
    pub fn custom_code(&self) -> Option<&Value> {
        self.custom_code.as_ref()
    }

    /// Number of host listener handles the field holds, related trigger included.
    pub fn listener_count(&self) -> usize {
        self.listeners.len() + usize::from(self.related.is_some())
    }

    pub fn has_related(&self) -> bool {
        self.related.is_some()
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Insert a rule unless one with the same name is attached.
    ///
    /// Returns whether the rule was inserted.
    pub(crate) fn attach(&mut self, instance: RuleInstance) -> bool {
        if self.rule(&instance.name).is_some() {
            return false;
        }
        self.rules.push(instance);
        // Stable sort keeps attachment order among equal priorities.
        self.rules.sort_by_key(|rule| rule.priority);
        true
    }

    pub(crate) fn detach(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.name != name);
        self.rules.len() != before
    }

    pub(crate) fn rule_mut(&mut self, name: &str) -> Option<&mut RuleInstance> {
        self.rules.iter_mut().find(|rule| rule.name == name)
    }

    /// Record a new value and recompute pristine/modified/dirty against the origin.
    pub(crate) fn apply_value_change(&mut self, new_value: Value, old_value: Value) {
        self.previous_value = old_value;
        self.value = new_value;
        self.initialized = true;

        if self.value.strict_eq(&self.origin_value) {
            self.status.pristine = true;
            self.status.modified = false;
        } else {
            self.status.pristine = false;
            self.status.modified = true;
            self.status.dirty = true;
        }
    }

    /// `untouched` → `touched`. No-op once touched.
    pub(crate) fn mark_touched(&mut self) {
        if self.status.untouched {
            self.status.untouched = false;
            self.status.touched = true;
        }
    }

    /// Back to the initial flags with every rule flag cleared.
    pub(crate) fn reset_status(&mut self) {
        self.status = StatusFlags::INITIAL;
        for rule in &mut self.rules {
            rule.failing = false;
        }
    }

    pub(crate) fn push_listener(&mut self, handle: ListenerHandle) {
        self.listeners.push(handle);
    }

    /// Install the related trigger, returning the one it replaces.
    pub(crate) fn replace_related(&mut self, handle: ListenerHandle) -> Option<ListenerHandle> {
        self.related.replace(handle)
    }

    /// Release every listener handle the field owns.
    pub(crate) fn release_listeners(&mut self) {
        for handle in self.listeners.drain(..) {
            handle.release();
        }
        if let Some(related) = self.related.take() {
            related.release();
        }
    }
}
