//! Field registration and listener ownership.

use log::debug;

use crate::binding::{Binding, ListenerHandle};
use crate::error::FormError;
use crate::field::{Field, is_reserved};
use crate::value::Value;

use super::FormValidationState;

impl FormValidationState {
    /// Register a field bound to `binding`.
    ///
    /// Registering a name again with the same binding returns the existing
    /// field untouched. A different binding claiming the name is an error.
    pub fn register_field(
        &mut self,
        name: &str,
        initial_value: impl Into<Value>,
        binding: Binding,
    ) -> Result<&Field, FormError> {
        if is_reserved(name) {
            return Err(FormError::reserved_name(name));
        }

        let claimed_by = self.fields.get(name).map(|field| field.binding.id());
        match claimed_by {
            Some(owner) if owner != binding.id() => {
                return Err(FormError::duplicate_field(name));
            }
            Some(_) => {}
            None => {
                debug!(
                    "[{}] registering field '{}' ({})",
                    self.config.name,
                    name,
                    binding.id()
                );
                self.fields
                    .insert(name.to_string(), Field::new(name, initial_value.into(), binding));
            }
        }

        if !self.order.iter().any(|n| n == name) {
            self.order.push(name.to_string());
        }
        Ok(&self.fields[name])
    }

    /// Remove a field, releasing its listeners, then re-aggregate.
    ///
    /// Unknown names are ignored.
    pub fn unregister_field(&mut self, name: &str) {
        let Some(pos) = self.order.iter().position(|n| n == name) else {
            return;
        };
        self.order.remove(pos);

        if let Some(mut field) = self.fields.remove(name) {
            debug!(
                "[{}] unregistering field '{}', releasing {} listener(s)",
                self.config.name,
                name,
                field.listener_count()
            );
            field.release_listeners();
        }

        self.derive_aggregate_status();
    }

    /// Hand a host listener over to a field. It is released with the field.
    pub fn add_listener(&mut self, field: &str, handle: ListenerHandle) -> Result<(), FormError> {
        self.fields
            .get_mut(field)
            .ok_or_else(|| FormError::unknown_field(field))?
            .push_listener(handle);
        Ok(())
    }

    /// Install the watch that fires `on_related_trigger` for this field.
    ///
    /// A field has at most one; the previous handle is released.
    pub fn set_related(&mut self, field: &str, handle: ListenerHandle) -> Result<(), FormError> {
        let previous = self
            .fields
            .get_mut(field)
            .ok_or_else(|| FormError::unknown_field(field))?
            .replace_related(handle);
        if let Some(previous) = previous {
            previous.release();
        }
        Ok(())
    }
}
