//! Host event entry points.

use log::debug;

use crate::error::FormError;
use crate::value::Value;

use super::FormValidationState;

impl FormValidationState {
    /// The bound value changed from `old_value` to `new_value`.
    ///
    /// Once the field has seen a change, a call where both values are strictly
    /// equal does nothing. Otherwise the value is recorded, pristine/dirty/
    /// modified are recomputed against the origin, toggles and non-form
    /// elements become touched, and the field is evaluated and aggregated.
    pub fn on_value_change(
        &mut self,
        field: &str,
        new_value: impl Into<Value>,
        old_value: impl Into<Value>,
    ) -> Result<(), FormError> {
        let (new_value, old_value) = (new_value.into(), old_value.into());
        let target = self
            .fields
            .get_mut(field)
            .ok_or_else(|| FormError::unknown_field(field))?;

        if target.initialized && new_value.strict_eq(&old_value) {
            return Ok(());
        }

        target.apply_value_change(new_value, old_value);
        if target.binding.kind().touches_on_change() {
            target.mark_touched();
        }

        self.check_validity(Some(field), false)
    }

    /// The bound element gained focus: soft-reset the field's flags.
    pub fn on_focus(&mut self, field: &str) -> Result<(), FormError> {
        self.fields
            .get_mut(field)
            .ok_or_else(|| FormError::unknown_field(field))?
            .reset_status();
        debug!("[{}] field '{}' reset on focus", self.config.name, field);

        self.derive_aggregate_status();
        Ok(())
    }

    /// The bound element lost focus: mark it touched and re-evaluate.
    pub fn on_blur(&mut self, field: &str) -> Result<(), FormError> {
        self.fields
            .get_mut(field)
            .ok_or_else(|| FormError::unknown_field(field))?
            .mark_touched();

        self.check_validity(Some(field), false)
    }

    /// A value this field depends on changed: re-evaluate without touching
    /// touch or pristine state.
    pub fn on_related_trigger(&mut self, field: &str) -> Result<(), FormError> {
        self.check_validity(Some(field), false)
    }
}
