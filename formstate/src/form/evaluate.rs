//! Rule evaluation.

use log::trace;

use crate::error::{FormError, RuleError};
use crate::field::Field;
use crate::rules::CUSTOM;
use crate::value::Value;

use super::FormValidationState;

impl FormValidationState {
    /// Run every rule of one field against its current value.
    ///
    /// Does not aggregate. A rule error aborts the pass and the flags written
    /// before it are kept: evaluation is not transactional.
    pub fn evaluate(&mut self, field: &str) -> Result<(), FormError> {
        let target = self
            .fields
            .get_mut(field)
            .ok_or_else(|| FormError::unknown_field(field))?;
        evaluate_field(target).map_err(|source| FormError::Rule {
            field: field.to_string(),
            source,
        })
    }

    /// Evaluate every field in registration order, then aggregate once.
    pub fn evaluate_all(&mut self) -> Result<(), FormError> {
        self.check_validity(None, false)
    }

    /// Evaluate one field (or all of them with `None`) and aggregate unless
    /// `suppress_aggregation` is set.
    pub fn check_validity(
        &mut self,
        field: Option<&str>,
        suppress_aggregation: bool,
    ) -> Result<(), FormError> {
        match field {
            Some(name) => self.evaluate(name)?,
            None => {
                // Snapshot of names: the list may change under host callbacks.
                for name in self.order.clone() {
                    if self.fields.contains_key(&name) {
                        self.evaluate(&name)?;
                    }
                }
            }
        }
        if !suppress_aggregation {
            self.derive_aggregate_status();
        }
        Ok(())
    }
}

fn evaluate_field(field: &mut Field) -> Result<(), RuleError> {
    field.status.invalid = false;

    for rule in &mut field.rules {
        // Only rules after the first failure get their stale flag cleared up front.
        if field.status.invalid {
            rule.failing = false;
        }

        let mut valid = (rule.check)(&field.value, &rule.config)?;
        if rule.name == CUSTOM {
            field.custom_code = Some(rule.config.clone());
            valid = matches!(rule.config, Value::Bool(true));
        }
        trace!(
            "field '{}' rule '{}' -> {}",
            field.name,
            rule.name,
            if valid { "valid" } else { "invalid" }
        );

        rule.failing = !valid;
        if !valid {
            field.status.invalid = true;
        }
    }

    field.status.valid = !field.status.invalid;
    Ok(())
}
