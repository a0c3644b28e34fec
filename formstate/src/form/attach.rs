//! Rule attachment.

use log::debug;

use crate::error::FormError;
use crate::field::RuleInstance;
use crate::rules::to_camel_case;
use crate::value::Value;

use super::FormValidationState;

impl FormValidationState {
    /// Attach a library rule to a field.
    ///
    /// The rule lands in priority order; its flag starts cleared. Attaching a
    /// rule the field already has leaves the field as it is, config included
    /// (use [`update_rule_config`](Self::update_rule_config) for that).
    pub fn attach_rule(
        &mut self,
        field: &str,
        rule: &str,
        config: impl Into<Value>,
    ) -> Result<(), FormError> {
        let rule = to_camel_case(rule);
        let definition = self
            .config
            .library
            .get(&rule)
            .cloned()
            .ok_or_else(|| FormError::unknown_rule(&rule))?;
        let config = definition.normalize_config(config.into());

        let target = self
            .fields
            .get_mut(field)
            .ok_or_else(|| FormError::unknown_field(field))?;
        if !target.attach(RuleInstance::new(&definition, config)) {
            return Ok(());
        }
        debug!(
            "[{}] attached rule '{}' (priority {}) to '{}'",
            self.config.name,
            rule,
            definition.priority(),
            field
        );

        if self.config.evaluate_on_attach {
            self.check_validity(Some(field), false)?;
        }
        Ok(())
    }

    /// Replace the config of an attached rule.
    ///
    /// Does nothing if the field or the rule is not there. The boolean-directive
    /// default applies, so an undefined `required` config becomes `true`.
    pub fn update_rule_config(&mut self, field: &str, rule: &str, config: impl Into<Value>) {
        let rule = to_camel_case(rule);
        let mut config = config.into();
        if let Some(definition) = self.config.library.get(&rule) {
            config = definition.normalize_config(config);
        }
        if let Some(instance) = self
            .fields
            .get_mut(field)
            .and_then(|target| target.rule_mut(&rule))
        {
            instance.config = config;
        }
    }

    /// Detach a rule from a field. Returns whether a rule was removed.
    pub fn detach_rule(&mut self, field: &str, rule: &str) -> bool {
        let rule = to_camel_case(rule);
        self.fields
            .get_mut(field)
            .is_some_and(|target| target.detach(&rule))
    }
}
