//! Serializable views of a form for display binding.

use serde::Serialize;

use crate::field::{Field, RuleInstance, StatusFlags};
use crate::id::FormId;
use crate::value::Value;

use super::FormValidationState;

/// The whole form: aggregate flags plus every field, in registration order.
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub id: FormId,
    pub name: String,
    #[serde(flatten)]
    pub status: StatusFlags,
    #[serde(rename = "$fields")]
    pub field_names: Vec<String>,
    pub fields: Vec<FieldSnapshot>,
}

impl FormSnapshot {
    pub(crate) fn capture(form: &FormValidationState) -> Self {
        Self {
            id: form.id,
            name: form.config.name.clone(),
            status: form.status,
            field_names: form.order.clone(),
            fields: form.fields().map(FieldSnapshot::capture).collect(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSnapshot> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One field's values, flags and rules.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSnapshot {
    pub name: String,
    pub value: Value,
    pub previous_value: Value,
    pub origin_value: Value,
    pub initialized: bool,
    #[serde(flatten)]
    pub status: StatusFlags,
    pub rules: Vec<RuleSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<Value>,
}

impl FieldSnapshot {
    fn capture(field: &Field) -> Self {
        Self {
            name: field.name.clone(),
            value: field.value.clone(),
            previous_value: field.previous_value.clone(),
            origin_value: field.origin_value.clone(),
            initialized: field.initialized,
            status: field.status,
            rules: field.rules.iter().map(RuleSnapshot::capture).collect(),
            custom_code: field.custom_code.clone(),
        }
    }
}

/// An attached rule and its flag.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSnapshot {
    pub name: String,
    pub priority: i32,
    pub config: Value,
    pub failing: bool,
}

impl RuleSnapshot {
    fn capture(rule: &RuleInstance) -> Self {
        Self {
            name: rule.name.clone(),
            priority: rule.priority,
            config: rule.config.clone(),
            failing: rule.failing,
        }
    }
}
