//! Field-state model and rule evaluation for declarative form validation.
//!
//! A host UI layer binds its input nodes to named fields, attaches rules to
//! them, and reports value, focus and blur events. `formstate` keeps each
//! field's validity/touch/dirty flags in sync and folds them into form-wide
//! status.

pub mod binding;
pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod id;
pub mod rules;
pub mod value;

pub use error::{FormError, RuleError};
pub use form::{FormValidationState, SharedForm};

pub mod prelude {
    pub use crate::binding::{Binding, ElementKind, ListenerHandle, ListenerKind};
    pub use crate::config::FormConfig;
    pub use crate::error::{FormError, RuleError};
    pub use crate::field::{Field, Flag, RuleInstance, StatusFlags};
    pub use crate::form::{FieldSnapshot, FormSnapshot, FormValidationState, SharedForm};
    pub use crate::id::{BindingId, FormId};
    pub use crate::rules::{RuleDefinition, RuleLibrary};
    pub use crate::value::{Pattern, Value};
}
