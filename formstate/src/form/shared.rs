use std::sync::{Arc, RwLock};

use crate::config::FormConfig;
use crate::error::FormError;

use super::{FormSnapshot, FormValidationState};

/// Shared handle to a form.
///
/// `SharedForm` wraps a [`FormValidationState`] in `Arc<RwLock<_>>`, making it
/// cheap to clone into the callbacks a host binding layer registers (value
/// watchers, blur listeners, related-value watchers). A poisoned lock is
/// recovered, not propagated.
///
/// Listener release callbacks run while the form is locked for writing and
/// must not use the handle.
///
/// # Example
///
/// ```ignore
/// let form = SharedForm::new(FormValidationState::new());
///
/// let on_blur = {
///     let form = form.clone();
///     move || form.update(|f| f.on_blur("email"))
/// };
/// ```
#[derive(Debug, Clone)]
pub struct SharedForm {
    inner: Arc<RwLock<FormValidationState>>,
}

impl SharedForm {
    /// Share an existing form.
    pub fn new(form: FormValidationState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(form)),
        }
    }

    /// A new empty form with the given config.
    pub fn with_config(config: FormConfig) -> Self {
        Self::new(FormValidationState::with_config(config))
    }

    /// Read the form through a closure.
    pub fn read<R>(&self, f: impl FnOnce(&FormValidationState) -> R) -> R {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    /// Mutate the form through a closure.
    pub fn update<R>(&self, f: impl FnOnce(&mut FormValidationState) -> R) -> R {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }

    /// Snapshot of the current state.
    pub fn snapshot(&self) -> FormSnapshot {
        self.read(FormValidationState::snapshot)
    }

    /// A callback that fires `on_related_trigger` for `field`, for the host
    /// to run whenever the value the field depends on changes.
    pub fn related_trigger(
        &self,
        field: impl Into<String>,
    ) -> impl Fn() -> Result<(), FormError> + Send + Sync + 'static {
        let form = self.clone();
        let field = field.into();
        move || form.update(|f| f.on_related_trigger(&field))
    }
}
