//! Host binding types.
//!
//! The host UI layer owns the nodes that fields are bound to. The core only
//! sees a [`Binding`] (who claimed the field, and what kind of element it
//! is) and the [`ListenerHandle`]s the host hands over so the field can
//! release them when it goes away.

use std::fmt;

use crate::id::BindingId;

/// The kind of element a field is bound to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ElementKind {
    /// Text-like form control (input, textarea, select). Becomes touched on blur.
    #[default]
    Control,
    /// Checkbox or radio. Has no meaningful blur, becomes touched on change.
    Toggle,
    /// Any non-form node carrying a bound value. Becomes touched on change.
    NonForm,
}

impl ElementKind {
    /// Whether a value change alone marks the field touched.
    pub fn touches_on_change(self) -> bool {
        !matches!(self, Self::Control)
    }
}

/// The host-side node that claims a field name.
///
/// Two bindings are the same claimant iff their IDs are equal; cloning a
/// binding keeps its ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    id: BindingId,
    kind: ElementKind,
}

impl Binding {
    /// Create a binding with a fresh ID.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: BindingId::new(),
            kind,
        }
    }

    /// A text-like form control binding.
    pub fn control() -> Self {
        Self::new(ElementKind::Control)
    }

    /// A checkbox/radio binding.
    pub fn toggle() -> Self {
        Self::new(ElementKind::Toggle)
    }

    /// A non-form element binding.
    pub fn non_form() -> Self {
        Self::new(ElementKind::NonForm)
    }

    pub fn id(&self) -> BindingId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }
}

impl Default for Binding {
    fn default() -> Self {
        Self::control()
    }
}

/// What a listener handle is attached to on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    /// Watches the bound value.
    Watch,
    /// A blur listener on the bound element.
    Blur,
    /// Watches another value this field depends on.
    Related,
}

/// Ownership of one host listener.
///
/// Holds the callback that detaches the listener. The callback runs exactly
/// once: on [`ListenerHandle::release`] or when the handle is dropped. It
/// must not call back into the form that owns the handle.
pub struct ListenerHandle {
    kind: ListenerKind,
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ListenerHandle {
    /// Wrap a release callback.
    pub fn new(kind: ListenerKind, release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            kind,
            release: Some(Box::new(release)),
        }
    }

    /// A handle with nothing to release.
    pub fn detached(kind: ListenerKind) -> Self {
        Self {
            kind,
            release: None,
        }
    }

    pub fn kind(&self) -> ListenerKind {
        self.kind
    }

    /// Run the release callback now.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("kind", &self.kind)
            .field("released", &self.release.is_none())
            .finish()
    }
}
