use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use formstate::prelude::*;

fn counting_handle(kind: ListenerKind, counter: &Arc<AtomicUsize>) -> ListenerHandle {
    let counter = Arc::clone(counter);
    ListenerHandle::new(kind, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_register_initial_state() {
    let mut form = FormValidationState::new();
    let field = form.register_field("name", "Ada", Binding::control()).unwrap();

    assert_eq!(field.name(), "name");
    assert_eq!(field.value(), &Value::from("Ada"));
    assert_eq!(field.previous_value(), &Value::from("Ada"));
    assert_eq!(field.origin_value(), &Value::from("Ada"));
    assert!(!field.is_initialized());
    assert_eq!(*field.status(), StatusFlags::INITIAL);
    assert!(field.rules().is_empty());

    assert_eq!(form.field_names(), ["name".to_string()]);
    assert_eq!(form.len(), 1);
}

#[test]
fn test_register_keeps_order() {
    let mut form = FormValidationState::new();
    for name in ["c", "a", "b"] {
        form.register_field(name, Value::Undefined, Binding::control()).unwrap();
    }
    assert_eq!(form.field_names(), ["c", "a", "b"]);
    let names: Vec<_> = form.fields().map(Field::name).collect();
    assert_eq!(names, ["c", "a", "b"]);
}

#[test]
fn test_register_same_binding_is_idempotent() {
    let mut form = FormValidationState::new();
    let binding = Binding::control();
    form.register_field("email", "", binding).unwrap();
    form.attach_rule("email", "required", true).unwrap();
    form.on_value_change("email", "x", "").unwrap();
    form.on_blur("email").unwrap();

    let before = form.field("email").map(|f| (f.value().clone(), *f.status())).unwrap();

    let field = form.register_field("email", "other", binding).unwrap();
    assert_eq!(field.value(), &before.0);
    assert_eq!(field.origin_value(), &Value::from(""));
    assert_eq!(*field.status(), before.1);
    assert_eq!(field.rules().len(), 1);
    assert_eq!(form.len(), 1);
}

#[test]
fn test_register_duplicate_binding_fails() {
    let mut form = FormValidationState::new();
    form.register_field("email", "", Binding::control()).unwrap();

    let err = form
        .register_field("email", "", Binding::control())
        .unwrap_err();
    assert!(matches!(err, FormError::DuplicateField { ref name } if name == "email"));
    assert_eq!(form.len(), 1);
}

#[test]
fn test_register_reserved_names() {
    let mut form = FormValidationState::new();
    for name in [
        "$fields",
        "invalid",
        "valid",
        "untouched",
        "touched",
        "pristine",
        "dirty",
        "modified",
    ] {
        let err = form
            .register_field(name, Value::Undefined, Binding::control())
            .unwrap_err();
        assert!(matches!(err, FormError::ReservedName { .. }), "{name}");
    }
    assert!(form.is_empty());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        FormError::reserved_name("valid").to_string(),
        "field name 'valid' is reserved, use another name"
    );
    assert_eq!(
        FormError::duplicate_field("email").to_string(),
        "duplicated validation field name: 'email'"
    );
}

// ============================================================================
// Unregistration
// ============================================================================

#[test]
fn test_unregister_releases_listeners() {
    let released = Arc::new(AtomicUsize::new(0));
    let mut form = FormValidationState::new();
    form.register_field("email", "", Binding::control()).unwrap();
    form.add_listener("email", counting_handle(ListenerKind::Watch, &released))
        .unwrap();
    form.add_listener("email", counting_handle(ListenerKind::Blur, &released))
        .unwrap();
    form.set_related("email", counting_handle(ListenerKind::Related, &released))
        .unwrap();
    assert_eq!(form.field("email").unwrap().listener_count(), 3);

    form.unregister_field("email");

    assert_eq!(released.load(Ordering::SeqCst), 3);
    assert!(form.field("email").is_none());
    assert!(form.field_names().is_empty());
}

#[test]
fn test_unregister_unknown_is_noop() {
    let mut form = FormValidationState::new();
    form.register_field("a", "", Binding::control()).unwrap();
    form.unregister_field("missing");
    assert_eq!(form.len(), 1);
}

#[test]
fn test_unregister_reaggregates() {
    let mut form = FormValidationState::new();
    form.register_field("a", "", Binding::control()).unwrap();
    form.register_field("b", "", Binding::control()).unwrap();
    form.attach_rule("a", "required", true).unwrap();
    form.evaluate_all().unwrap();
    assert!(form.status().invalid);

    form.unregister_field("a");
    assert!(!form.status().invalid);
    assert!(form.status().valid);
}

#[test]
fn test_unregister_while_walking_names() {
    let mut form = FormValidationState::new();
    for name in ["a", "b", "c", "d"] {
        form.register_field(name, "", Binding::control()).unwrap();
    }
    for name in form.field_names().to_vec() {
        if name != "c" {
            form.unregister_field(&name);
        }
    }
    assert_eq!(form.field_names(), ["c"]);
}

#[test]
fn test_reregister_after_unregister_starts_fresh() {
    let mut form = FormValidationState::new();
    form.register_field("a", "x", Binding::control()).unwrap();
    form.on_value_change("a", "y", "x").unwrap();
    form.unregister_field("a");

    let field = form.register_field("a", "z", Binding::control()).unwrap();
    assert_eq!(field.value(), &Value::from("z"));
    assert!(field.status().pristine);
}

// ============================================================================
// Listeners
// ============================================================================

#[test]
fn test_set_related_releases_previous() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let mut form = FormValidationState::new();
    form.register_field("confirm", "", Binding::control()).unwrap();

    form.set_related("confirm", counting_handle(ListenerKind::Related, &first))
        .unwrap();
    form.set_related("confirm", counting_handle(ListenerKind::Related, &second))
        .unwrap();

    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 0);
    assert!(form.field("confirm").unwrap().has_related());
}

#[test]
fn test_listeners_on_unknown_field() {
    let mut form = FormValidationState::new();
    let err = form
        .add_listener("nope", ListenerHandle::detached(ListenerKind::Watch))
        .unwrap_err();
    assert!(matches!(err, FormError::UnknownField { .. }));
    assert!(form
        .set_related("nope", ListenerHandle::detached(ListenerKind::Related))
        .is_err());
}

#[test]
fn test_listener_released_once() {
    let released = Arc::new(AtomicUsize::new(0));
    let handle = counting_handle(ListenerKind::Blur, &released);
    handle.release();
    assert_eq!(released.load(Ordering::SeqCst), 1);

    {
        let _dropped = counting_handle(ListenerKind::Blur, &released);
    }
    assert_eq!(released.load(Ordering::SeqCst), 2);
}

#[test]
fn test_dropping_form_releases_listeners() {
    let released = Arc::new(AtomicUsize::new(0));
    {
        let mut form = FormValidationState::new();
        form.register_field("a", "", Binding::control()).unwrap();
        form.add_listener("a", counting_handle(ListenerKind::Watch, &released))
            .unwrap();
    }
    assert_eq!(released.load(Ordering::SeqCst), 1);
}
