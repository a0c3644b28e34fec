use std::sync::{Arc, Mutex};
use std::thread;

use formstate::prelude::*;
use serde_json::json;

// ============================================================================
// SharedForm
// ============================================================================

#[test]
fn test_shared_form_clones_share_state() {
    let form = SharedForm::new(FormValidationState::new());
    let other = form.clone();

    form.update(|f| f.register_field("a", "", Binding::control()).map(|_| ()))
        .unwrap();
    assert!(other.read(|f| f.contains("a")));
}

#[test]
fn test_shared_form_across_threads() {
    let form = SharedForm::with_config(FormConfig::new("threads"));
    form.update(|f| {
        f.register_field("a", "", Binding::control())?;
        f.register_field("b", "", Binding::control())?;
        Ok::<_, FormError>(())
    })
    .unwrap();

    let handles: Vec<_> = ["a", "b"]
        .into_iter()
        .map(|name| {
            let form = form.clone();
            thread::spawn(move || form.update(|f| f.on_blur(name)))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert!(form.read(|f| f.status().touched));
}

#[test]
fn test_related_trigger_reevaluates() {
    let password = Arc::new(Mutex::new(String::from("secret")));

    let mut library = RuleLibrary::builtin();
    let expected = Arc::clone(&password);
    library.register(RuleDefinition::new("matches-password", 50, move |value, _| {
        Ok(value.coerce_string() == *expected.lock().unwrap())
    }));

    let form = SharedForm::with_config(FormConfig::new("signup").library(library));
    form.update(|f| {
        f.register_field("confirm", "secret", Binding::control())?;
        f.attach_rule("confirm", "matches-password", Value::Undefined)
    })
    .unwrap();
    form.update(|f| f.evaluate_all()).unwrap();
    assert_eq!(form.read(|f| f.is_invalid("confirm")), Some(false));

    let trigger = form.related_trigger("confirm");
    *password.lock().unwrap() = String::from("changed");
    trigger().unwrap();

    form.read(|f| {
        assert_eq!(f.is_invalid("confirm"), Some(true));
        assert_eq!(f.field_flag("confirm", "matchesPassword"), Some(true));
        assert!(f.status().invalid);
        assert!(f.field("confirm").unwrap().status().untouched);
    });
}

// ============================================================================
// Snapshot
// ============================================================================

#[test]
fn test_snapshot_json_shape() {
    let mut form = FormValidationState::with_config(FormConfig::new("signup"));
    form.register_field("email", "", Binding::control()).unwrap();
    form.register_field("age", Value::Null, Binding::control()).unwrap();
    form.attach_rule("email", "required", Value::Undefined).unwrap();
    form.on_value_change("email", "a@b.com", "").unwrap();

    let json = serde_json::to_value(form.snapshot()).unwrap();

    assert_eq!(json["name"], "signup");
    assert_eq!(json["$fields"], json!(["email", "age"]));
    assert_eq!(json["valid"], true);
    assert_eq!(json["dirty"], true);
    assert_eq!(json["id"], form.id().to_string());

    let email = &json["fields"][0];
    assert_eq!(email["name"], "email");
    assert_eq!(email["value"], "a@b.com");
    assert_eq!(email["origin_value"], "");
    assert_eq!(email["modified"], true);
    assert_eq!(
        email["rules"],
        json!([{ "name": "required", "priority": 1, "config": true, "failing": false }])
    );
    assert!(email.get("custom_code").is_none());

    assert_eq!(json["fields"][1]["value"], serde_json::Value::Null);
}

#[test]
fn test_snapshot_field_lookup() {
    let form = SharedForm::new(FormValidationState::new());
    form.update(|f| f.register_field("a", 3, Binding::control()).map(|_| ()))
        .unwrap();

    let snapshot = form.snapshot();
    let field = snapshot.field("a").unwrap();
    assert_eq!(field.value, Value::from(3));
    assert!(field.status.valid);
    assert!(snapshot.field("b").is_none());
}
