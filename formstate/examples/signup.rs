//! Signup form driven by simulated host events.
//!
//! Run with `cargo run -p formstate --example signup`. Rule evaluation is
//! logged to `signup.log`.

use std::fs::File;
use std::sync::{Arc, Mutex};

use formstate::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

fn print_status(form: &SharedForm, label: &str) {
    let snapshot = form.snapshot();
    println!(
        "{label:<28} invalid={:<5} touched={:<5} dirty={}",
        snapshot.status.invalid, snapshot.status.touched, snapshot.status.dirty
    );
    for field in &snapshot.fields {
        let failing: Vec<_> = field
            .rules
            .iter()
            .filter(|rule| rule.failing)
            .map(|rule| rule.name.as_str())
            .collect();
        println!("    {:<10} {:?} failing={:?}", field.name, field.value.to_string(), failing);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("signup.log")?;
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)?;

    // Host-side state the confirm field depends on.
    let password = Arc::new(Mutex::new(String::new()));

    let mut library = RuleLibrary::builtin();
    let current = Arc::clone(&password);
    library.register(RuleDefinition::new("same-as-password", 50, move |value, _| {
        let current = current.lock().map_err(|_| RuleError::custom("password lock poisoned"))?;
        Ok(value.coerce_string() == *current)
    }));

    let form = SharedForm::with_config(FormConfig::new("signup").library(library));
    form.update(|f| -> Result<(), FormError> {
        f.register_field("email", "", Binding::control())?;
        f.attach_rule("email", "required", Value::Undefined)?;
        f.attach_rule("email", "type", "email")?;

        f.register_field("password", "", Binding::control())?;
        f.attach_rule("password", "required", Value::Undefined)?;
        f.attach_rule("password", "min-length", 8)?;

        f.register_field("confirm", "", Binding::control())?;
        f.attach_rule("confirm", "same-as-password", Value::Undefined)?;

        f.register_field("terms", false, Binding::toggle())?;
        f.attach_rule("terms", "required", Value::Undefined)?;
        Ok(())
    })?;

    let confirm_trigger = form.related_trigger("confirm");
    form.update(|f| {
        f.set_related(
            "confirm",
            ListenerHandle::new(ListenerKind::Related, || {
                log::debug!("confirm stopped watching password");
            }),
        )
    })?;

    form.update(|f| f.evaluate_all())?;
    print_status(&form, "initial");

    form.update(|f| f.on_value_change("email", "not-an-email", ""))?;
    form.update(|f| f.on_blur("email"))?;
    print_status(&form, "bad email");

    form.update(|f| f.on_focus("email"))?;
    form.update(|f| f.on_value_change("email", "ada@example.com", "not-an-email"))?;
    form.update(|f| f.on_blur("email"))?;
    print_status(&form, "fixed email");

    form.update(|f| f.on_value_change("password", "hunter2hunter2", ""))?;
    *password.lock().map_err(|_| "password lock poisoned")? = "hunter2hunter2".to_string();
    confirm_trigger()?;
    print_status(&form, "password typed");

    form.update(|f| f.on_value_change("confirm", "hunter2hunter2", ""))?;
    form.update(|f| f.on_value_change("terms", true, false))?;
    form.update(|f| f.on_blur("password"))?;
    form.update(|f| f.on_blur("confirm"))?;
    print_status(&form, "complete");

    println!("{}", serde_json::to_string_pretty(&form.snapshot())?);

    form.update(|f| {
        for name in f.field_names().to_vec() {
            f.unregister_field(&name);
        }
    });
    print_status(&form, "unmounted");

    Ok(())
}
