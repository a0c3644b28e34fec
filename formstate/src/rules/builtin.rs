//! Built-in rule implementations.
//!
//! Every rule takes the field value and the rule config and answers whether
//! the value is valid. Rules that cannot make sense of their config fail
//! open (report valid) unless noted otherwise.

use log::warn;

use crate::error::RuleError;
use crate::value::{Pattern, Value, parse_float, parse_int};

use super::types::type_pattern;

/// Non-empty check.
///
/// A falsy config, or the string `"false"`, turns the rule off. Arrays must be
/// non-empty, objects must have a key, `0` counts as present, anything else
/// must be truthy.
pub fn required(value: &Value, is_required: &Value) -> Result<bool, RuleError> {
    if is_required.as_str() == Some("false") || !is_required.is_truthy() {
        return Ok(true);
    }
    let present = match value {
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Number(n) if *n == 0.0 => true,
        other => other.is_truthy(),
    };
    Ok(present)
}

/// Named format check (`EMAIL`, `URL`, `DATE`, ...).
///
/// Unknown format names are logged and ignored.
pub fn type_format(value: &Value, type_name: &Value) -> Result<bool, RuleError> {
    let name = if type_name.is_undefined() {
        String::new()
    } else {
        type_name.coerce_string()
    };
    match type_pattern(&name) {
        Some(pattern) => Ok(pattern.is_match(&value.coerce_string())),
        None => {
            warn!("type \"{name}\" does not match any known format, the rule is ignored");
            Ok(true)
        }
    }
}

/// Exact length of the value's string form.
pub fn length(value: &Value, len: &Value) -> Result<bool, RuleError> {
    Ok(parse_int(len).is_some_and(|n| char_len(value) == n))
}

/// Minimum length of the value's string form.
pub fn min_length(value: &Value, min: &Value) -> Result<bool, RuleError> {
    Ok(parse_int(min).is_some_and(|n| char_len(value) >= n))
}

/// Maximum length of the value's string form.
pub fn max_length(value: &Value, max: &Value) -> Result<bool, RuleError> {
    Ok(parse_int(max).is_some_and(|n| char_len(value) <= n))
}

/// Numeric lower bound. Fails open on a non-numeric bound or an empty value.
pub fn min(value: &Value, min: &Value) -> Result<bool, RuleError> {
    Ok(compare_bound(value, min, "min", |v, bound| v >= bound))
}

/// Numeric upper bound. Fails open on a non-numeric bound or an empty value.
pub fn max(value: &Value, max: &Value) -> Result<bool, RuleError> {
    Ok(compare_bound(value, max, "max", |v, bound| v <= bound))
}

/// Regex match against the value's string form (`""` for falsy values).
///
/// The config is either a pattern source string or a compiled pattern.
pub fn pattern(value: &Value, rule: &Value) -> Result<bool, RuleError> {
    let text = if value.is_truthy() {
        value.coerce_string()
    } else {
        String::new()
    };
    match rule {
        Value::Regex(compiled) => Ok(compiled.is_match(&text)),
        Value::String(source) => {
            let compiled = Pattern::new(source).map_err(|source_err| RuleError::InvalidPattern {
                pattern: source.clone(),
                source: source_err,
            })?;
            Ok(compiled.is_match(&text))
        }
        other => Err(RuleError::UnsupportedConfig {
            rule: super::PATTERN,
            config: other.coerce_string(),
        }),
    }
}

/// Externally computed result: valid iff the config is exactly `true`.
pub fn custom(_value: &Value, result: &Value) -> Result<bool, RuleError> {
    Ok(matches!(result, Value::Bool(true)))
}

/// Length in UTF-16 code units, so astral characters count twice.
fn char_len(value: &Value) -> f64 {
    value.coerce_string().encode_utf16().count() as f64
}

fn compare_bound(value: &Value, bound: &Value, rule: &str, cmp: impl Fn(f64, f64) -> bool) -> bool {
    let Some(bound) = parse_float(bound) else {
        warn!("{rule} bound is not a number, the rule is ignored");
        return true;
    };
    if value.is_nullish() || value.as_str() == Some("") {
        return true;
    }
    cmp(value.coerce_number(), bound)
}
