//! Field values and the loose coercions validation rules rely on.
//!
//! Bound values arrive from the host as loosely typed data: text from inputs,
//! booleans from checkboxes, arrays from multi-selects, whole objects from
//! custom components. [`Value`] models that data, and the coercion helpers
//! here (`is_truthy`, `coerce_string`, `coerce_number`) give rules a single,
//! predictable reading of it.
//!
//! Arrays, objects and compiled patterns are reference-counted. Cloning a
//! [`Value`] shares them, and [`Value::strict_eq`] compares them by identity,
//! which is what pristine/dirty detection uses.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Serialize, Serializer};

/// A compiled regular expression held by value (e.g. a `pattern` rule config).
#[derive(Clone, Debug)]
pub struct Pattern(Arc<Regex>);

impl Pattern {
    /// Compile a pattern from source.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self::from)
    }

    /// The compiled regex.
    pub fn regex(&self) -> &Regex {
        &self.0
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    /// Whether both handles share the same compiled regex.
    pub fn same(&self, other: &Pattern) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self(Arc::new(regex))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// A loosely typed field value or rule configuration.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value at all (an absent config, an unset binding).
    #[default]
    Undefined,
    /// An explicit null.
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Arc<Vec<Value>>),
    Object(Arc<BTreeMap<String, Value>>),
    Regex(Pattern),
}

impl Value {
    /// Build an array value.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Array(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Build an object value from key/value pairs.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Object(Arc::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Compile a regex value.
    pub fn regex(source: &str) -> Result<Self, regex::Error> {
        Pattern::new(source).map(Self::Regex)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// `null` or undefined.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Truthiness: undefined, null, `false`, `0`, `NaN` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Object(_) | Self::Regex(_) => true,
        }
    }

    /// Strict equality: primitives by value, arrays/objects/patterns by identity.
    ///
    /// `NaN` is never strictly equal to anything, itself included.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Arc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            (Self::Regex(a), Self::Regex(b)) => a.same(b),
            _ => false,
        }
    }

    /// The string form rules measure and match against.
    pub fn coerce_string(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_string(),
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::String(s) => s.clone(),
            Self::Array(items) => items
                .iter()
                .map(|item| {
                    if item.is_nullish() {
                        String::new()
                    } else {
                        item.coerce_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(","),
            Self::Object(_) => "[object Object]".to_string(),
            Self::Regex(p) => format!("/{}/", p.as_str()),
        }
    }

    /// Numeric coercion used by range comparisons. Unconvertible values give `NaN`.
    pub fn coerce_number(&self) -> f64 {
        match self {
            Self::Undefined | Self::Object(_) | Self::Regex(_) => f64::NAN,
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::String(s) => string_to_number(s),
            Self::Array(_) => string_to_number(&self.coerce_string()),
        }
    }
}

impl PartialEq for Value {
    /// Structural equality. Use [`Value::strict_eq`] for identity semantics.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coerce_string())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Undefined | Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => items.as_slice().serialize(serializer),
            Self::Object(map) => (**map).serialize(serializer),
            Self::Regex(p) => serializer.serialize_str(p.as_str()),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions
// -----------------------------------------------------------------------------

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Regex> for Value {
    fn from(regex: Regex) -> Self {
        Self::Regex(Pattern::from(regex))
    }
}

impl From<Pattern> for Value {
    fn from(pattern: Pattern) -> Self {
        Self::Regex(pattern)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(Arc::new(items))
    }
}

/// `None` maps to [`Value::Undefined`], i.e. "no config given".
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Undefined, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::array(items),
            serde_json::Value::Object(map) => Self::object(map),
        }
    }
}

// -----------------------------------------------------------------------------
// Numeric helpers
// -----------------------------------------------------------------------------

static INT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").expect("integer prefix pattern"));

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("float prefix pattern")
});

static DECIMAL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)$")
        .expect("decimal literal pattern")
});

/// Leading-integer parse of the value's string form (`"12px"` → 12).
///
/// `None` when no digits lead the string.
pub fn parse_int(value: &Value) -> Option<f64> {
    if let Value::Number(n) = value {
        return n.is_finite().then_some(n.trunc());
    }
    let text = value.coerce_string();
    let text = text.trim_start();
    INT_PREFIX
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Leading-float parse of the value's string form (`"3.5kg"` → 3.5).
///
/// `None` when the string does not start with a number.
pub fn parse_float(value: &Value) -> Option<f64> {
    if let Value::Number(n) = value {
        return (!n.is_nan()).then_some(*n);
    }
    let text = value.coerce_string();
    let text = text.trim_start();
    FLOAT_PREFIX.find(text).and_then(|m| literal_to_f64(m.as_str()))
}

fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    if DECIMAL_LITERAL.is_match(trimmed) {
        literal_to_f64(trimmed).unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn literal_to_f64(literal: &str) -> Option<f64> {
    match literal {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => literal.parse::<f64>().ok(),
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_form(n)
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// `1e21` → `1e+21`, `1.5e-7` → `1.5e-7`.
fn exponent_form(n: f64) -> String {
    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int(&Value::from("12px")), Some(12.0));
        assert_eq!(parse_int(&Value::from("  -3")), Some(-3.0));
        assert_eq!(parse_int(&Value::from("4.9")), Some(4.0));
        assert_eq!(parse_int(&Value::from(7.8)), Some(7.0));
        assert_eq!(parse_int(&Value::from("px12")), None);
        assert_eq!(parse_int(&Value::Undefined), None);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float(&Value::from("3.5kg")), Some(3.5));
        assert_eq!(parse_float(&Value::from(".5")), Some(0.5));
        assert_eq!(parse_float(&Value::from("1e3")), Some(1000.0));
        assert_eq!(parse_float(&Value::from("-Infinity")), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float(&Value::from("abc")), None);
        assert_eq!(parse_float(&Value::Null), None);
        assert_eq!(parse_float(&Value::Bool(true)), None);
    }

    #[test]
    fn test_string_to_number() {
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number(" 42 "), 42.0);
        assert_eq!(string_to_number("0x1f"), 31.0);
        assert!(string_to_number("42abc").is_nan());
        assert!(string_to_number("inf").is_nan());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_format_number_exponent() {
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e22), "1.5e+22");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }
}
