//! Named value formats for the `type` rule.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

// ASCII letter classes only; `(?i)` would also match U+212A and U+017F.
static TYPE_PATTERNS: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    [
        (
            "ISO_DATE",
            r"[0-9]{4}-[01][0-9]-[0-3][0-9]T[0-2][0-9]:[0-5][0-9]:[0-5][0-9]\.[0-9]+([+-][0-2][0-9]:[0-5][0-9]|Z)",
        ),
        (
            "URL",
            r"^[A-Za-z]+://(?:[A-Za-z0-9_-]+\.)+[A-Za-z]{2,6}.*$",
        ),
        (
            "EMAIL",
            r"^[A-Za-z0-9_.-]+@(?:[A-Za-z0-9_-]+\.)+[A-Za-z]{2,6}$",
        ),
        ("NUMBER", r"^[0-9]+$"),
        ("DATE", r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$"),
        (
            "TIME",
            r"^([0-9][0-9]):([0-9][0-9])(?::([0-9][0-9])(\.[0-9]{1,3})?)?$",
        ),
    ]
    .into_iter()
    .map(|(name, source)| (name, Regex::new(source).expect("built-in type pattern")))
    .collect()
});

/// Look up a format by name, case-insensitively.
pub fn type_pattern(name: &str) -> Option<&'static Regex> {
    TYPE_PATTERNS.get(name.to_uppercase().as_str())
}

/// All known format names.
pub fn type_names() -> impl Iterator<Item = &'static str> {
    TYPE_PATTERNS.keys().copied()
}
