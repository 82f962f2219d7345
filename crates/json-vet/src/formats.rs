//! Named string formats: built-in table plus caller-registered entries.

use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};

use regex::Regex;

/// Outcome of a predicate-backed format check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatVerdict {
    /// The value conforms.
    Ok,
    /// The value does not conform; the engine emits its generic message.
    Fail,
    /// The value does not conform; this message is reported verbatim, which
    /// lets custom formats supply precise diagnostics.
    Message(String),
}

/// One named format: either a regular expression the whole value must
/// match, or an arbitrary predicate.
pub enum Format {
    Regex(Regex),
    Predicate(Box<dyn Fn(&str) -> FormatVerdict + Send + Sync>),
}

impl Format {
    /// Convenience constructor for predicate formats.
    pub fn predicate<F>(f: F) -> Format
    where
        F: Fn(&str) -> FormatVerdict + Send + Sync + 'static,
    {
        Format::Predicate(Box::new(f))
    }
}

impl std::fmt::Debug for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            Format::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// How a checked value failed its format, if it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormatFailure {
    /// Regex mismatch; carries the pattern source for the message.
    Mismatch(String),
    /// Predicate said no without elaborating.
    Rejected,
    /// Predicate supplied its own message.
    Custom(String),
}

/// Registry of named formats, owned by a `Validator` instance.
///
/// Built-ins are pre-registered at construction; callers extend the table
/// through [`Validator::add_format`](crate::Validator::add_format) before
/// validating. The registry is never mutated during a validation call.
#[derive(Debug)]
pub struct FormatRegistry {
    formats: HashMap<String, Format>,
}

impl FormatRegistry {
    /// Creates a registry with every built-in format pre-registered.
    pub fn with_builtins() -> Self {
        let mut registry = FormatRegistry {
            formats: HashMap::new(),
        };
        registry.register(
            "date-time",
            Format::Regex(builtin(
                r"^\d{4}-\d{2}-\d{2}[Tt ]\d{2}:\d{2}:\d{2}(\.\d+)?([Zz]|[+-]\d{2}:\d{2})?$",
            )),
        );
        registry.register("date", Format::Regex(builtin(r"^\d{4}-\d{2}-\d{2}$")));
        registry.register("time", Format::Regex(builtin(r"^\d{2}:\d{2}:\d{2}$")));
        registry.register("utc-millisec", Format::Regex(builtin(r"^\d+$")));
        registry.register("alpha", Format::Regex(builtin(r"^[a-zA-Z]+$")));
        registry.register("alpha-numeric", Format::Regex(builtin(r"^[a-zA-Z0-9]+$")));
        registry.register(
            "host-name",
            Format::Regex(builtin(
                r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
            )),
        );
        registry.register(
            "uri",
            Format::Regex(builtin(r"^[a-zA-Z][a-zA-Z0-9+.-]*:[^\s]*$")),
        );
        registry.register(
            "color",
            Format::Regex(builtin(
                r"^(#[0-9a-fA-F]{3}|#[0-9a-fA-F]{6}|rgb\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*\)|aqua|black|blue|fuchsia|gray|green|lime|maroon|navy|olive|orange|purple|red|silver|teal|white|yellow)$",
            )),
        );
        registry.register(
            "ip-address",
            Format::predicate(|s| match s.parse::<Ipv4Addr>() {
                Ok(_) => FormatVerdict::Ok,
                Err(_) => FormatVerdict::Fail,
            }),
        );
        registry.register(
            "ipv6",
            Format::predicate(|s| match s.parse::<Ipv6Addr>() {
                Ok(_) => FormatVerdict::Ok,
                Err(_) => FormatVerdict::Fail,
            }),
        );
        registry
    }

    /// Registers (or replaces) a named format.
    pub fn register(&mut self, name: impl Into<String>, format: Format) {
        self.formats.insert(name.into(), format);
    }

    /// Whether a format by this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Checks `value` against the named format. Returns `None` when the
    /// name is unknown (the caller decides whether that is a schema error).
    pub(crate) fn check(&self, name: &str, value: &str) -> Option<Option<FormatFailure>> {
        let format = self.formats.get(name)?;
        let failure = match format {
            Format::Regex(re) => {
                if re.is_match(value) {
                    None
                } else {
                    Some(FormatFailure::Mismatch(re.as_str().to_string()))
                }
            }
            Format::Predicate(f) => match f(value) {
                FormatVerdict::Ok => None,
                FormatVerdict::Fail => Some(FormatFailure::Rejected),
                FormatVerdict::Message(msg) => Some(FormatFailure::Custom(msg)),
            },
        };
        Some(failure)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        FormatRegistry::with_builtins()
    }
}

// Built-in patterns are string literals checked by the test suite; a failure
// to compile one is a bug in this file, not a caller error.
fn builtin(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in format pattern")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passes(registry: &FormatRegistry, name: &str, value: &str) -> bool {
        registry
            .check(name, value)
            .expect("known format")
            .is_none()
    }

    #[test]
    fn test_builtins_compile() {
        let registry = FormatRegistry::with_builtins();
        for name in [
            "date-time",
            "date",
            "time",
            "utc-millisec",
            "alpha",
            "alpha-numeric",
            "host-name",
            "uri",
            "color",
            "ip-address",
            "ipv6",
        ] {
            assert!(registry.contains(name), "missing builtin {name}");
        }
    }

    #[test]
    fn test_date_time() {
        let r = FormatRegistry::with_builtins();
        assert!(passes(&r, "date-time", "2026-08-29T12:34:56Z"));
        assert!(passes(&r, "date-time", "2026-08-29T12:34:56.123+02:00"));
        assert!(!passes(&r, "date-time", "2026-08-29"));
    }

    #[test]
    fn test_date_and_time() {
        let r = FormatRegistry::with_builtins();
        assert!(passes(&r, "date", "2026-08-29"));
        assert!(!passes(&r, "date", "29/08/2026"));
        assert!(passes(&r, "time", "23:59:59"));
        assert!(!passes(&r, "time", "23:59"));
    }

    #[test]
    fn test_ip_addresses() {
        let r = FormatRegistry::with_builtins();
        assert!(passes(&r, "ip-address", "192.168.0.1"));
        assert!(!passes(&r, "ip-address", "256.0.0.1"));
        assert!(passes(&r, "ipv6", "::1"));
        assert!(passes(&r, "ipv6", "2001:db8::8a2e:370:7334"));
        assert!(!passes(&r, "ipv6", "not-an-address"));
    }

    #[test]
    fn test_hostname_and_uri() {
        let r = FormatRegistry::with_builtins();
        assert!(passes(&r, "host-name", "example.com"));
        assert!(!passes(&r, "host-name", "-leading.example.com"));
        assert!(passes(&r, "uri", "https://example.com/a?b=c"));
        assert!(!passes(&r, "uri", "no scheme here"));
    }

    #[test]
    fn test_color() {
        let r = FormatRegistry::with_builtins();
        assert!(passes(&r, "color", "#fff"));
        assert!(passes(&r, "color", "#00ff00"));
        assert!(passes(&r, "color", "rgb(0, 128, 255)"));
        assert!(passes(&r, "color", "teal"));
        assert!(!passes(&r, "color", "#ff"));
    }

    #[test]
    fn test_unknown_format_is_none() {
        let r = FormatRegistry::with_builtins();
        assert!(r.check("no-such-format", "x").is_none());
    }

    #[test]
    fn test_regex_failure_carries_pattern() {
        let r = FormatRegistry::with_builtins();
        match r.check("alpha", "123") {
            Some(Some(FormatFailure::Mismatch(pattern))) => {
                assert_eq!(pattern, "^[a-zA-Z]+$");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_custom_predicate_message() {
        let mut r = FormatRegistry::with_builtins();
        r.register(
            "even-length",
            Format::predicate(|s| {
                if s.len() % 2 == 0 {
                    FormatVerdict::Ok
                } else {
                    FormatVerdict::Message(format!("has odd length {}", s.len()))
                }
            }),
        );
        assert!(passes(&r, "even-length", "ab"));
        match r.check("even-length", "abc") {
            Some(Some(FormatFailure::Custom(msg))) => assert_eq!(msg, "has odd length 3"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
