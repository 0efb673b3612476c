//! Pattern constraints (`format`).
//!
//! `format=email` checks against the built-in email pattern. `format=regexp:<re>`
//! checks against a user pattern; everything after the first `:` is the
//! pattern. A value passes only if the pattern matches the whole string.

use crate::core::{Constraint, FieldValue, ValueKind};
use crate::error::{GuardError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

const REGEXP_PREFIX: &str = "regexp:";

/// Bounds on the top-level-domain label accepted by `format=email`.
///
/// # Examples
///
/// ```rust
/// use field_guard::constraints::EmailPolicy;
///
/// let policy = EmailPolicy::bounded(2, 4);
/// let pattern = policy.pattern().unwrap();
/// assert!(pattern.is_match("ferris@example.info"));
/// assert!(!pattern.is_match("ferris@example.museum"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailPolicy {
    /// Minimum number of letters in the top-level domain
    pub min_tld_len: usize,
    /// Maximum number of letters in the top-level domain (unbounded if `None`)
    pub max_tld_len: Option<usize>,
}

impl Default for EmailPolicy {
    fn default() -> Self {
        Self {
            min_tld_len: 2,
            max_tld_len: None,
        }
    }
}

impl EmailPolicy {
    /// Creates a policy accepting top-level domains of `min..=max` letters.
    pub fn bounded(min_tld_len: usize, max_tld_len: usize) -> Self {
        Self {
            min_tld_len,
            max_tld_len: Some(max_tld_len),
        }
    }

    /// Compiles the email pattern for this policy.
    pub fn pattern(&self) -> Result<Regex> {
        let max = self.max_tld_len.map(|m| m.to_string()).unwrap_or_default();
        let source = format!(
            r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{{{},{}}}$",
            self.min_tld_len, max
        );
        RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| GuardError::invalid_option("format", "email", e.to_string()))
    }
}

/// A constraint that checks a string field against a pattern.
#[derive(Debug, Clone)]
pub struct FormatConstraint {
    pattern: Regex,
    pattern_name: String,
}

impl FormatConstraint {
    /// Creates a constraint from a compiled pattern.
    ///
    /// The pattern is used as given; anchor it if it must cover the whole
    /// value.
    pub fn new(pattern: Regex, pattern_name: impl Into<String>) -> Self {
        Self {
            pattern,
            pattern_name: pattern_name.into(),
        }
    }

    /// Creates an email format constraint.
    pub fn email(policy: &EmailPolicy) -> Result<Self> {
        Ok(Self::new(policy.pattern()?, "email"))
    }

    /// Creates a constraint from a user pattern that must match the whole value.
    pub fn regexp(pattern: &str) -> Result<Self> {
        let anchored = format!("^(?:{pattern})$");
        let regex = Regex::new(&anchored).map_err(|e| {
            GuardError::invalid_option("format", format!("{REGEXP_PREFIX}{pattern}"), e.to_string())
        })?;
        Ok(Self::new(regex, "regexp"))
    }

    /// Parses `format` declaration options.
    pub fn parse(options: &str, policy: &EmailPolicy) -> Result<Self> {
        if options.eq_ignore_ascii_case("email") {
            return Self::email(policy);
        }
        match options.split_once(':') {
            Some((prefix, pattern)) if prefix.eq_ignore_ascii_case("regexp") => {
                Self::regexp(pattern)
            }
            _ => Err(GuardError::invalid_option(
                "format",
                options,
                format!("has no pattern {options}"),
            )),
        }
    }

    pub fn pattern_name(&self) -> &str {
        &self.pattern_name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl Constraint for FormatConstraint {
    fn name(&self) -> &str {
        "format"
    }

    fn check(&self, value: &FieldValue<'_>) -> Option<String> {
        let Some(text) = value.as_str() else {
            return Some("is not of type string".to_string());
        };
        if self.pattern.is_match(text) {
            None
        } else {
            Some(format!("does not match {} format", self.pattern_name))
        }
    }
}

/// Returns the `format` builder for the given email policy.
pub fn format_builder(
    policy: EmailPolicy,
) -> impl Fn(&str, ValueKind) -> Result<Box<dyn Constraint>> + Send + Sync + 'static {
    move |options: &str, kind: ValueKind| {
        if kind != ValueKind::String {
            return Err(GuardError::unsupported_kind("format", kind, "string"));
        }
        Ok(Box::new(FormatConstraint::parse(options, &policy)?) as Box<dyn Constraint>)
    }
}
