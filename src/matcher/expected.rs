//! Expected values.

use std::fmt;

use regex::Regex;

use crate::css::values_equal;

/// A matcher evaluated against the received value.
pub trait ValueMatcher {
    /// `received` is `None` when the property was not found.
    fn matches(&self, received: Option<&str>) -> bool;

    /// Shown in failure messages.
    fn describe(&self) -> String;
}

/// What the asserted property should hold.
pub enum Expected {
    /// A CSS value, compared structurally.
    Value(String),
    /// A regular expression the value must match.
    Pattern(Regex),
    /// No value given: assert absence (or, negated, presence).
    Unspecified,
    /// The `null`/`false` sentinel. Equal to nothing.
    Null,
    Matcher(Box<dyn ValueMatcher>),
}

impl Expected {
    /// Whether `received` satisfies this expectation.
    ///
    /// A negated assertion with no expected value asks whether the property
    /// exists at all.
    pub fn test(&self, received: Option<&str>, negated: bool) -> bool {
        match self {
            Expected::Unspecified if negated => received.is_some(),
            Expected::Unspecified => received.is_none(),
            Expected::Value(expected) => received.is_some_and(|value| values_equal(value, expected)),
            Expected::Pattern(pattern) => received.is_some_and(|value| pattern.is_match(value)),
            Expected::Null => false,
            Expected::Matcher(matcher) => matcher.matches(received),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Value(value) => write!(f, "{value}"),
            Expected::Pattern(pattern) => write!(f, "/{pattern}/"),
            Expected::Unspecified => write!(f, "undefined"),
            Expected::Null => write!(f, "null"),
            Expected::Matcher(matcher) => write!(f, "{}", matcher.describe()),
        }
    }
}

impl fmt::Debug for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expected({self})")
    }
}

impl From<&str> for Expected {
    fn from(value: &str) -> Self {
        Expected::Value(value.to_string())
    }
}

impl From<String> for Expected {
    fn from(value: String) -> Self {
        Expected::Value(value)
    }
}

impl From<Regex> for Expected {
    fn from(pattern: Regex) -> Self {
        Expected::Pattern(pattern)
    }
}

impl From<Option<&str>> for Expected {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Expected::Unspecified, Expected::from)
    }
}

struct AnyString;

impl ValueMatcher for AnyString {
    fn matches(&self, received: Option<&str>) -> bool {
        received.is_some()
    }

    fn describe(&self) -> String {
        "Any<String>".to_string()
    }
}

struct Anything;

impl ValueMatcher for Anything {
    fn matches(&self, received: Option<&str>) -> bool {
        received.is_some()
    }

    fn describe(&self) -> String {
        "Anything".to_string()
    }
}

struct StringContaining(String);

impl ValueMatcher for StringContaining {
    fn matches(&self, received: Option<&str>) -> bool {
        received.is_some_and(|value| value.contains(&self.0))
    }

    fn describe(&self) -> String {
        format!("StringContaining {:?}", self.0)
    }
}

struct StringMatching(Regex);

impl ValueMatcher for StringMatching {
    fn matches(&self, received: Option<&str>) -> bool {
        received.is_some_and(|value| self.0.is_match(value))
    }

    fn describe(&self) -> String {
        format!("StringMatching /{}/", self.0)
    }
}

/// Any string value.
pub fn any_string() -> Expected {
    Expected::Matcher(Box::new(AnyString))
}

/// Any value at all; fails only when the property is missing.
pub fn anything() -> Expected {
    Expected::Matcher(Box::new(Anything))
}

/// A value containing `needle`.
pub fn string_containing(needle: impl Into<String>) -> Expected {
    Expected::Matcher(Box::new(StringContaining(needle.into())))
}

/// A value matching `pattern`.
pub fn string_matching(pattern: Regex) -> Expected {
    Expected::Matcher(Box::new(StringMatching(pattern)))
}
