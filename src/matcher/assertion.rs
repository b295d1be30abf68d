//! Panicking assertions for use inside tests.

use super::{Expected, MatchOptions, MatchResult, Matcher};
use crate::element::Element;
use crate::engine::StyleEngine;

/// Start an assertion about `element`.
///
/// ```
/// use styled_assert::{Element, Matcher, Registry, expect_style};
///
/// let mut registry = Registry::new();
/// registry.insert_rules("sc-a", "b", &[".b{color:red;}"]);
/// let matcher = Matcher::new(registry).unwrap();
///
/// let button = Element::new("button").with_class("sc-a b");
/// expect_style(&matcher, &button).to_have_style_rule("color", "red");
/// expect_style(&matcher, &button).not().to_have_style_rule("opacity", None);
/// ```
pub fn expect_style<'a, E: StyleEngine>(
    matcher: &'a Matcher<E>,
    element: &'a Element,
) -> StyleAssertion<'a, E> {
    StyleAssertion {
        matcher,
        element: Some(element),
        negated: false,
    }
}

/// A pending assertion, possibly negated.
pub struct StyleAssertion<'a, E> {
    matcher: &'a Matcher<E>,
    element: Option<&'a Element>,
    negated: bool,
}

impl<'a, E: StyleEngine> StyleAssertion<'a, E> {
    /// Assert about a possibly missing element.
    pub fn of(matcher: &'a Matcher<E>, element: Option<&'a Element>) -> Self {
        Self {
            matcher,
            element,
            negated: false,
        }
    }

    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Panics unless `property` holds `expected`.
    #[track_caller]
    pub fn to_have_style_rule(&self, property: &str, expected: impl Into<Expected>) {
        self.to_have_style_rule_with(property, expected, &MatchOptions::default());
    }

    /// Panics unless `property` holds `expected` under `options`, or when
    /// the engine's output cannot be read.
    #[track_caller]
    pub fn to_have_style_rule_with(
        &self,
        property: &str,
        expected: impl Into<Expected>,
        options: &MatchOptions,
    ) {
        let result = self.evaluate(property, expected, options);
        if result.is_engine_error() || result.pass() == self.negated {
            panic!("{}", result.message());
        }
    }

    /// Run the lookup without panicking.
    pub fn evaluate(
        &self,
        property: &str,
        expected: impl Into<Expected>,
        options: &MatchOptions,
    ) -> MatchResult {
        self.matcher
            .to_have_style_rule(self.element, property, expected, options, self.negated)
    }
}
