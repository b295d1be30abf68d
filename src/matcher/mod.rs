//! The `to_have_style_rule` matcher.
//!
//! A lookup reads the engine's current stylesheet, narrows it to the rules
//! that apply to an element (or to an at-rule), takes the last declaration of
//! the property and compares it against an [`Expected`] value.

mod assertion;
mod expected;
mod options;

pub use assertion::{StyleAssertion, expect_style};
pub use expected::{Expected, ValueMatcher, any_string, anything, string_containing, string_matching};
pub use options::{Fragment, MatchOptions, Modifier, ResolvedOptions};

use log::{debug, warn};

use crate::element::Element;
use crate::engine::StyleEngine;
use crate::error::Result;
use crate::extract::{self, current_stylesheet};
use crate::locate::{locate_declarations, locate_rules};

/// Checks style rules against a styling engine.
#[derive(Debug)]
pub struct Matcher<E> {
    engine: E,
}

impl<E: StyleEngine> Matcher<E> {
    /// Wrap `engine`, failing if its registry is unreachable.
    pub fn new(engine: E) -> Result<Self> {
        engine.verify()?;
        Ok(Self { engine })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Reset the engine between tests.
    pub fn reset(&mut self) {
        extract::reset(&mut self.engine);
    }

    /// Check `property` on `element`.
    ///
    /// `negated` only changes how an [`Expected::Unspecified`] value is
    /// tested; the caller flips the outcome.
    ///
    /// ```
    /// use styled_assert::{Element, MatchOptions, Matcher, Registry};
    ///
    /// let mut registry = Registry::new();
    /// registry.insert_rules("sc-a", "b", &[".b{color:red;}"]);
    /// let matcher = Matcher::new(registry).unwrap();
    ///
    /// let button = Element::new("button").with_class("sc-a b");
    /// let result = matcher.to_have_style_rule(Some(&button), "color", "red", &MatchOptions::new(), false);
    /// assert!(result.pass());
    /// ```
    pub fn to_have_style_rule(
        &self,
        element: Option<&Element>,
        property: &str,
        expected: impl Into<Expected>,
        options: &MatchOptions,
        negated: bool,
    ) -> MatchResult {
        let expected = expected.into();
        let options = options.resolve(&self.engine);

        let Some(element) = element else {
            debug!("no element passed");
            return MatchResult::no_rules(options);
        };

        let sheet = match current_stylesheet(&self.engine) {
            Ok(sheet) => sheet,
            Err(e) => {
                warn!("cannot read style rules: {e}");
                return MatchResult {
                    pass: false,
                    failure: Failure::Engine(e.to_string()),
                };
            }
        };
        let rules = locate_rules(&sheet, &element.class_list, &options);
        if rules.is_empty() {
            return MatchResult::no_rules(options);
        }

        let received = locate_declarations(&rules, property)
            .pop()
            .map(|declaration| declaration.value.clone());
        let pass = expected.test(received.as_deref(), negated);
        debug!("{property}: expected {expected}, received {received:?}, pass={pass}");

        MatchResult {
            pass,
            failure: Failure::Declaration {
                property: property.to_string(),
                expected: expected.to_string(),
                received,
            },
        }
    }
}

/// What a failure message describes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Failure {
    /// The engine's output could not be read.
    Engine(String),
    NoRules(ResolvedOptions),
    Declaration {
        property: String,
        expected: String,
        received: Option<String>,
    },
}

/// Outcome of one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pass: bool,
    failure: Failure,
}

impl MatchResult {
    fn no_rules(options: ResolvedOptions) -> Self {
        Self {
            pass: false,
            failure: Failure::NoRules(options),
        }
    }

    pub fn pass(&self) -> bool {
        self.pass
    }

    /// Whether no rule applied to the element at all.
    pub fn is_no_rules(&self) -> bool {
        matches!(self.failure, Failure::NoRules(_))
    }

    /// Whether the engine failed, so nothing was compared. Negation does
    /// not turn this into a pass.
    pub fn is_engine_error(&self) -> bool {
        matches!(self.failure, Failure::Engine(_))
    }

    /// The last declared value, if any rule declared the property.
    pub fn received(&self) -> Option<&str> {
        match &self.failure {
            Failure::Declaration { received, .. } => received.as_deref(),
            Failure::Engine(_) | Failure::NoRules(_) => None,
        }
    }

    /// The message shown when the assertion fails.
    pub fn message(&self) -> String {
        match &self.failure {
            Failure::Engine(error) => error.clone(),
            Failure::NoRules(options) => {
                let mut message = "No style rules found on passed element".to_string();
                if !options.is_empty() {
                    message.push_str(" using options:\n");
                    message.push_str(&options.to_json());
                }
                message
            }
            Failure::Declaration {
                property,
                expected,
                received,
            } => {
                let headline = if !self.pass && received.as_deref().is_none_or(str::is_empty) {
                    format!("Property '{property}' not found in style rules")
                } else {
                    format!("Value mismatch for property '{property}'")
                };
                let received = received.as_deref().unwrap_or("undefined");
                format!(
                    "{headline}\n\nExpected\n  {property}: {expected}\nReceived:\n  {property}: {received}"
                )
            }
        }
    }
}
