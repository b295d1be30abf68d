//! # styled-assert
//!
//! Assertions about the CSS a styling engine generated for an element.
//!
//! Component styling engines compile each component's styles into rules keyed
//! by generated class names and inject them into a stylesheet. This crate reads
//! that stylesheet back, finds the rules that apply to an element's classes
//! and checks the value of a property.
//!
//! ## Quick Start
//!
//! ```
//! use styled_assert::{Element, MatchOptions, Matcher, Registry, expect_style};
//!
//! let mut registry = Registry::new();
//! registry.insert_rules(
//!     "sc-button",
//!     "hxsQk",
//!     &[
//!         ".hxsQk{color:red;}",
//!         ".hxsQk:hover{color:blue;}",
//!         "@media (max-width:640px){.hxsQk{color:green;}}",
//!     ],
//! );
//! let matcher = Matcher::new(registry).unwrap();
//!
//! let button = Element::new("button").with_class("sc-button hxsQk");
//! expect_style(&matcher, &button).to_have_style_rule("color", "red");
//! expect_style(&matcher, &button).to_have_style_rule_with(
//!     "color",
//!     "blue",
//!     &MatchOptions::new().modifier(":hover"),
//! );
//! expect_style(&matcher, &button).to_have_style_rule_with(
//!     "color",
//!     "green",
//!     &MatchOptions::new().media("(max-width: 640px)"),
//! );
//! ```
//!
//! ## Engines
//!
//! The matcher reads through a [`StyleEngine`]. [`Registry`] models the
//! styled-components sheet in memory, in both its server (style tags) and
//! client (mounted document) forms. [`Snapshot`] reads engine output that was
//! written to a file.

pub mod css;
pub mod element;
pub mod engine;
pub mod error;
pub mod extract;
pub mod locate;
pub mod matcher;
pub mod selector;

pub use element::{ClassList, Element};
pub use engine::{ComponentRef, Registry, Serialized, Snapshot, StyleEngine};
pub use error::{Error, Result};
pub use matcher::{
    Expected, Fragment, MatchOptions, MatchResult, Matcher, Modifier, StyleAssertion,
    ValueMatcher, any_string, anything, expect_style, string_containing, string_matching,
};
