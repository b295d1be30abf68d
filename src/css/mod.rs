//! CSS parsing and comparison.
//!
//! - [`Stylesheet`]: the rule tree read from the styling engine's output
//! - [`values_equal`], [`media_queries_equal`], [`supports_equal`]:
//!   structural comparison of fragments

mod equivalence;
mod stylesheet;

pub use equivalence::{media_queries_equal, supports_equal, values_equal};
pub use stylesheet::{AtRule, BlockItem, ConditionRule, CssRule, Declaration, StyleRule, Stylesheet};
