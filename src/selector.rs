//! Selector reconstruction.
//!
//! Given a class on the element and an optional modifier, rebuild the selector
//! the styling engine emitted for that modifier so it can be looked up among a
//! rule's selectors. The ampersand handling is a text heuristic, not a
//! selector parser.

use std::sync::LazyLock;

use regex::Regex;

/// Classes the engine assigns to identify a component's rule group.
static STATIC_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(_|-)+sc-.+|^sc-").expect("static class pattern is valid"));

/// Spaces following a `>`, `~` or `+` combinator.
static SPACE_AFTER_COMBINATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([>~+]) +").expect("combinator pattern is valid"));

/// Check whether a class follows the static class naming convention
/// (`sc-…`, or `…-sc-…`/`…__sc-…` for custom display names).
pub fn is_static_class(class: &str) -> bool {
    STATIC_CLASS.is_match(class)
}

/// Build the selector for `class` under `modifier`.
///
/// - no modifier: `.class`
/// - modifier with `&`: each `&` followed later by another `&` becomes
///   `.static_class`, the last one becomes `.class`
/// - otherwise: `.class` then the modifier, separated by a space unless the
///   modifier starts with `:` or `[`
///
/// ```
/// use styled_assert::selector::modified_class_name;
///
/// assert_eq!(modified_class_name("sc-xyz123", "sc-abc", Some(":hover")), ".sc-xyz123:hover");
/// assert_eq!(modified_class_name("sc-xyz123", "sc-abc", Some("&&")), ".sc-abc.sc-xyz123");
/// assert_eq!(modified_class_name("sc-xyz123", "sc-abc", Some("span")), ".sc-xyz123 span");
/// ```
pub fn modified_class_name(class: &str, static_class: &str, modifier: Option<&str>) -> String {
    let class_selector = format!(".{class}");
    let modifier = modifier.unwrap_or_default().trim();

    if let Some(last) = modifier.rfind('&') {
        let static_selector = format!(".{static_class}");
        let mut selector = String::with_capacity(modifier.len() + class_selector.len());
        for (i, c) in modifier.char_indices() {
            match c {
                '&' if i == last => selector.push_str(&class_selector),
                '&' => selector.push_str(&static_selector),
                c => selector.push(c),
            }
        }
        return selector;
    }

    let mut selector = class_selector;
    if !modifier.is_empty() && !modifier.starts_with([':', '[']) {
        selector.push(' ');
    }
    selector.push_str(modifier);
    selector
}

/// Drop the spaces after `>`, `~` and `+`, which compilers emit inconsistently.
pub fn remove_space_after_combinator(selector: &str) -> String {
    SPACE_AFTER_COMBINATOR
        .replace_all(selector, "$1")
        .into_owned()
}

/// Use double quotes throughout.
pub fn normalize_quotes(selector: &str) -> String {
    selector.replace('\'', "\"")
}

/// Normalize a selector for comparison.
pub fn normalize_selector(selector: &str) -> String {
    remove_space_after_combinator(&normalize_quotes(selector))
}
