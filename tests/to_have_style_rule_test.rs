//! End-to-end `to_have_style_rule` tests.
//!
//! Each test registers the rules a styled-components build would emit for a
//! component (selectors in the form the compiler prints them) and asserts
//! against an element carrying the component's static and generated classes.

use std::panic::{AssertUnwindSafe, catch_unwind};

use regex::Regex;
use styled_assert::{
    ComponentRef, Element, Expected, MatchOptions, Matcher, Modifier, Registry, StyleAssertion,
    StyleEngine, any_string, anything, expect_style, string_containing, string_matching,
};

fn matcher(components: &[(&str, &str, &[&str])]) -> Matcher<Registry> {
    let mut registry = Registry::new();
    for (id, name, rules) in components {
        registry.insert_rules(id, name, rules);
    }
    Matcher::new(registry).expect("registry is available")
}

fn element(classes: &str) -> Element {
    Element::new("div").with_class(classes)
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

/// The panic message of a failing assertion.
fn failure<F: FnOnce()>(assertion: F) -> String {
    let payload = catch_unwind(AssertUnwindSafe(assertion)).expect_err("assertion should fail");
    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_default()
}

// ============================================================================
// Missing elements and messages
// ============================================================================

#[test]
fn test_null_element() {
    let matcher = matcher(&[]);
    StyleAssertion::of(&matcher, None).not().to_have_style_rule("a", "b");
}

#[test]
fn test_non_styled_element() {
    let matcher = matcher(&[]);
    expect_style(&matcher, &element("")).not().to_have_style_rule("a", "b");
}

#[test]
fn test_message_when_rules_not_found() {
    let matcher = matcher(&[]);
    let message = failure(|| expect_style(&matcher, &element("")).to_have_style_rule("color", "black"));
    assert_eq!(message, "No style rules found on passed element");
}

#[test]
fn test_message_when_rules_not_found_using_options() {
    let matcher = matcher(&[("sc-button", "b", &[".b{color:red;}"])]);
    let button = element("sc-button b");

    expect_style(&matcher, &button).to_have_style_rule("color", "red");

    let options = MatchOptions::new().media("(max-width:640px)").modifier(":hover");
    let message =
        failure(|| expect_style(&matcher, &button).to_have_style_rule_with("color", "red", &options));
    assert_eq!(
        message,
        "No style rules found on passed element using options:\n\
         {\"media\":\"(max-width:640px)\",\"modifier\":\":hover\"}"
    );
}

#[test]
fn test_message_when_property_not_found() {
    let matcher = matcher(&[("sc-button", "b", &[".b{color:red;}"])]);
    let message = failure(|| {
        expect_style(&matcher, &element("sc-button b")).to_have_style_rule("background-color", "black")
    });
    assert!(message.starts_with("Property 'background-color' not found in style rules"));
    assert!(message.ends_with("Received:\n  background-color: undefined"));
}

#[test]
fn test_message_when_value_does_not_match() {
    let matcher = matcher(&[("sc-wrapper", "w", &[".w{background:orange;}"])]);
    let message = failure(|| {
        expect_style(&matcher, &element("sc-wrapper w")).to_have_style_rule("background", "red")
    });
    assert_eq!(
        message,
        "Value mismatch for property 'background'\n\n\
         Expected\n  background: red\nReceived:\n  background: orange"
    );
}

// ============================================================================
// Values
// ============================================================================

#[test]
fn test_basic() {
    let matcher = matcher(&[("sc-wrapper", "w", &[".w{padding:4em;background:papayawhip;}"])]);
    expect_style(&matcher, &element("sc-wrapper w")).to_have_style_rule("background", "papayawhip");
}

#[test]
fn test_regex() {
    let matcher = matcher(&[("sc-wrapper", "w", &[".w{padding:4em;background:papayawhip;}"])]);
    expect_style(&matcher, &element("sc-wrapper w")).to_have_style_rule("background", re("^p"));
}

#[test]
fn test_complex_string() {
    let matcher = matcher(&[("sc-wrapper", "w", &[".w{border:1px solid rgba(0, 0, 0, 0.125);}"])]);
    expect_style(&matcher, &element("sc-wrapper w"))
        .to_have_style_rule("border", "1px solid rgba(0,0,0,0.125)");
}

#[test]
fn test_undefined() {
    let matcher = matcher(&[
        ("sc-button", "e", &[".e{cursor:pointer;}"]),
        ("sc-button", "d", &[".d{opacity:.65;}"]),
    ]);
    let enabled = element("sc-button e");
    let disabled = element("sc-button d");

    expect_style(&matcher, &enabled).to_have_style_rule("opacity", None);
    expect_style(&matcher, &enabled).to_have_style_rule("cursor", "pointer");
    expect_style(&matcher, &disabled).to_have_style_rule("opacity", ".65");
    expect_style(&matcher, &disabled).to_have_style_rule("cursor", None);
}

#[test]
fn test_negated_with_no_value() {
    let matcher = matcher(&[
        ("sc-button", "e", &[".e{cursor:pointer;}"]),
        ("sc-button", "d", &[".d{opacity:.65;}"]),
    ]);

    expect_style(&matcher, &element("sc-button e")).not().to_have_style_rule("opacity", None);
    expect_style(&matcher, &element("sc-button d")).to_have_style_rule("opacity", ".65");
}

#[test]
fn test_negated_with_value() {
    let matcher = matcher(&[("sc-button", "b", &[".b{opacity:0.65;}"])]);
    let button = element("sc-button b");

    expect_style(&matcher, &button).not().to_have_style_rule("opacity", "0.50");
    expect_style(&matcher, &button).not().to_have_style_rule("opacity", "");
    expect_style(&matcher, &button).not().to_have_style_rule("opacity", Expected::Null);
    failure(|| expect_style(&matcher, &button).to_have_style_rule("opacity", None));
}

#[test]
fn test_negated_fails_when_rule_present_with_no_value() {
    let matcher = matcher(&[("sc-button", "b", &[".b{opacity:0.65;}"])]);
    let button = element("sc-button b");

    expect_style(&matcher, &button).to_have_style_rule("opacity", "0.65");
    let message = failure(|| expect_style(&matcher, &button).not().to_have_style_rule("opacity", None));
    assert!(message.starts_with("Value mismatch for property 'opacity'"));
}

#[test]
fn test_asymmetric_matchers() {
    let matcher = matcher(&[
        ("sc-button", "k", &[".k{border:0.1em solid black;}"]),
        ("sc-button", "t", &[".t{border:0.1em solid transparent;}"]),
    ]);
    let button = element("sc-button k");
    let transparent = element("sc-button t");

    expect_style(&matcher, &button).to_have_style_rule("border", any_string());
    expect_style(&matcher, &button).to_have_style_rule("border", string_matching(re("solid")));
    expect_style(&matcher, &button).to_have_style_rule("border", string_matching(re("^0.1em")));
    expect_style(&matcher, &button).to_have_style_rule("border", string_containing("black"));
    expect_style(&matcher, &transparent)
        .not()
        .to_have_style_rule("border", string_containing("black"));
    expect_style(&matcher, &transparent).to_have_style_rule("border", string_containing("transparent"));
    expect_style(&matcher, &button).not().to_have_style_rule("color", any_string());
    expect_style(&matcher, &button).not().to_have_style_rule("color", anything());
}

#[test]
fn test_last_declaration_across_rules_wins() {
    // a styled(Parent) element carries both components' classes
    let matcher = matcher(&[
        ("sc-parent", "p", &[".p{color:red;padding:1em;}"]),
        ("sc-child", "c", &[".c{padding:0;}"]),
    ]);
    let child = element("sc-parent p sc-child c");

    expect_style(&matcher, &child).to_have_style_rule("color", "red");
    expect_style(&matcher, &child).to_have_style_rule("padding", "0");
}

#[test]
fn test_important_stays_in_the_value() {
    let matcher = matcher(&[("sc-a", "a", &[".a{color:red !important;}"])]);
    let el = element("sc-a a");

    expect_style(&matcher, &el).to_have_style_rule("color", "red !important");
    expect_style(&matcher, &el).not().to_have_style_rule("color", "red");
}

// ============================================================================
// At-rules
// ============================================================================

fn at_rules_matcher() -> Matcher<Registry> {
    matcher(&[(
        "sc-wrapper",
        "w",
        &[
            ".w{color:red;}",
            "@media (max-width: 640px){.w{color:green;}}",
            "@media (min-width: 200px) and (max-width: 640px){.w{color:blue;}}",
            "@media (min-width: 576px) and (max-width: 767.98px){.w{color:red;}}",
            "@media (min-width: calc(768px + 1px)) and (max-width:calc(1024px + 1px)){.w{color:purple;}}",
            "@supports (display: grid){.w{display:grid;}}",
        ],
    )])
}

#[test]
fn test_at_rules() {
    let matcher = at_rules_matcher();
    let wrapper = element("sc-wrapper w");
    let assert_media = |value: &str, query: &str| {
        expect_style(&matcher, &wrapper).to_have_style_rule_with(
            "color",
            value,
            &MatchOptions::new().media(query),
        );
    };

    expect_style(&matcher, &wrapper).to_have_style_rule("color", "red");
    assert_media("green", "(max-width:640px)");
    assert_media("green", "(max-width: 640px)");
    assert_media("blue", "(min-width:200px) and (max-width:640px)");
    assert_media("blue", "(min-width: 200px) and (max-width: 640px)");
    assert_media("blue", "(min-width: 200px) and (max-width:640px)");
    assert_media("blue", "(min-width:200px) and (max-width: 640px)");
    assert_media("red", "(min-width: 576px) and (max-width: 767.98px)");
    assert_media("purple", "(min-width: calc(768px + 1px)) and (max-width:calc(1024px + 1px))");
}

#[test]
fn test_supports() {
    let matcher = at_rules_matcher();
    let wrapper = element("sc-wrapper w");

    expect_style(&matcher, &wrapper).to_have_style_rule_with(
        "display",
        "grid",
        &MatchOptions::new().supports("(display:grid)"),
    );
    expect_style(&matcher, &wrapper).not().to_have_style_rule("display", "grid");
}

#[test]
fn test_media_and_supports_together() {
    let matcher = at_rules_matcher();
    let options = MatchOptions::new()
        .media("(max-width: 640px)")
        .supports("(display: grid)");

    let message = failure(|| {
        expect_style(&matcher, &element("sc-wrapper w")).to_have_style_rule_with("color", "green", &options)
    });
    assert!(message.contains(r#"{"media":"(max-width: 640px)","supports":"(display: grid)"}"#));
}

// ============================================================================
// Selector modifiers
// ============================================================================

fn link_matcher() -> Matcher<Registry> {
    matcher(&[(
        "sc-link",
        "l",
        &[
            ".l{color:white;}",
            ".l:hover{color:blue;}",
            ".l::after{color:red;}",
            ".l[href*='somelink.com']{color:green;}",
            ".l >div{color:yellow;}",
            ".l span{color:purple;}",
            ".l .child{color:orange;}",
            ".l.self{color:black;}",
            ".l .one,.l .two{color:olive;}",
            ".l ~div.one,.l ~div.two{color:pink;}",
            ".l +div .one,.l +div .two{color:salmon;}",
            ".parent .l{color:red;}",
            ".sc-link.l{color:fuchsia;}",
            ".sc-link.sc-link.l{color:olive;}",
            ".sc-link .l{color:deepskyblue;}",
        ],
    )])
}

#[test]
fn test_selector_modifiers() {
    let matcher = link_matcher();
    let link = element("sc-link l");
    let assert_modifier = |value: &str, modifier: &str| {
        expect_style(&matcher, &link).to_have_style_rule_with(
            "color",
            value,
            &MatchOptions::new().modifier(modifier),
        );
    };

    expect_style(&matcher, &link).to_have_style_rule("color", "white");
    assert_modifier("blue", ":hover");
    assert_modifier("red", "::after");
    assert_modifier("green", "[href*='somelink.com']");
    assert_modifier("yellow", "> div");
    assert_modifier("purple", "span");
    assert_modifier("purple", " span");
    assert_modifier("orange", ".child");
    assert_modifier("orange", " .child");
    assert_modifier("black", "&.self");
    assert_modifier("olive", ".one");
    assert_modifier("olive", ".two");
    assert_modifier("pink", "~ div.one");
    assert_modifier("salmon", "+ div .two");
    assert_modifier("red", ".parent &");
}

#[test]
fn test_precedence_boost_modifiers() {
    let matcher = link_matcher();
    let link = element("sc-link l");
    let assert_modifier = |value: &str, modifier: &str| {
        expect_style(&matcher, &link).to_have_style_rule_with(
            "color",
            value,
            &MatchOptions::new().modifier(modifier),
        );
    };

    assert_modifier("fuchsia", "&&");
    assert_modifier("olive", "&&&");
    assert_modifier("deepskyblue", "& &");
}

#[test]
fn test_component_modifiers() {
    let text = ComponentRef::new("sc-text");
    let matcher = matcher(&[
        ("sc-text", "t", &[".t{color:grey;}"]),
        (
            "sc-link",
            "l",
            &[
                ".l{color:white;}",
                ".l .sc-text{color:blue;}",
                ".l >.sc-text span{color:green;}",
                ".sc-text .l{color:purple;}",
            ],
        ),
    ]);
    let link = element("sc-link l").with_child(element("sc-text t"));

    expect_style(&matcher, &link).to_have_style_rule("color", "white");
    expect_style(&matcher, &element("sc-text t")).to_have_style_rule("color", "grey");

    let with = |modifier: Modifier| MatchOptions::new().modifier(modifier);
    expect_style(&matcher, &link).to_have_style_rule_with(
        "color",
        "blue",
        &with(Modifier::composed().component(&text)),
    );
    expect_style(&matcher, &link).to_have_style_rule_with(
        "color",
        "green",
        &with(Modifier::composed().raw("> ").component(&text).raw(" span")),
    );
    expect_style(&matcher, &link).to_have_style_rule_with(
        "color",
        "purple",
        &with(Modifier::composed().component(&text).raw(" &")),
    );
}

// ============================================================================
// Component shapes
// ============================================================================

#[test]
fn test_nested_with_styling() {
    let matcher = matcher(&[
        ("sc-wrapper", "w", &[".w{background:papayawhip;}"]),
        ("sc-children", "g", &[".g{background:gray;}"]),
        ("sc-styled", "s", &[".s{color:red;}"]),
    ]);
    let parent = element("sc-wrapper w sc-styled s").with_child(element("sc-children g test-class"));

    expect_style(&matcher, &element("sc-wrapper w sc-styled s")).to_have_style_rule("color", "red");
    expect_style(&matcher, &element("sc-wrapper w test-class sc-styled s"))
        .to_have_style_rule("color", "red");

    let child = parent.first_child().expect("child element");
    expect_style(&matcher, child).to_have_style_rule("background", "gray");
}

#[test]
fn test_custom_display_name_prefix() {
    let matcher = matcher(&[
        ("Text__sc-abc", "t", &[".t{color:red;}"]),
        ("Comp__Sub-sc-def", "c", &[".c{background:papayawhip;}"]),
    ]);
    let comp = element("Text__sc-abc t Comp__Sub-sc-def c");

    expect_style(&matcher, &comp).to_have_style_rule("background", "papayawhip");
    expect_style(&matcher, &comp).to_have_style_rule("color", "red");
}

#[test]
fn test_snake_case_display_name_prefix() {
    let matcher = matcher(&[("test-case-sc-xyz", "x", &[".x{color:blue;}"])]);
    expect_style(&matcher, &element("test-case-sc-xyz x")).to_have_style_rule("color", "blue");
}

// ============================================================================
// Engines
// ============================================================================

#[test]
fn test_client_registry() {
    let mut registry = Registry::with_document();
    registry.insert_rules("sc-wrapper", "w", &[".w{color:red;}", "@media (max-width: 640px){.w{color:green;}}"]);
    let matcher = Matcher::new(registry).expect("registry");
    let wrapper = element("sc-wrapper w");

    expect_style(&matcher, &wrapper).to_have_style_rule("color", "red");
    expect_style(&matcher, &wrapper).to_have_style_rule_with(
        "color",
        "green",
        &MatchOptions::new().media("(max-width:640px)"),
    );
}

#[test]
fn test_rules_added_after_the_matcher_are_seen() {
    let mut matcher = matcher(&[]);
    let button = element("sc-button b");
    expect_style(&matcher, &button).not().to_have_style_rule("color", "red");

    matcher.engine_mut().insert_rules("sc-button", "b", &[".b{color:red;}"]);
    expect_style(&matcher, &button).to_have_style_rule("color", "red");
}

#[test]
fn test_reset_between_tests() {
    let mut registry = Registry::with_document();
    registry.insert_rules("sc-button", "b", &[".b{color:red;}"]);
    let mut matcher = Matcher::new(registry).expect("registry");

    matcher.reset();
    assert_eq!(matcher.engine().names_len(), 0);
    assert!(
        matcher
            .engine()
            .document()
            .is_some_and(|document| document.engine_style_tags().next().is_none())
    );

    let result = matcher.to_have_style_rule(
        Some(&element("sc-button b")),
        "color",
        "red",
        &MatchOptions::new(),
        false,
    );
    assert!(result.is_no_rules());

    matcher.reset();
    assert!(matches!(
        matcher.engine().serialized(),
        Ok(styled_assert::Serialized::Sheet(ref css)) if css.is_empty()
    ));
}

#[test]
fn test_hashes() {
    let mut registry = Registry::new();
    registry.insert_rules("sc-a", "x", &[".x{color:red;}"]);
    registry.insert_rules("sc-b", "y", &[".y{color:blue;}"]);
    registry.insert_rules("sc-a", "z", &[".z{color:green;}"]);

    assert_eq!(registry.hashes(), vec!["sc-a", "x", "z", "sc-b", "y"]);
}
