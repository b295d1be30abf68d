//! Finding the rules and declarations that apply to an element.

use log::debug;

use crate::css::{CssRule, Declaration, Stylesheet, media_queries_equal, supports_equal};
use crate::element::ClassList;
use crate::matcher::ResolvedOptions;
use crate::selector::{modified_class_name, normalize_selector};

/// Candidate rules for an element, in stylesheet order.
///
/// With a media or supports option, the top-level at-rules with an equivalent
/// query are returned and class names are not consulted. Otherwise the
/// top-level style rules with a selector built from the element's classes.
pub fn locate_rules<'s>(
    sheet: &'s Stylesheet,
    class_list: &ClassList,
    options: &ResolvedOptions,
) -> Vec<&'s CssRule> {
    let rules: Vec<&CssRule> = if options.has_at_rule() {
        at_rules(sheet, options)
    } else {
        sheet
            .rules
            .iter()
            .filter(|rule| match rule {
                CssRule::Style(style) => {
                    has_class_names(class_list, &style.selectors, options.modifier.as_deref())
                }
                _ => false,
            })
            .collect()
    };

    debug!(
        "{} of {} rules match classes {:?}",
        rules.len(),
        sheet.rules.len(),
        class_list
    );
    rules
}

fn at_rules<'s>(sheet: &'s Stylesheet, options: &ResolvedOptions) -> Vec<&'s CssRule> {
    let mut rules: Vec<&CssRule> = sheet.rules.iter().collect();

    if let Some(media) = options.media() {
        rules.retain(|rule| {
            matches!(rule, CssRule::Media(at) if media_queries_equal(&at.query, media))
        });
    }

    if let Some(supports) = options.supports() {
        rules.retain(|rule| {
            matches!(rule, CssRule::Supports(at) if supports_equal(&at.query, supports))
        });
    }

    rules
}

/// Whether some (class, static class) pair rebuilds one of `selectors`.
fn has_class_names(class_list: &ClassList, selectors: &[String], modifier: Option<&str>) -> bool {
    let selectors: Vec<String> = selectors.iter().map(|s| normalize_selector(s)).collect();

    class_list.iter().any(|class| {
        class_list.static_classes().any(|static_class| {
            let selector = modified_class_name(class, static_class, modifier);
            selectors.contains(&normalize_selector(&selector))
        })
    })
}

/// The declaration of `property` a rule contributes.
///
/// In a style rule the last declaration wins. In a media or supports rule the
/// first nested rule that declares the property wins.
pub fn locate_declaration<'s>(rule: &'s CssRule, property: &str) -> Option<&'s Declaration> {
    match rule {
        CssRule::Style(style) => style
            .declarations()
            .filter(|declaration| declaration.property == property)
            .last(),
        CssRule::Media(at) | CssRule::Supports(at) => at
            .rules
            .iter()
            .find_map(|nested| locate_declaration(nested, property)),
        CssRule::Other(_) => None,
    }
}

/// Declarations of `property` across `rules`, in order. The last one applies.
pub fn locate_declarations<'s>(rules: &[&'s CssRule], property: &str) -> Vec<&'s Declaration> {
    rules
        .iter()
        .filter_map(|&rule| locate_declaration(rule, property))
        .collect()
}
