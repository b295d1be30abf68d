//! Stylesheet parsing into a rule tree.
//!
//! The tree keeps selectors, at-rule queries and declaration values as the
//! text that was written (comments stripped, whitespace collapsed). Values are
//! only parsed when they are compared, see [`super::equivalence`].

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, StyleSheetParser, Token,
};
use log::trace;

/// A parsed CSS stylesheet.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}

/// A top-level or nested rule.
#[derive(Debug, Clone, PartialEq)]
pub enum CssRule {
    /// `selector, selector { ... }`
    Style(StyleRule),
    /// `@media <query> { ... }`
    Media(ConditionRule),
    /// `@supports <query> { ... }`
    Supports(ConditionRule),
    /// Any other at-rule (`@keyframes`, `@font-face`, `@import`, ...).
    Other(AtRule),
}

/// A style rule: a selector list and its block.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub selectors: Vec<String>,
    /// Block contents in source order.
    pub items: Vec<BlockItem>,
}

/// One entry of a style rule's block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockItem {
    Declaration(Declaration),
    /// A nested rule (CSS nesting).
    Rule(CssRule),
}

/// An at-rule whose block applies under a condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionRule {
    pub query: String,
    pub rules: Vec<CssRule>,
}

/// An at-rule this crate does not interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// Lowercased name without the `@`.
    pub name: String,
    pub prelude: String,
    pub rules: Vec<CssRule>,
}

/// A CSS property-value pair, kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    /// Value text, including a trailing `!important` if present.
    pub value: String,
}

impl Stylesheet {
    /// Parse a CSS stylesheet from a string.
    ///
    /// Parsing is lenient: invalid rules are skipped.
    pub fn parse(css: &str) -> Self {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut rule_parser = RuleParser {
            declarations: false,
        };

        let rules = StyleSheetParser::new(&mut parser, &mut rule_parser)
            .filter_map(|result| match result {
                Ok(item) => item.into_rule(),
                Err((_, slice)) => {
                    trace!("skipping invalid rule: {slice}");
                    None
                }
            })
            .collect();

        Self { rules }
    }

    /// Check if the stylesheet has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl StyleRule {
    /// Declarations of this block in source order, skipping nested rules.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.items.iter().filter_map(|item| match item {
            BlockItem::Declaration(declaration) => Some(declaration),
            BlockItem::Rule(_) => None,
        })
    }
}

impl BlockItem {
    fn into_rule(self) -> Option<CssRule> {
        match self {
            BlockItem::Rule(rule) => Some(rule),
            BlockItem::Declaration(_) => None,
        }
    }
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Rule parser
// =============================================================================

/// Parser shared by the top level, at-rule blocks and style rule blocks.
struct RuleParser {
    /// Whether declarations are accepted in the block being parsed.
    declarations: bool,
}

struct AtRulePrelude {
    name: String,
    prelude: String,
}

fn parse_rule_body<'i>(input: &mut Parser<'i, '_>, declarations: bool) -> Vec<BlockItem> {
    let mut parser = RuleParser { declarations };
    RuleBodyParser::new(input, &mut parser)
        .filter_map(|result| match result {
            Ok(item) => Some(item),
            Err((_, slice)) => {
                trace!("skipping invalid block item: {slice}");
                None
            }
        })
        .collect()
}

impl<'i> QualifiedRuleParser<'i> for RuleParser {
    type Prelude = Vec<String>;
    type QualifiedRule = BlockItem;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        input.parse_comma_separated(|input| {
            let selector = clean_text(input)?;
            if selector.is_empty() {
                return Err(input.new_custom_error(()));
            }
            Ok(selector)
        })
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Ok(BlockItem::Rule(CssRule::Style(StyleRule {
            selectors: prelude,
            items: parse_rule_body(input, true),
        })))
    }
}

impl<'i> AtRuleParser<'i> for RuleParser {
    type Prelude = AtRulePrelude;
    type AtRule = BlockItem;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(AtRulePrelude {
            name: name.to_ascii_lowercase(),
            prelude: clean_text(input)?,
        })
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(BlockItem::Rule(CssRule::Other(AtRule {
            name: prelude.name,
            prelude: prelude.prelude,
            rules: Vec::new(),
        })))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let rules = parse_rule_body(input, true)
            .into_iter()
            .filter_map(BlockItem::into_rule)
            .collect();

        let rule = match prelude.name.as_str() {
            "media" => CssRule::Media(ConditionRule {
                query: prelude.prelude,
                rules,
            }),
            "supports" => CssRule::Supports(ConditionRule {
                query: prelude.prelude,
                rules,
            }),
            _ => CssRule::Other(AtRule {
                name: prelude.name,
                prelude: prelude.prelude,
                rules,
            }),
        };
        Ok(BlockItem::Rule(rule))
    }
}

impl<'i> DeclarationParser<'i> for RuleParser {
    type Declaration = BlockItem;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.state();
        let mut has_block = false;
        while let Ok(token) = input.next() {
            if matches!(token, Token::CurlyBracketBlock) {
                has_block = true;
            }
        }
        // `a:hover { ... }` starts like a declaration; let it reparse as a rule.
        if has_block {
            return Err(input.new_custom_error(()));
        }
        input.reset(&start);

        Ok(BlockItem::Declaration(Declaration {
            property: name.as_ref().to_owned(),
            value: clean_text(input)?,
        }))
    }
}

impl<'i> RuleBodyItemParser<'i, BlockItem, ()> for RuleParser {
    fn parse_declarations(&self) -> bool {
        self.declarations
    }
    fn parse_qualified(&self) -> bool {
        true
    }
}

/// Source text of the remaining tokens with comments dropped and whitespace
/// runs collapsed to one space. Blocks are written with their contents.
fn clean_text<'i>(input: &mut Parser<'i, '_>) -> Result<String, ParseError<'i, ()>> {
    let mut out = String::new();
    write_clean_text(input, &mut out)?;
    Ok(out)
}

fn write_clean_text<'i>(
    input: &mut Parser<'i, '_>,
    out: &mut String,
) -> Result<(), ParseError<'i, ()>> {
    let mut pending_space = false;

    loop {
        let start = input.position();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        let close = match token {
            Token::WhiteSpace(_) => {
                pending_space = true;
                continue;
            }
            Token::Comment(_) => continue,
            Token::Function(_) | Token::ParenthesisBlock => Some(')'),
            Token::SquareBracketBlock => Some(']'),
            Token::CurlyBracketBlock => Some('}'),
            _ => None,
        };

        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push_str(input.slice_from(start));

        if let Some(close) = close {
            input.parse_nested_block(|input| write_clean_text(input, out))?;
            out.push(close);
        }
    }

    Ok(())
}
