//! Structural equality of CSS fragments.
//!
//! Two fragments are equal when they parse to the same component tree.
//! Whitespace and comments are not part of the tree, quoted strings keep only
//! their contents, and numbers keep their numeric value, so `rgba(0,0,0,.5)`
//! and `rgba(0, 0, 0, 0.5)` compare equal while `1px` and `2px` do not.

use cssparser::{ParseError, Parser, ParserInput, Token};

/// A node of a parsed fragment.
#[derive(Debug, Clone, PartialEq)]
enum Component {
    Ident(String),
    AtKeyword(String),
    Hash(String),
    String(String),
    Url(String),
    Delim(char),
    Number { value: f32, integer: bool },
    Percentage { value: f32, integer: bool },
    Dimension { value: f32, integer: bool, unit: String },
    Colon,
    Semicolon,
    Comma,
    /// `~=`, `|=`, `^=`, `$=`, `*=`, `<!--`, `-->`
    Matcher(&'static str),
    Function { name: String, arguments: Vec<Component> },
    Block { kind: BlockKind, contents: Vec<Component> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Parenthesis,
    Square,
    Curly,
}

/// The syntactic position a fragment is parsed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FragmentKind {
    Value,
    MediaQuery,
    Supports,
}

impl FragmentKind {
    /// Wrap a fragment in the smallest stylesheet that gives it context.
    fn wrap(self, fragment: &str) -> String {
        match self {
            FragmentKind::Value => format!("* {{ prop: {fragment}; }}"),
            FragmentKind::MediaQuery => format!("@media {fragment} {{}}"),
            FragmentKind::Supports => format!("@supports {fragment} {{}}"),
        }
    }
}

/// Compare two CSS property values.
///
/// ```
/// use styled_assert::css::values_equal;
///
/// assert!(values_equal("1px solid red", "1px solid red"));
/// assert!(values_equal("rgba(0, 0, 0, 0.5)", "rgba(0,0,0,0.5)"));
/// assert!(!values_equal("1px solid red", "1px solid blue"));
/// ```
pub fn values_equal(a: &str, b: &str) -> bool {
    fragments_equal(FragmentKind::Value, a, b)
}

/// Compare two media queries.
///
/// ```
/// use styled_assert::css::media_queries_equal;
///
/// assert!(media_queries_equal("(max-width:640px)", "(max-width: 640px)"));
/// assert!(!media_queries_equal("(min-width: 100px)", "(min-width: 200px)"));
/// ```
pub fn media_queries_equal(a: &str, b: &str) -> bool {
    fragments_equal(FragmentKind::MediaQuery, a, b)
}

/// Compare two supports queries.
///
/// ```
/// use styled_assert::css::supports_equal;
///
/// assert!(supports_equal("(display: grid)", "(display:grid)"));
/// assert!(!supports_equal("(display: grid)", "(display: flex)"));
/// ```
pub fn supports_equal(a: &str, b: &str) -> bool {
    fragments_equal(FragmentKind::Supports, a, b)
}

fn fragments_equal(kind: FragmentKind, a: &str, b: &str) -> bool {
    match (parse_fragment(kind, a), parse_fragment(kind, b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Parse a wrapped fragment, or `None` if it does not tokenize cleanly.
fn parse_fragment(kind: FragmentKind, fragment: &str) -> Option<Vec<Component>> {
    let wrapped = kind.wrap(fragment);
    let mut input = ParserInput::new(&wrapped);
    let mut parser = Parser::new(&mut input);
    parse_components(&mut parser).ok()
}

fn parse_components<'i>(input: &mut Parser<'i, '_>) -> Result<Vec<Component>, ParseError<'i, ()>> {
    let mut components = Vec::new();

    loop {
        let token = match input.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        let component = match token {
            Token::Function(name) => Component::Function {
                name: name.as_ref().to_owned(),
                arguments: input.parse_nested_block(parse_components)?,
            },
            Token::ParenthesisBlock => Component::Block {
                kind: BlockKind::Parenthesis,
                contents: input.parse_nested_block(parse_components)?,
            },
            Token::SquareBracketBlock => Component::Block {
                kind: BlockKind::Square,
                contents: input.parse_nested_block(parse_components)?,
            },
            Token::CurlyBracketBlock => Component::Block {
                kind: BlockKind::Curly,
                contents: input.parse_nested_block(parse_components)?,
            },
            Token::BadUrl(_)
            | Token::BadString(_)
            | Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::CloseCurlyBracket => return Err(input.new_custom_error(())),
            Token::Ident(value) => Component::Ident(value.as_ref().to_owned()),
            Token::AtKeyword(value) => Component::AtKeyword(value.as_ref().to_owned()),
            Token::Hash(value) | Token::IDHash(value) => Component::Hash(value.as_ref().to_owned()),
            Token::QuotedString(value) => Component::String(value.as_ref().to_owned()),
            Token::UnquotedUrl(value) => Component::Url(value.as_ref().to_owned()),
            Token::Delim(c) => Component::Delim(c),
            Token::Number {
                value, int_value, ..
            } => Component::Number {
                value,
                integer: int_value.is_some(),
            },
            Token::Percentage {
                unit_value,
                int_value,
                ..
            } => Component::Percentage {
                value: unit_value,
                integer: int_value.is_some(),
            },
            Token::Dimension {
                value,
                int_value,
                unit,
                ..
            } => Component::Dimension {
                value,
                integer: int_value.is_some(),
                unit: unit.as_ref().to_owned(),
            },
            Token::Colon => Component::Colon,
            Token::Semicolon => Component::Semicolon,
            Token::Comma => Component::Comma,
            Token::IncludeMatch => Component::Matcher("~="),
            Token::DashMatch => Component::Matcher("|="),
            Token::PrefixMatch => Component::Matcher("^="),
            Token::SuffixMatch => Component::Matcher("$="),
            Token::SubstringMatch => Component::Matcher("*="),
            Token::CDO => Component::Matcher("<!--"),
            Token::CDC => Component::Matcher("-->"),
            Token::WhiteSpace(_) | Token::Comment(_) => continue,
        };
        components.push(component);
    }

    Ok(components)
}
