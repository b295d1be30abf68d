//! styled-assert - check a style rule in a dumped stylesheet

use std::process::ExitCode;

use clap::Parser;
use regex::Regex;

use styled_assert::{Element, Expected, MatchOptions, Matcher, Result, Snapshot};

#[derive(Parser)]
#[command(name = "styled-assert")]
#[command(version, about = "Check a style rule in a dumped stylesheet", long_about = None)]
#[command(after_help = "EXAMPLES:
    styled-assert styles.css --class sc-a --class hxsQk color red
    styled-assert styles.css -c sc-a -c hxsQk color blue --modifier :hover
    styled-assert styles.html -c sc-a -c hxsQk opacity --not")]
struct Cli {
    /// Stylesheet or server-rendered style tags
    #[arg(value_name = "SHEET")]
    sheet: String,

    /// Class on the element (repeatable)
    #[arg(short, long = "class", value_name = "CLASS")]
    classes: Vec<String>,

    /// Property to check
    #[arg(value_name = "PROPERTY")]
    property: String,

    /// Expected value; omit to assert the property is absent
    #[arg(value_name = "VALUE")]
    value: Option<String>,

    /// Only look inside @media rules with this query
    #[arg(long)]
    media: Option<String>,

    /// Only look inside @supports rules with this query
    #[arg(long)]
    supports: Option<String>,

    /// Selector fragment merged with the element's selector
    #[arg(long)]
    modifier: Option<String>,

    /// Treat VALUE as a regular expression
    #[arg(short, long)]
    regex: bool,

    /// Negate the assertion
    #[arg(short, long)]
    not: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match check(&cli) {
        Ok(Some(true)) => {
            if !cli.quiet {
                println!("ok");
            }
            ExitCode::SUCCESS
        }
        Ok(Some(false)) => ExitCode::from(1),
        Ok(None) => ExitCode::from(2),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

/// `None` when the sheet could not be read during the lookup.
fn check(cli: &Cli) -> Result<Option<bool>> {
    let matcher = Matcher::new(Snapshot::open(&cli.sheet)?)?;
    let element = Element::new("div").with_class(&cli.classes.join(" "));

    let expected = match (&cli.value, cli.regex) {
        (Some(value), true) => Expected::Pattern(Regex::new(value)?),
        (Some(value), false) => Expected::from(value.as_str()),
        (None, _) => Expected::Unspecified,
    };

    let mut options = MatchOptions::new();
    if let Some(media) = &cli.media {
        options = options.media(media);
    }
    if let Some(supports) = &cli.supports {
        options = options.supports(supports);
    }
    if let Some(modifier) = &cli.modifier {
        options = options.modifier(modifier.as_str());
    }

    let result = matcher.to_have_style_rule(Some(&element), &cli.property, expected, &options, cli.not);
    if result.is_engine_error() {
        eprintln!("error: {}", result.message());
        return Ok(None);
    }
    let ok = result.pass() != cli.not;
    if !ok && !cli.quiet {
        eprintln!("{}", result.message());
    }
    Ok(Some(ok))
}
