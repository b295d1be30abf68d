//! Reading the active stylesheet out of a styling engine.

use std::sync::LazyLock;

use log::{debug, trace};
use regex::Regex;

use crate::css::Stylesheet;
use crate::engine::{Serialized, StyleEngine};
use crate::error::Result;

static STYLE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style[^>]*>(.*?)</style>").expect("style tag pattern is valid")
});

/// Parse the engine's current output.
///
/// Nothing is cached: every call reflects the engine as it is now.
pub fn current_stylesheet<E: StyleEngine + ?Sized>(engine: &E) -> Result<Stylesheet> {
    let css = style_text(engine)?;
    debug!("parsing {} bytes of engine css", css.len());
    Ok(Stylesheet::parse(&css))
}

/// The engine's rule text with bookkeeping lines removed.
pub fn style_text<E: StyleEngine + ?Sized>(engine: &E) -> Result<String> {
    let text = match engine.serialized()? {
        Serialized::Sheet(css) => css,
        Serialized::StyleTags(html) => style_tag_contents(&html),
    };
    let attr = engine.bookkeeping_attr();

    let lines: Vec<&str> = text
        .lines()
        .filter(|line| {
            let keep = !is_bookkeeping_line(line, attr);
            if !keep {
                trace!("dropping bookkeeping line: {line}");
            }
            keep
        })
        .filter(|line| !line.trim().is_empty())
        .collect();

    Ok(lines.join(" ").trim().to_string())
}

/// Reset the engine so the next lookup starts from an empty sheet.
pub fn reset<E: StyleEngine + ?Sized>(engine: &mut E) {
    debug!("resetting style engine");
    engine.reset();
}

/// Concatenated contents of every `<style>` element.
fn style_tag_contents(html: &str) -> String {
    STYLE_TAG
        .captures_iter(html)
        .filter_map(|captures| captures.get(1))
        .map(|content| content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `data-styled.g12[id="sc-abc"]{content:"…"}` lines.
fn is_bookkeeping_line(line: &str, attr: &str) -> bool {
    line.strip_prefix(attr)
        .and_then(|rest| rest.strip_prefix(".g"))
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}
