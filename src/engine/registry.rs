//! In-memory style registry.
//!
//! Mirrors the sheet layout of styled-components: rules are grouped per
//! component id, each group is followed by a bookkeeping line recording the
//! names generated for it, and every line ends with the `/*!sc*/` splitter.
//!
//! ```text
//! .kDbFfe{color:red;}/*!sc*/
//! data-styled.g1[id="sc-abc"]{content:"kDbFfe,"}/*!sc*/
//! ```

use log::debug;

use super::{DEFAULT_ATTR, Serialized, StyleEngine};
use crate::error::Result;

const SPLITTER: &str = "/*!sc*/\n";
const VERSION_ATTR: &str = "data-styled-version";

/// Rules registered for one component id.
#[derive(Debug, Clone)]
struct Group {
    id: String,
    rules: Vec<String>,
}

/// A `<style>` element injected into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTag {
    attributes: Vec<(String, String)>,
}

impl StyleTag {
    pub fn new(attributes: Vec<(String, String)>) -> Self {
        Self { attributes }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The document style tags are injected into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    style_tags: Vec<StyleTag>,
}

impl Document {
    pub fn style_tags(&self) -> &[StyleTag] {
        &self.style_tags
    }

    /// Append a style tag, whether or not the engine owns it.
    pub fn append_style_tag(&mut self, tag: StyleTag) {
        self.style_tags.push(tag);
    }

    /// Tags carrying the engine's version attribute.
    pub fn engine_style_tags(&self) -> impl Iterator<Item = &StyleTag> {
        self.style_tags
            .iter()
            .filter(|tag| tag.attribute(VERSION_ATTR).is_some())
    }
}

/// In-memory styling engine registry.
///
/// Without a document the output is server-rendered `<style>` tags; with one,
/// it is the sheet text and inserting rules injects a style tag.
#[derive(Debug, Clone)]
pub struct Registry {
    attr: String,
    version: String,
    groups: Vec<Group>,
    /// Component id to generated names, in registration order.
    names: Vec<(String, Vec<String>)>,
    document: Option<Document>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a registry with no document (server rendering).
    pub fn new() -> Self {
        Self {
            attr: DEFAULT_ATTR.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            groups: Vec::new(),
            names: Vec::new(),
            document: None,
        }
    }

    /// Create a registry mounted in a document (client rendering).
    pub fn with_document() -> Self {
        Self {
            document: Some(Document::default()),
            ..Self::new()
        }
    }

    /// Use a custom attribute prefix for bookkeeping lines and style tags.
    pub fn with_attr(mut self, attr: impl Into<String>) -> Self {
        self.attr = attr.into();
        self
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    /// Register `name` for component `id` and append compiled rules to its group.
    pub fn insert_rules(&mut self, id: &str, name: &str, rules: &[&str]) {
        self.register_name(id, name);

        let group = match self.groups.iter().position(|group| group.id == id) {
            Some(index) => &mut self.groups[index],
            None => {
                self.groups.push(Group {
                    id: id.to_string(),
                    rules: Vec::new(),
                });
                let last = self.groups.len() - 1;
                &mut self.groups[last]
            }
        };
        group.rules.extend(rules.iter().map(|rule| rule.to_string()));

        let attr = &self.attr;
        let version = &self.version;
        if let Some(document) = &mut self.document
            && document.engine_style_tags().next().is_none()
        {
            document.append_style_tag(StyleTag::new(vec![
                (attr.clone(), "active".to_string()),
                (VERSION_ATTR.to_string(), version.clone()),
            ]));
        }
    }

    /// Record a generated name without rules.
    pub fn register_name(&mut self, id: &str, name: &str) {
        if self.has_name_for_id(id, name) {
            return;
        }
        match self.names.iter_mut().find(|(key, _)| key == id) {
            Some((_, names)) => names.push(name.to_string()),
            None => self.names.push((id.to_string(), vec![name.to_string()])),
        }
    }

    pub fn has_name_for_id(&self, id: &str, name: &str) -> bool {
        self.names
            .iter()
            .any(|(key, names)| key == id && names.iter().any(|n| n == name))
    }

    /// Number of component ids with registered names.
    pub fn names_len(&self) -> usize {
        self.names.len()
    }

    /// Every component id followed by its generated names, in registration order.
    pub fn hashes(&self) -> Vec<String> {
        let mut hashes: Vec<String> = Vec::new();
        for (id, names) in &self.names {
            for hash in std::iter::once(id).chain(names) {
                if !hashes.contains(hash) {
                    hashes.push(hash.clone());
                }
            }
        }
        hashes
    }

    /// The sheet text, groups in registration order.
    pub fn sheet_text(&self) -> String {
        let mut css = String::new();
        for (index, group) in self.groups.iter().enumerate() {
            for rule in &group.rules {
                css.push_str(rule);
                css.push_str(SPLITTER);
            }

            let content: String = self
                .names
                .iter()
                .find(|(id, _)| *id == group.id)
                .map(|(_, names)| names.iter().map(|name| format!("{name},")).collect())
                .unwrap_or_default();
            css.push_str(&format!(
                "{}.g{}[id=\"{}\"]{{content:\"{}\"}}{}",
                self.attr,
                index + 1,
                group.id,
                content,
                SPLITTER
            ));
        }
        css
    }

    /// The sheet as server-rendered style tags.
    pub fn style_tags(&self) -> String {
        let css = self.sheet_text();
        if css.is_empty() {
            return String::new();
        }
        format!(
            "<style {}=\"true\" {}=\"{}\">{}</style>",
            self.attr, VERSION_ATTR, self.version, css
        )
    }
}

impl StyleEngine for Registry {
    fn serialized(&self) -> Result<Serialized> {
        Ok(match self.document {
            Some(_) => Serialized::Sheet(self.sheet_text()),
            None => Serialized::StyleTags(self.style_tags()),
        })
    }

    fn reset(&mut self) {
        if let Some(document) = &mut self.document {
            document
                .style_tags
                .retain(|tag| tag.attribute(VERSION_ATTR).is_none());
        }
        debug!(
            "clearing {} style groups and {} name sets",
            self.groups.len(),
            self.names.len()
        );
        self.groups.clear();
        self.names.clear();
    }

    fn bookkeeping_attr(&self) -> &str {
        &self.attr
    }
}
