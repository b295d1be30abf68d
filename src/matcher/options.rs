//! Match options: at-rule narrowing and selector modifiers.

use serde::Serialize;

use crate::engine::{ComponentRef, StyleEngine};

/// A selector fragment merged with the element's own selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    /// Plain selector text such as `:hover`, `> div` or `&.self`.
    Raw(String),
    /// Text interleaved with references to other styled components.
    Composed(Vec<Fragment>),
}

/// One piece of a composed modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Raw(String),
    Component(ComponentRef),
}

impl Modifier {
    /// Start an empty composed modifier.
    ///
    /// ```
    /// use styled_assert::{ComponentRef, Modifier};
    ///
    /// let text = ComponentRef::new("sc-text");
    /// let modifier = Modifier::composed().raw("> ").component(&text).raw(" span");
    /// assert!(matches!(modifier, Modifier::Composed(ref parts) if parts.len() == 3));
    /// ```
    pub fn composed() -> Self {
        Modifier::Composed(Vec::new())
    }

    /// Append selector text.
    pub fn raw(self, text: impl Into<String>) -> Self {
        let text = text.into();
        match self {
            Modifier::Raw(mut raw) => {
                raw.push_str(&text);
                Modifier::Raw(raw)
            }
            Modifier::Composed(mut parts) => {
                parts.push(Fragment::Raw(text));
                Modifier::Composed(parts)
            }
        }
    }

    /// Append a reference to another styled component.
    pub fn component(self, component: &ComponentRef) -> Self {
        let mut parts = match self {
            Modifier::Raw(raw) => vec![Fragment::Raw(raw)],
            Modifier::Composed(parts) => parts,
        };
        parts.push(Fragment::Component(component.clone()));
        Modifier::Composed(parts)
    }

    /// Resolve component references and join everything into selector text.
    pub fn flatten<E: StyleEngine + ?Sized>(&self, engine: &E) -> String {
        match self {
            Modifier::Raw(raw) => raw.clone(),
            Modifier::Composed(parts) => parts
                .iter()
                .map(|part| match part {
                    Fragment::Raw(raw) => raw.clone(),
                    Fragment::Component(component) => engine.component_selector(component),
                })
                .collect(),
        }
    }
}

impl From<&str> for Modifier {
    fn from(raw: &str) -> Self {
        Modifier::Raw(raw.to_string())
    }
}

impl From<String> for Modifier {
    fn from(raw: String) -> Self {
        Modifier::Raw(raw)
    }
}

/// Options of a single assertion.
///
/// ```
/// use styled_assert::MatchOptions;
///
/// let options = MatchOptions::new().media("(max-width: 640px)").modifier(":hover");
/// assert!(!options.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOptions {
    pub media: Option<String>,
    pub modifier: Option<Modifier>,
    pub supports: Option<String>,
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only look inside `@media` rules with an equivalent query.
    pub fn media(mut self, query: impl Into<String>) -> Self {
        self.media = Some(query.into());
        self
    }

    /// Only look inside `@supports` rules with an equivalent query.
    pub fn supports(mut self, query: impl Into<String>) -> Self {
        self.supports = Some(query.into());
        self
    }

    pub fn modifier(mut self, modifier: impl Into<Modifier>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    /// Whether no option was supplied.
    pub fn is_empty(&self) -> bool {
        self.media.is_none() && self.modifier.is_none() && self.supports.is_none()
    }

    /// Flatten the modifier against `engine`.
    pub fn resolve<E: StyleEngine + ?Sized>(&self, engine: &E) -> ResolvedOptions {
        ResolvedOptions {
            media: self.media.clone(),
            modifier: self.modifier.as_ref().map(|modifier| modifier.flatten(engine)),
            supports: self.supports.clone(),
        }
    }
}

/// Options with the modifier flattened to text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports: Option<String>,
}

impl ResolvedOptions {
    /// The media query, if set and non-empty.
    pub fn media(&self) -> Option<&str> {
        self.media.as_deref().filter(|query| !query.is_empty())
    }

    /// The supports query, if set and non-empty.
    pub fn supports(&self) -> Option<&str> {
        self.supports.as_deref().filter(|query| !query.is_empty())
    }

    /// Whether lookups are narrowed to at-rules.
    pub fn has_at_rule(&self) -> bool {
        self.media().is_some() || self.supports().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_none() && self.modifier.is_none() && self.supports.is_none()
    }

    /// Compact JSON, as shown in failure messages.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
