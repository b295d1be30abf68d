//! Styling engine adapters.
//!
//! The matcher never reaches into a global style registry. It is handed a
//! [`StyleEngine`] that can serialize its current output and reset itself.
//!
//! - [`Registry`]: in-memory registry laid out like the styled-components sheet
//! - [`Snapshot`]: reads the engine output from a file

mod registry;
mod snapshot;

pub use registry::{Document, Registry, StyleTag};
pub use snapshot::Snapshot;

use crate::error::Result;

/// Attribute prefix of the engine's bookkeeping lines (`data-styled.g1[id=…]`).
pub const DEFAULT_ATTR: &str = "data-styled";

/// The engine's current output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Serialized {
    /// Sheet text as mounted in a document.
    Sheet(String),
    /// Server-rendered `<style>` tags.
    StyleTags(String),
}

/// A styling engine the matcher reads rules from.
pub trait StyleEngine {
    /// Serialize the current output. Must reflect the latest state.
    ///
    /// Fails when the output cannot be read any more.
    fn serialized(&self) -> Result<Serialized>;

    /// Drop every injected rule, name and style tag.
    ///
    /// Must be idempotent.
    fn reset(&mut self);

    /// Prefix of bookkeeping lines in the serialized output.
    fn bookkeeping_attr(&self) -> &str {
        DEFAULT_ATTR
    }

    /// Selector a component reference resolves to inside a modifier.
    fn component_selector(&self, component: &ComponentRef) -> String {
        format!(".{}", component.id())
    }

    /// Check that the engine's registry is reachable.
    fn verify(&self) -> Result<()> {
        Ok(())
    }
}

impl<E: StyleEngine + ?Sized> StyleEngine for &mut E {
    fn serialized(&self) -> Result<Serialized> {
        (**self).serialized()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn bookkeeping_attr(&self) -> &str {
        (**self).bookkeeping_attr()
    }

    fn component_selector(&self, component: &ComponentRef) -> String {
        (**self).component_selector(component)
    }

    fn verify(&self) -> Result<()> {
        (**self).verify()
    }
}

/// A reference to a styled component, used inside composed modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    id: String,
}

impl ComponentRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The component's static id (`sc-…`).
    pub fn id(&self) -> &str {
        &self.id
    }
}
