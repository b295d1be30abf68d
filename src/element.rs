//! The element under test.

use crate::selector::is_static_class;

/// Ordered, de-duplicated class names of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    /// Parse a `class` attribute value.
    pub fn parse(attr: &str) -> Self {
        attr.split_whitespace().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Classes naming a component's rule group.
    pub fn static_classes(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|class| is_static_class(class))
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, class: String) {
        if !self.contains(&class) {
            self.0.push(class);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = ClassList::default();
        for class in iter {
            list.push(class.into());
        }
        list
    }
}

/// A rendered element: a tag, its classes and its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub class_list: ClassList,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Add classes from a `class` attribute value.
    pub fn with_class(mut self, attr: &str) -> Self {
        for class in attr.split_whitespace() {
            self.class_list.push(class.to_owned());
        }
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn first_child(&self) -> Option<&Element> {
        self.children.first()
    }
}
