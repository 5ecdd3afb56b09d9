//! The node tree that localized content is applied to.
//!
//! [`Document`] is the capability the applicator needs: selector lookup plus
//! the handful of mutations a field descriptor can perform. Hosts that own a
//! real UI tree implement it over their own nodes; [`MemoryDocument`] is a
//! flat, serializable element list used by the binary and the tests.

use crate::error::SelectorError;
use crate::selector::Selector;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Handle to a node returned by [`Document::query_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Single-valued string properties a descriptor can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Value,
    Placeholder,
    Title,
    Alt,
    Href,
    Src,
}

impl Property {
    pub fn as_str(&self) -> &'static str {
        match self {
            Property::Value => "value",
            Property::Placeholder => "placeholder",
            Property::Title => "title",
            Property::Alt => "alt",
            Property::Href => "href",
            Property::Src => "src",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selector lookup and mutation over a live node tree.
///
/// Mutations receive handles obtained from `query_all` on the same document;
/// a stale handle is ignored.
pub trait Document {
    /// All nodes matching `selector`, in tree order.
    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError>;

    /// Replace the node's visible text.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Number of options the node holds (zero for non-select nodes).
    fn option_count(&self, node: NodeId) -> usize;

    /// Relabel an existing option. Out-of-range indices are ignored.
    fn set_option_label(&mut self, node: NodeId, index: usize, label: &str);

    fn set_property(&mut self, node: NodeId, property: Property, value: &str);

    fn set_disabled(&mut self, node: NodeId, disabled: bool);
}

/// An element of a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,

    #[serde(default)]
    pub text: String,

    /// Attributes and string properties, keyed by lowercase name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Option labels, for `select` elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    #[serde(default)]
    pub disabled: bool,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }

    /// Attribute lookup as a selector sees it, including `id`, `class` and `disabled`.
    pub fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => self.id.as_deref().map(Cow::Borrowed),
            "class" if !self.classes.is_empty() => Some(Cow::Owned(self.classes.join(" "))),
            "disabled" if self.disabled => Some(Cow::Borrowed("")),
            _ => self
                .attributes
                .get(&name.to_ascii_lowercase())
                .map(|value| Cow::Borrowed(value.as_str())),
        }
    }

    pub fn property(&self, property: Property) -> Option<&str> {
        self.attributes.get(property.as_str()).map(String::as_str)
    }
}

/// A flat, ordered list of elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryDocument {
    elements: Vec<Element>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Parse a page from its JSON element list.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn push(&mut self, element: Element) -> NodeId {
        self.elements.push(element);
        NodeId(self.elements.len() - 1)
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0)
    }

    /// First element with the given id.
    pub fn by_id(&self, id: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|element| element.id.as_deref() == Some(id))
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Document for MemoryDocument {
    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, element)| selector.matches(element))
            .map(|(index, _)| NodeId(index))
            .collect())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.elements.get_mut(node.0) {
            element.text = text.to_string();
        }
    }

    fn option_count(&self, node: NodeId) -> usize {
        self.elements
            .get(node.0)
            .map(|element| element.options.len())
            .unwrap_or(0)
    }

    fn set_option_label(&mut self, node: NodeId, index: usize, label: &str) {
        if let Some(option) = self
            .elements
            .get_mut(node.0)
            .and_then(|element| element.options.get_mut(index))
        {
            *option = label.to_string();
        }
    }

    fn set_property(&mut self, node: NodeId, property: Property, value: &str) {
        if let Some(element) = self.elements.get_mut(node.0) {
            element
                .attributes
                .insert(property.as_str().to_string(), value.to_string());
        }
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(element) = self.elements.get_mut(node.0) {
            element.disabled = disabled;
        }
    }
}
