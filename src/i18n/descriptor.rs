//! Field descriptors: what a language entry does to the document.
//!
//! A descriptor pairs a selector with a mutation kind and a payload. The
//! payload shape depends on the kind (a string for text and attributes, a
//! list of labels for `select`, a boolean for `disabled`), but the document
//! format does not enforce that, so `Content` accepts any JSON value and the
//! applicator coerces it the way a browser would.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The mutation a descriptor performs on each matched node.
///
/// Unrecognized tags are kept verbatim in `Unknown` so a dataset survives a
/// serialize/deserialize cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Select,
    Value,
    Placeholder,
    Title,
    Alt,
    Href,
    Src,
    Disabled,
    Unknown(String),
}

impl FieldKind {
    /// The tag used in the dataset document.
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Select => "select",
            FieldKind::Value => "value",
            FieldKind::Placeholder => "placeholder",
            FieldKind::Title => "title",
            FieldKind::Alt => "alt",
            FieldKind::Href => "href",
            FieldKind::Src => "src",
            FieldKind::Disabled => "disabled",
            FieldKind::Unknown(tag) => tag,
        }
    }

    fn is_missing(&self) -> bool {
        matches!(self, FieldKind::Unknown(tag) if tag.is_empty())
    }
}

impl Default for FieldKind {
    /// A descriptor without a `type` tag mutates nothing.
    fn default() -> Self {
        FieldKind::Unknown(String::new())
    }
}

impl From<String> for FieldKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => FieldKind::Text,
            "select" => FieldKind::Select,
            "value" => FieldKind::Value,
            "placeholder" => FieldKind::Placeholder,
            "title" => FieldKind::Title,
            "alt" => FieldKind::Alt,
            "href" => FieldKind::Href,
            "src" => FieldKind::Src,
            "disabled" => FieldKind::Disabled,
            _ => FieldKind::Unknown(tag),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Unknown(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptor payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    List(Vec<String>),
    Flag(bool),
    /// Numbers, objects and mixed arrays.
    Other(serde_json::Value),
}

impl Content {
    /// JSON truthiness: `""`, `false` and `0` are falsy, every list is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Content::Text(text) => !text.is_empty(),
            Content::List(_) => true,
            Content::Flag(flag) => *flag,
            Content::Other(value) => value_is_truthy(value),
        }
    }

    /// String coercion used for text content and attribute values.
    pub fn to_text(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::List(items) => items.join(","),
            Content::Flag(flag) => flag.to_string(),
            Content::Other(value) => value_to_text(value),
        }
    }

    /// Option labels for a `select` descriptor, in positional order.
    ///
    /// A bare string labels option `i` with its `i`-th character; booleans
    /// and numbers carry none.
    pub fn labels(&self) -> Vec<String> {
        match self {
            Content::List(items) => items.clone(),
            Content::Text(text) => text.chars().map(String::from).collect(),
            Content::Other(serde_json::Value::Array(items)) => {
                items.iter().map(value_to_text).collect()
            }
            Content::Flag(_) | Content::Other(_) => Vec::new(),
        }
    }
}

fn value_is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_to_text(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// One field of a language entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Selector matching zero or more target nodes.
    #[serde(default)]
    pub selector: String,

    #[serde(rename = "type", default, skip_serializing_if = "FieldKind::is_missing")]
    pub kind: FieldKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

impl FieldDescriptor {
    pub fn new(selector: impl Into<String>, kind: FieldKind, content: Content) -> Self {
        Self {
            selector: selector.into(),
            kind,
            content: Some(content),
        }
    }

    /// Content that should be applied, or `None` when the descriptor is a no-op.
    pub fn active_content(&self) -> Option<&Content> {
        self.content.as_ref().filter(|content| content.is_truthy())
    }
}

/// Field key to descriptor, in document order.
///
/// A repeated key keeps its first position and takes the last value, which is
/// how a JSON object parses in a browser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: Vec<(String, FieldDescriptor)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, descriptor: FieldDescriptor) {
        let key = key.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = descriptor,
            None => self.fields.push((key, descriptor)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, descriptor)| descriptor)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields
            .iter()
            .map(|(key, descriptor)| (key.as_str(), descriptor))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn remove(&mut self, key: &str) {
        self.fields.retain(|(existing, _)| existing != key);
    }
}

impl<K: Into<String>> FromIterator<(K, FieldDescriptor)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, FieldDescriptor)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (key, descriptor) in iter {
            map.insert(key, descriptor);
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, descriptor) in &self.fields {
            map.serialize_entry(key, descriptor)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldMapVisitor;

        impl<'de> Visitor<'de> for FieldMapVisitor {
            type Value = FieldMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field keys to descriptors")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldMap, A::Error> {
                let mut map = FieldMap::new();
                while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
                    // Only objects describe a field; anything else is metadata.
                    if !value.is_object() {
                        map.remove(&key);
                        continue;
                    }
                    let descriptor = FieldDescriptor::deserialize(value)
                        .map_err(<A::Error as de::Error>::custom)?;
                    map.insert(key, descriptor);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(FieldMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_kind_parses_known_tags() {
        let kind: FieldKind = serde_json::from_value(json!("placeholder")).unwrap();
        assert_eq!(kind, FieldKind::Placeholder);
        let kind: FieldKind = serde_json::from_value(json!("disabled")).unwrap();
        assert_eq!(kind, FieldKind::Disabled);
    }

    #[test]
    fn test_field_kind_keeps_unknown_tag() {
        let kind: FieldKind = serde_json::from_value(json!("tooltip")).unwrap();
        assert_eq!(kind, FieldKind::Unknown("tooltip".to_string()));
        assert_eq!(serde_json::to_value(&kind).unwrap(), json!("tooltip"));
    }

    #[test]
    fn test_content_shapes() {
        let text: Content = serde_json::from_value(json!("Hello")).unwrap();
        let list: Content = serde_json::from_value(json!(["a", "b"])).unwrap();
        let flag: Content = serde_json::from_value(json!(true)).unwrap();
        let number: Content = serde_json::from_value(json!(3)).unwrap();

        assert_eq!(text, Content::Text("Hello".to_string()));
        assert_eq!(list, Content::List(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(flag, Content::Flag(true));
        assert_eq!(number, Content::Other(json!(3)));
    }

    #[test]
    fn test_truthiness() {
        assert!(!Content::Text(String::new()).is_truthy());
        assert!(Content::Text("x".to_string()).is_truthy());
        assert!(Content::List(Vec::new()).is_truthy());
        assert!(!Content::Flag(false).is_truthy());
        assert!(Content::Flag(true).is_truthy());
        assert!(!Content::Other(json!(0)).is_truthy());
        assert!(Content::Other(json!(2.5)).is_truthy());
        assert!(Content::Other(json!({})).is_truthy());
    }

    #[test]
    fn test_text_coercion() {
        let list = Content::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(list.to_text(), "a,b");
        assert_eq!(Content::Flag(true).to_text(), "true");
        assert_eq!(Content::Other(json!(42)).to_text(), "42");
        assert_eq!(Content::Other(json!({"a": 1})).to_text(), "[object Object]");
    }

    #[test]
    fn test_labels() {
        assert_eq!(Content::Text("XYZ".to_string()).labels(), vec!["X", "Y", "Z"]);
        assert_eq!(
            Content::List(vec!["One".to_string()]).labels(),
            vec!["One"]
        );
        assert_eq!(Content::Other(json!(["x", 2])).labels(), vec!["x", "2"]);
        assert!(Content::Flag(true).labels().is_empty());
    }

    #[test]
    fn test_descriptor_without_content_is_inactive() {
        let descriptor: FieldDescriptor =
            serde_json::from_value(json!({"selector": "#t", "type": "text"})).unwrap();
        assert!(descriptor.active_content().is_none());

        let descriptor: FieldDescriptor =
            serde_json::from_value(json!({"selector": "#t", "type": "text", "content": null}))
                .unwrap();
        assert!(descriptor.active_content().is_none());

        let descriptor: FieldDescriptor =
            serde_json::from_value(json!({"selector": "#t", "type": "disabled", "content": false}))
                .unwrap();
        assert!(descriptor.active_content().is_none());
    }

    #[test]
    fn test_field_map_preserves_document_order() {
        let map: FieldMap = serde_json::from_str(
            r##"{
                "zeta": {"selector": "#z", "type": "text", "content": "Z"},
                "alpha": {"selector": "#a", "type": "text", "content": "A"},
                "mid": {"selector": "#m", "type": "text", "content": "M"}
            }"##,
        )
        .unwrap();

        let keys: Vec<&str> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

        let json = serde_json::to_string(&map).unwrap();
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());
        assert!(json.find("alpha").unwrap() < json.find("mid").unwrap());
    }

    #[test]
    fn test_field_map_duplicate_key_keeps_position_takes_last_value() {
        let map: FieldMap = serde_json::from_str(
            r##"{
                "a": {"selector": "#a", "type": "text", "content": "first"},
                "b": {"selector": "#b", "type": "text", "content": "B"},
                "a": {"selector": "#a", "type": "text", "content": "second"}
            }"##,
        )
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().next().unwrap().0, "a");
        assert_eq!(
            map.get("a").unwrap().content,
            Some(Content::Text("second".to_string()))
        );
    }

    #[test]
    fn test_descriptor_without_type_is_unknown() {
        let descriptor: FieldDescriptor =
            serde_json::from_value(json!({"selector": "#n", "content": "x"})).unwrap();
        assert_eq!(descriptor.kind, FieldKind::Unknown(String::new()));
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({"selector": "#n", "content": "x"})
        );
    }

    #[test]
    fn test_field_map_skips_non_object_values() {
        let map: FieldMap = serde_json::from_str(
            r##"{
                "version": "2",
                "title": {"selector": "#t", "type": "text", "content": "T"},
                "count": 3,
                "note": {"selector": "#n", "content": "x"},
                "title": null
            }"##,
        )
        .unwrap();

        let keys: Vec<&str> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["note"]);
    }
}
