//! Selector engine for [`MemoryDocument`](crate::document::MemoryDocument).
//!
//! Supports the selectors a language dataset realistically uses: `*`, type
//! selectors, `#id`, `.class`, `[attr]`, `[attr=value]`, compounds of those
//! (`input.search[name=q]`) and comma-separated groups. Combinators and
//! pseudo-classes are rejected with [`SelectorError::Unsupported`].

use crate::document::Element;
use crate::error::SelectorError;
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

static COMPOUND_REGEX: OnceLock<Regex> = OnceLock::new();
static PART_REGEX: OnceLock<Regex> = OnceLock::new();

fn compound_regex() -> &'static Regex {
    COMPOUND_REGEX.get_or_init(|| {
        Regex::new(
            r#"^(\*|[A-Za-z][A-Za-z0-9_-]*)?((?:#[\w-]+|\.[\w-]+|\[\s*[\w-]+\s*(?:=\s*(?:"[^"]*"|'[^']*'|[\w-]+)\s*)?\])*)$"#,
        )
        .expect("compound selector regex is valid")
    })
}

fn part_regex() -> &'static Regex {
    PART_REGEX.get_or_init(|| {
        Regex::new(
            r#"#([\w-]+)|\.([\w-]+)|\[\s*([\w-]+)\s*(?:=\s*(?:"([^"]*)"|'([^']*)'|([\w-]+))\s*)?\]"#,
        )
        .expect("selector part regex is valid")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeTest {
    name: String,
    value: Option<String>,
}

/// One compound selector: every present condition must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeTest>,
}

impl Compound {
    fn parse(source: &str) -> Result<Self, SelectorError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }

        let captures = compound_regex()
            .captures(source)
            .ok_or_else(|| SelectorError::Unsupported(source.to_string()))?;

        let mut compound = Compound {
            tag: captures
                .get(1)
                .map(|m| m.as_str())
                .filter(|tag| *tag != "*")
                .map(str::to_ascii_lowercase),
            ..Compound::default()
        };

        let parts = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        for part in part_regex().captures_iter(parts) {
            if let Some(id) = part.get(1) {
                compound.ids.push(id.as_str().to_string());
            } else if let Some(class) = part.get(2) {
                compound.classes.push(class.as_str().to_string());
            } else if let Some(name) = part.get(3) {
                let value = part
                    .get(4)
                    .or_else(|| part.get(5))
                    .or_else(|| part.get(6))
                    .map(|m| m.as_str().to_string());
                compound.attributes.push(AttributeTest {
                    name: name.as_str().to_ascii_lowercase(),
                    value,
                });
            }
        }

        Ok(compound)
    }

    fn matches(&self, element: &Element) -> bool {
        let tag_matches = self
            .tag
            .as_ref()
            .map(|tag| element.tag.eq_ignore_ascii_case(tag))
            .unwrap_or(true);

        tag_matches
            && self
                .ids
                .iter()
                .all(|id| element.id.as_deref() == Some(id.as_str()))
            && self.classes.iter().all(|class| element.has_class(class))
            && self.attributes.iter().all(|test| {
                match (element.attribute(&test.name), &test.value) {
                    (Some(_), None) => true,
                    (Some(actual), Some(expected)) => actual.as_ref() == expected.as_str(),
                    (None, _) => false,
                }
            })
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    groups: Vec<Compound>,
}

impl Selector {
    /// Parse a selector list such as `h1#title, .banner[lang]`.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        if source.trim().is_empty() {
            return Err(SelectorError::Empty);
        }

        let groups = split_groups(source)
            .into_iter()
            .map(Compound::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { groups })
    }

    /// Whether any group in the list matches the element.
    pub fn matches(&self, element: &Element) -> bool {
        self.groups.iter().any(|group| group.matches(element))
    }
}

/// Split a selector list on commas outside attribute brackets and quotes.
fn split_groups(source: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut start = 0;
    let mut in_brackets = false;
    let mut quote: Option<char> = None;

    for (index, ch) in source.char_indices() {
        match (quote, ch) {
            (Some(open), _) if ch == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') if in_brackets => quote = Some(ch),
            (None, '[') => in_brackets = true,
            (None, ']') => in_brackets = false,
            (None, ',') if !in_brackets => {
                groups.push(&source[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    groups.push(&source[start..]);
    groups
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Selector::parse(source)
    }
}
