use serde_yaml::{Mapping, Value};

use super::TemplateError;

/// A decoded template document with typed accessors over the generic YAML value.
#[derive(Debug, Clone)]
pub struct TemplateDocument {
    root: Mapping,
}

impl TemplateDocument {
    /// Decode a template document. Anything other than a top-level mapping is
    /// rejected.
    pub fn parse(content: &str) -> Result<Self, TemplateError> {
        match serde_yaml::from_str::<Value>(content)? {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self {
                root: Mapping::new(),
            }),
            _ => Err(TemplateError::NotAMapping),
        }
    }

    /// Template identifier, if present.
    pub fn id(&self) -> Option<String> {
        self.root.get("id").map(value_to_text)
    }

    /// The `info` block. A present but non-mapping `info` counts as absent.
    pub fn info(&self) -> Option<InfoBlock<'_>> {
        match self.root.get("info") {
            Some(Value::Mapping(map)) => Some(InfoBlock { map }),
            _ => None,
        }
    }

    /// Whether a top-level section key is present.
    pub fn has_section(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }
}

/// Borrowed view of a template's `info` block.
#[derive(Debug, Clone, Copy)]
pub struct InfoBlock<'a> {
    map: &'a Mapping,
}

impl InfoBlock<'_> {
    /// Textual value of a field, or `None` when the key is missing.
    pub fn text(&self, key: &str) -> Option<String> {
        self.map.get(key).map(value_to_text)
    }
}

/// Stringify any YAML value the same way regardless of its shape.
///
/// Sequences join their elements with `,` so list-style tags and authors feed
/// the same comma splitting as the string form.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Mapping(_) => serde_json::to_string(value).unwrap_or_default(),
        Value::Tagged(tagged) => value_to_text(&tagged.value),
    }
}
