//! Format registry for tree output
//!
//! Each output format implements [`Formatter`] and is looked up by name, which is how the
//! `tom` binary resolves its `--format` flag.

use crate::tom::ast::Root;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during serialization
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// A way of writing a tree out as a string
pub trait Formatter: Send + Sync {
    /// Name used to select the format (e.g. "treeviz", "json")
    fn name(&self) -> &str;

    fn serialize(&self, root: &Root) -> Result<String, FormatError>;
}

/// The formats `--format` can select, keyed by name
pub struct FormatRegistry {
    formatters: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Register a formatter, replacing any with the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn serialize(&self, root: &Root, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .formatters
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(root)
    }

    /// All format names, sorted
    pub fn list_formats(&self) -> Vec<&str> {
        self.formatters.keys().map(String::as_str).collect()
    }
}

impl Default for FormatRegistry {
    /// Registry holding every built-in format
    fn default() -> Self {
        let mut registry = FormatRegistry {
            formatters: BTreeMap::new(),
        };
        registry.register(super::TreevizFormatter);
        registry.register(super::TextFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry.register(super::MarkupFormatter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tom::ast::Node;

    struct Count;
    impl Formatter for Count {
        fn name(&self) -> &str {
            "count"
        }
        fn serialize(&self, root: &Root) -> Result<String, FormatError> {
            Ok(root.children.len().to_string())
        }
    }

    #[test]
    fn test_register_and_serialize() {
        let mut registry = FormatRegistry::default();
        registry.register(Count);
        let root = Root::new(vec![Node::text("a")]);
        assert!(registry.list_formats().contains(&"count"));
        assert_eq!(registry.serialize(&root, "count"), Ok("1".to_string()));
        assert_eq!(
            registry.serialize(&root, "nope"),
            Err(FormatError::FormatNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            FormatRegistry::default().list_formats(),
            vec!["json", "markup", "text", "treeviz", "yaml"]
        );
    }
}
