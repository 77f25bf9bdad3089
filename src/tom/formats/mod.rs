//! Output formats for trees
//!
//! - treeviz: one line per node, for inspecting structure
//! - text: what a reader sees, markup dropped
//! - json / yaml: the serde form of the tree
//! - markup: canonical TOM text in read mode

pub mod registry;
pub mod text;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use text::{to_text, TextFormatter, TextRenderer};
pub use treeviz::{to_treeviz_str, TreevizFormatter, TreevizRenderer};

use crate::tom::ast::Root;
use crate::tom::parsing::ParserConfig;
use crate::tom::serializer;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, root: &Root) -> Result<String, FormatError> {
        serde_json::to_string_pretty(root)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, root: &Root) -> Result<String, FormatError> {
        serde_yaml::to_string(root).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

pub struct MarkupFormatter;

impl Formatter for MarkupFormatter {
    fn name(&self) -> &str {
        "markup"
    }

    fn serialize(&self, root: &Root) -> Result<String, FormatError> {
        Ok(serializer::stringify(root, &ParserConfig::read()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tom::parsing::parse;

    #[test]
    fn test_json_shape() {
        let root = parse("[bld]x[/bld]").unwrap();
        let json = JsonFormatter.serialize(&root).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["children"][0]["type"], "element");
        assert_eq!(value["children"][0]["name"], "bld");
        assert_eq!(value["children"][0]["children"][0]["value"], "x");
    }

    #[test]
    fn test_yaml_mentions_tag() {
        let root = parse("[itl]x[/itl]").unwrap();
        let yaml = YamlFormatter.serialize(&root).unwrap();
        assert!(yaml.contains("name: itl"));
    }

    #[test]
    fn test_markup_is_canonical() {
        let root = parse("[calcn  1+2][/calcn]").unwrap();
        assert_eq!(
            MarkupFormatter.serialize(&root).unwrap(),
            "[calcn 1+2][/calcn]"
        );
    }
}
