//! AST node types
//!
//! The parser only ever produces `Text`, `Element` and `Nested`. `DiceResult` and
//! `CalcResult` are produced by the preprocessor and prerenderer and keep the attributes and
//! children of the element they replaced, so they can be serialized back to markup.

use super::tag::{CalcKind, TagName};
use serde::Serialize;

/// A node in the TOM tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Literal content
    Text { value: String },
    /// A recognised tag with its attribute section and body
    Element(Element),
    /// A parenthesized group, only found inside attribute sections
    Nested { children: Vec<Node> },
    /// A dice element whose roll is known
    DiceResult(DiceResult),
    /// A calc/calcn element that was evaluated
    CalcResult(CalcResult),
}

/// A tag with its attributes and children
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub name: TagName,
    pub attributes: Vec<Node>,
    pub children: Vec<Node>,
}

/// An evaluated dice element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiceResult {
    pub min: i64,
    pub max: i64,
    pub result: i64,
    pub attributes: Vec<Node>,
    pub children: Vec<Node>,
}

/// An evaluated calc or calcn element
///
/// `expression` is meant for display, `original_expression` reproduces the markup of the
/// operands (dice included) so it can be pasted into a new post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalcResult {
    pub name: CalcKind,
    pub expression: String,
    pub original_expression: String,
    pub result: f64,
    pub attributes: Vec<Node>,
    pub children: Vec<Node>,
}

/// Top-level container
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Root {
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    pub fn element(name: TagName, attributes: Vec<Node>, children: Vec<Node>) -> Self {
        Node::Element(Element {
            name,
            attributes,
            children,
        })
    }

    pub fn nested(children: Vec<Node>) -> Self {
        Node::Nested { children }
    }

    /// Returns the value of a text node
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text { value } => Some(value),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    /// Name of the variant, used by formatters and assertion messages
    pub fn node_type(&self) -> &'static str {
        match self {
            Node::Text { .. } => "Text",
            Node::Element(_) => "Element",
            Node::Nested { .. } => "Nested",
            Node::DiceResult(_) => "DiceResult",
            Node::CalcResult(_) => "CalcResult",
        }
    }

    /// Body nodes of this node, empty for leaves
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Text { .. } => &[],
            Node::Element(e) => &e.children,
            Node::Nested { children } => children,
            Node::DiceResult(d) => &d.children,
            Node::CalcResult(c) => &c.children,
        }
    }

    /// Attribute nodes of this node, empty for nodes without an attribute section
    pub fn attributes(&self) -> &[Node] {
        match self {
            Node::Element(e) => &e.attributes,
            Node::DiceResult(d) => &d.attributes,
            Node::CalcResult(c) => &c.attributes,
            Node::Text { .. } | Node::Nested { .. } => &[],
        }
    }
}

impl Element {
    pub fn new(name: TagName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Attribute values when every attribute is a text node
    pub fn text_attributes(&self) -> Option<Vec<&str>> {
        self.attributes.iter().map(Node::as_text).collect()
    }

    /// Text of the first child, if the first child is a text node
    pub fn first_child_text(&self) -> Option<&str> {
        self.children.first().and_then(Node::as_text)
    }
}

impl Root {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}
