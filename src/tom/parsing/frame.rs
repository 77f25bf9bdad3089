//! Parser frames
//!
//! Every open construct owns a frame holding the nodes collected so far. An element takes two
//! frames: its children frame, and on top of it the attribute frame that is live until the
//! element's `]`. When the attribute frame pops, its nodes move into the children frame's
//! `attributes` so the finished element can be assembled without back references.

use crate::tom::ast::{Node, TagName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Context {
    /// Element body or the root; text merges, spaces are literal
    Children,
    /// Between a tag name and its `]`; spaces separate, every token is its own node
    Attribute,
    /// Inside `( ... )` within an attribute section
    Nested,
}

impl Context {
    /// Contexts where spaces separate operands and parentheses group
    pub(super) fn is_argument(self) -> bool {
        matches!(self, Context::Attribute | Context::Nested)
    }
}

#[derive(Debug)]
pub(super) struct Frame {
    pub(super) context: Context,
    pub(super) tag: Option<TagName>,
    pub(super) self_closing: bool,
    pub(super) nodes: Vec<Node>,
    pub(super) attributes: Vec<Node>,
    /// Tag text as written when the legacy `clr<colour>` spelling opened the element
    pub(super) alias: Option<String>,
}

impl Frame {
    fn new(context: Context, tag: Option<TagName>, self_closing: bool) -> Self {
        Self {
            context,
            tag,
            self_closing,
            nodes: Vec::new(),
            attributes: Vec::new(),
            alias: None,
        }
    }

    pub(super) fn root() -> Self {
        Self::new(Context::Children, None, false)
    }

    pub(super) fn children(tag: TagName, self_closing: bool) -> Self {
        Self::new(Context::Children, Some(tag), self_closing)
    }

    pub(super) fn attribute(tag: TagName, self_closing: bool, alias: Option<String>) -> Self {
        let mut frame = Self::new(Context::Attribute, Some(tag), self_closing);
        frame.alias = alias;
        frame
    }

    pub(super) fn nested() -> Self {
        Self::new(Context::Nested, None, false)
    }

    /// Append literal text, merging with a preceding text node in children context
    pub(super) fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.context == Context::Children {
            if let Some(Node::Text { value }) = self.nodes.last_mut() {
                value.push_str(text);
                return;
            }
        }
        self.nodes.push(Node::text(text));
    }

    pub(super) fn push_node(&mut self, node: Node) {
        match node {
            Node::Text { value } => self.push_text(&value),
            other => self.nodes.push(other),
        }
    }

    /// Assemble the element owned by a children frame
    pub(super) fn into_element(self) -> Option<Node> {
        let tag = self.tag?;
        Some(Node::element(tag, self.attributes, self.nodes))
    }
}
