//! Fluent assertions over TOM trees
//!
//! Tests describe the shape they expect instead of building whole trees by hand:
//!
//! ```rust,ignore
//! assert_tree(&root)
//!     .child_count(2)
//!     .child(0, |n| {
//!         n.element(TagName::Clr, |clr| {
//!             clr.attribute_texts(&["red"]).children(|c| {
//!                 c.child_count(1).child(0, |t| {
//!                     t.text("hi");
//!                 });
//!             });
//!         });
//!     })
//!     .child(1, |n| {
//!         n.dice_result(1, 6, 4);
//!     });
//! ```
//!
//! Failure messages carry the path to the offending node, e.g. `root[0].attributes[1]`.

use crate::tom::ast::{CalcKind, CalcResult, Element, Node, Root, TagName};

/// Start asserting on a tree
pub fn assert_tree(root: &Root) -> NodesAssertion<'_> {
    NodesAssertion {
        nodes: &root.children,
        context: "root".to_string(),
    }
}

fn summarize(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(Node::node_type)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A list of sibling nodes: a body, an attribute section or a group
pub struct NodesAssertion<'a> {
    nodes: &'a [Node],
    context: String,
}

impl<'a> NodesAssertion<'a> {
    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.nodes.len(),
            expected,
            "{}: Expected {} nodes, found {}: [{}]",
            self.context,
            expected,
            self.nodes.len(),
            summarize(self.nodes)
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let node = self.nodes.get(index).unwrap_or_else(|| {
            panic!(
                "{}: Index {} out of bounds ({} nodes)",
                self.context,
                index,
                self.nodes.len()
            )
        });
        assertion(NodeAssertion {
            node,
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Every node is text and their concatenation equals `expected`
    pub fn text(self, expected: &str) -> Self {
        let mut actual = String::new();
        for node in self.nodes {
            match node.as_text() {
                Some(text) => actual.push_str(text),
                None => panic!(
                    "{}: Expected only text, found {}",
                    self.context,
                    node.node_type()
                ),
            }
        }
        assert_eq!(actual, expected, "{}: Text mismatch", self.context);
        self
    }
}

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn text(self, expected: &str) -> Self {
        match self.node.as_text() {
            Some(actual) => assert_eq!(actual, expected, "{}: Text mismatch", self.context),
            None => panic!(
                "{}: Expected Text, found {}",
                self.context,
                self.node.node_type()
            ),
        }
        self
    }

    pub fn text_contains(self, needle: &str) -> Self {
        let actual = self.node.as_text().unwrap_or_else(|| {
            panic!(
                "{}: Expected Text, found {}",
                self.context,
                self.node.node_type()
            )
        });
        assert!(
            actual.contains(needle),
            "{}: Expected text containing '{}', found '{}'",
            self.context,
            needle,
            actual
        );
        self
    }

    pub fn element<F>(self, tag: TagName, assertion: F) -> Self
    where
        F: FnOnce(ElementAssertion<'a>),
    {
        let Node::Element(element) = self.node else {
            panic!(
                "{}: Expected Element {}, found {}",
                self.context,
                tag,
                self.node.node_type()
            );
        };
        assert_eq!(
            element.name, tag,
            "{}: Expected [{}], found [{}]",
            self.context, tag, element.name
        );
        assertion(ElementAssertion {
            element,
            context: format!("{}.{}", self.context, tag),
        });
        self
    }

    /// A group with the given members
    pub fn nested<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a>),
    {
        let Node::Nested { children } = self.node else {
            panic!(
                "{}: Expected Nested, found {}",
                self.context,
                self.node.node_type()
            );
        };
        assertion(NodesAssertion {
            nodes: children,
            context: format!("{}.group", self.context),
        });
        self
    }

    pub fn dice_result(self, min: i64, max: i64, result: i64) -> Self {
        let Node::DiceResult(dice) = self.node else {
            panic!(
                "{}: Expected DiceResult, found {}",
                self.context,
                self.node.node_type()
            );
        };
        assert_eq!(
            (dice.min, dice.max, dice.result),
            (min, max, result),
            "{}: DiceResult (min, max, result) mismatch",
            self.context
        );
        self
    }

    pub fn calc_result<F>(self, assertion: F) -> Self
    where
        F: FnOnce(CalcAssertion<'a>),
    {
        let Node::CalcResult(calc) = self.node else {
            panic!(
                "{}: Expected CalcResult, found {}",
                self.context,
                self.node.node_type()
            );
        };
        assertion(CalcAssertion {
            calc,
            context: format!("{}.{}", self.context, calc.name),
        });
        self
    }
}

pub struct ElementAssertion<'a> {
    element: &'a Element,
    context: String,
}

impl<'a> ElementAssertion<'a> {
    pub fn attribute_count(self, expected: usize) -> Self {
        let actual = self.element.attributes.len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} attributes, found {}",
            self.context, expected, actual
        );
        self
    }

    /// Every attribute is text, with exactly these values
    pub fn attribute_texts(self, expected: &[&str]) -> Self {
        let actual = self.element.text_attributes().unwrap_or_else(|| {
            panic!(
                "{}: Expected text attributes, found [{}]",
                self.context,
                summarize(&self.element.attributes)
            )
        });
        assert_eq!(actual, expected, "{}: Attribute mismatch", self.context);
        self
    }

    pub fn attributes<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a>),
    {
        assertion(NodesAssertion {
            nodes: &self.element.attributes,
            context: format!("{}.attributes", self.context),
        });
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.element.children.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize(&self.element.children)
        );
        self
    }

    pub fn children<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a>),
    {
        assertion(NodesAssertion {
            nodes: &self.element.children,
            context: format!("{}.children", self.context),
        });
        self
    }
}

pub struct CalcAssertion<'a> {
    calc: &'a CalcResult,
    context: String,
}

impl<'a> CalcAssertion<'a> {
    pub fn kind(self, expected: CalcKind) -> Self {
        assert_eq!(self.calc.name, expected, "{}: Kind mismatch", self.context);
        self
    }

    pub fn result(self, expected: f64) -> Self {
        assert!(
            (self.calc.result - expected).abs() < 1e-9,
            "{}: Expected result {}, found {}",
            self.context,
            expected,
            self.calc.result
        );
        self
    }

    pub fn expression(self, expected: &str) -> Self {
        assert_eq!(
            self.calc.expression, expected,
            "{}: Expression mismatch",
            self.context
        );
        self
    }

    pub fn expression_contains(self, needle: &str) -> Self {
        assert!(
            self.calc.expression.contains(needle),
            "{}: Expected expression containing '{}', found '{}'",
            self.context,
            needle,
            self.calc.expression
        );
        self
    }

    pub fn original_expression(self, expected: &str) -> Self {
        assert_eq!(
            self.calc.original_expression, expected,
            "{}: Original expression mismatch",
            self.context
        );
        self
    }
}
