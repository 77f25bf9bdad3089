//! Rendering contract
//!
//! The engine does not produce presentation itself. A presentation layer implements
//! [`Renderer`] and [`render`] drives it over an evaluated tree, children first, so each
//! callback receives the already rendered body of its node.
//!
//! Only body content is walked. Attributes are handed over raw, since what they mean depends
//! on the tag (a colour, a video id, furigana). A `Nested` group outside an attribute section
//! can only come from a hand-built tree and is rendered as its literal text.

pub mod anchors;

use crate::tom::ast::{CalcResult, DiceResult, Element, Node, Root};
use crate::tom::parsing::ParserConfig;
use crate::tom::serializer;

pub use anchors::{collect_anchors, find_anchors, split_anchors, Anchor, AnchorContext, Segment};

/// Visitor over an evaluated tree
pub trait Renderer {
    type Output;

    fn render_text(&mut self, text: &str) -> Self::Output;

    fn render_element(&mut self, element: &Element, children: Vec<Self::Output>) -> Self::Output;

    fn render_dice_result(&mut self, dice: &DiceResult) -> Self::Output;

    fn render_calc_result(
        &mut self,
        calc: &CalcResult,
        children: Vec<Self::Output>,
    ) -> Self::Output;
}

/// Render every top-level node of a tree
pub fn render<R: Renderer>(root: &Root, renderer: &mut R) -> Vec<R::Output> {
    render_nodes(&root.children, renderer)
}

pub fn render_nodes<R: Renderer>(nodes: &[Node], renderer: &mut R) -> Vec<R::Output> {
    nodes
        .iter()
        .map(|node| render_node(node, renderer))
        .collect()
}

pub fn render_node<R: Renderer>(node: &Node, renderer: &mut R) -> R::Output {
    match node {
        Node::Text { value } => renderer.render_text(value),
        Node::Element(element) => {
            let children = render_nodes(&element.children, renderer);
            renderer.render_element(element, children)
        }
        Node::Nested { .. } => {
            let literal = serializer::stringify_node(node, &ParserConfig::read());
            renderer.render_text(&literal)
        }
        Node::DiceResult(dice) => renderer.render_dice_result(dice),
        Node::CalcResult(calc) => {
            let children = render_nodes(&calc.children, renderer);
            renderer.render_calc_result(calc, children)
        }
    }
}
