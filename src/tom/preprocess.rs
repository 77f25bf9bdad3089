//! Write-time dice rolling
//!
//! A fresh submission is parsed in write mode, where `[dice min max]` is a complete element.
//! Every valid dice element is rolled once and replaced by a [`DiceResult`]; serializing the
//! tree then bakes the roll into the persisted text as `[dice min max]RESULT[/dice]`, so later
//! reads show the same number.
//!
//! Dice are frozen wherever they occur, including inside `calc`/`calcn` attribute sections.
//! An invalid dice element (wrong arity, non-integer bounds, `min > max`) becomes its literal
//! markup.

use crate::tom::ast::{DiceResult, Element, Node, Root, TagName};
use crate::tom::parsing::ParserConfig;
use crate::tom::prerender::dice::dice_bounds;
use crate::tom::random::RandomSource;
use crate::tom::serializer;

/// Roll every dice element of a write-mode tree
pub fn preprocess<R>(root: Root, random: &mut R) -> Root
where
    R: RandomSource + ?Sized,
{
    Preprocessor::new(&ParserConfig::write()).preprocess(root, random)
}

/// Preprocessor bound to the configuration the tree was parsed with
///
/// The configuration decides how degraded elements are written back as literal text.
pub struct Preprocessor<'c> {
    config: &'c ParserConfig,
}

impl<'c> Preprocessor<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self { config }
    }

    pub fn preprocess<R>(&self, root: Root, random: &mut R) -> Root
    where
        R: RandomSource + ?Sized,
    {
        Root::new(self.nodes(root.children, random))
    }

    fn nodes<R>(&self, nodes: Vec<Node>, random: &mut R) -> Vec<Node>
    where
        R: RandomSource + ?Sized,
    {
        nodes
            .into_iter()
            .map(|node| self.node(node, random))
            .collect()
    }

    fn node<R>(&self, node: Node, random: &mut R) -> Node
    where
        R: RandomSource + ?Sized,
    {
        match node {
            Node::Element(element) if element.name == TagName::Dice => self.dice(element, random),
            Node::Element(element) => Node::element(
                element.name,
                self.nodes(element.attributes, random),
                self.nodes(element.children, random),
            ),
            Node::Nested { children } => Node::nested(self.nodes(children, random)),
            other => other,
        }
    }

    fn dice<R>(&self, element: Element, random: &mut R) -> Node
    where
        R: RandomSource + ?Sized,
    {
        match dice_bounds(&element.attributes) {
            Ok((min, max)) => {
                let result = random.roll(min, max);
                log::trace!(target: "tom.preprocess", "rolled {} in {}..={}", result, min, max);
                Node::DiceResult(DiceResult {
                    min,
                    max,
                    result,
                    attributes: element.attributes,
                    children: element.children,
                })
            }
            Err(err) => {
                let literal = serializer::stringify_node(&Node::Element(element), self.config);
                log::debug!(target: "tom.preprocess", "dice left as text ({}): {}", err, literal);
                Node::text(literal)
            }
        }
    }
}
