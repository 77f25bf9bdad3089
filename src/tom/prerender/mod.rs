//! Read-time evaluation
//!
//! Persisted text is parsed in read mode and then prerendered: dice elements become
//! [`DiceResult`]s carrying their frozen value, and `calc`/`calcn` elements are evaluated into
//! [`CalcResult`]s. Calc results are computed on every read and never persisted.
//!
//! Dice that appear as calc operands follow the same rule as top-level dice: the frozen result
//! wins and a fresh roll only happens when there is none.
//!
//! Any element that fails to evaluate is replaced by its literal markup. Nothing here fails.

mod calc;
mod calcn;
pub(crate) mod dice;
mod error;
mod infix;

use crate::tom::ast::{CalcKind, CalcResult, DiceResult, Element, Node, Root, TagName};
use crate::tom::parsing::ParserConfig;
use crate::tom::pipeline::strip_node;
use crate::tom::random::RandomSource;
use crate::tom::serializer;
use dice::Roll;
use error::{EvalError, EvalResult};

/// Evaluate a read-mode tree
pub fn prerender<R>(root: Root, random: &mut R) -> Root
where
    R: RandomSource + ?Sized,
{
    Prerenderer::new(&ParserConfig::read()).prerender(root, random)
}

/// Format a calc result: integral values without a fraction, no negative zero
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Write-mode markup of an operand with its frozen dice results removed
fn source_markup(node: &Node) -> String {
    let stripped = strip_node(node.clone());
    serializer::stringify_nodes(&stripped, &ParserConfig::write())
}

/// Attribute count check for display tags with a fixed number of text attributes
fn check_arity(element: &Element) -> EvalResult<()> {
    let Some(arity) = element.name.text_attribute_arity() else {
        return Ok(());
    };
    let all_text = element.attributes.iter().all(|a| a.as_text().is_some());
    if all_text && arity.contains(&element.attributes.len()) {
        Ok(())
    } else {
        Err(EvalError::Arity {
            tag: element.name.as_str(),
            count: element.attributes.len(),
        })
    }
}

/// Outcome of a calc or calcn evaluation
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Evaluated {
    pub kind: CalcKind,
    pub expression: String,
    pub original: String,
    pub value: f64,
}

/// An element standing in an arithmetic expression
pub(crate) enum Operand {
    Dice(Roll),
    /// A calc or calcn result along with the element's markup
    Calc(Evaluated, String),
}

pub struct Prerenderer<'c> {
    config: &'c ParserConfig,
}

impl<'c> Prerenderer<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self { config }
    }

    pub fn prerender<R>(&self, root: Root, random: &mut R) -> Root
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
            Node::Element(element) => self.element(element, random),
            Node::Nested { children } => Node::nested(self.nodes(children, random)),
            Node::CalcResult(mut calc) => {
                calc.children = self.nodes(calc.children, random);
                Node::CalcResult(calc)
            }
            other => other,
        }
    }

    fn element<R>(&self, element: Element, random: &mut R) -> Node
    where
        R: RandomSource + ?Sized,
    {
        if element.name == TagName::Dice {
            return match dice::resolve(&element, random) {
                Ok(Roll { min, max, result }) => Node::DiceResult(DiceResult {
                    min,
                    max,
                    result,
                    attributes: element.attributes,
                    children: element.children,
                }),
                Err(err) => self.degrade(element, err),
            };
        }

        if element.name.calc_kind().is_some() {
            return match self.evaluate(&element, random) {
                Ok(evaluated) => Node::CalcResult(CalcResult {
                    name: evaluated.kind,
                    expression: evaluated.expression,
                    original_expression: evaluated.original,
                    result: evaluated.value,
                    attributes: element.attributes,
                    children: self.nodes(element.children, random),
                }),
                Err(err) => self.degrade(element, err),
            };
        }

        if let Err(err) = check_arity(&element) {
            return self.degrade(element, err);
        }

        Node::element(
            element.name,
            self.nodes(element.attributes, random),
            self.nodes(element.children, random),
        )
    }

    /// Evaluate a calc or calcn element
    fn evaluate<R>(&self, element: &Element, random: &mut R) -> EvalResult<Evaluated>
    where
        R: RandomSource + ?Sized,
    {
        match element.name.calc_kind() {
            Some(CalcKind::Calc) => calc::evaluate(self, &element.attributes, random),
            Some(CalcKind::Calcn) => calcn::evaluate(self, &element.attributes, random),
            None => Err(EvalError::UnexpectedNode("Element")),
        }
    }

    /// Resolve an element operand of calc or calcn
    fn operand<R>(&self, node: &Node, random: &mut R) -> EvalResult<Operand>
    where
        R: RandomSource + ?Sized,
    {
        match node {
            Node::Element(element) if element.name == TagName::Dice => {
                dice::resolve(element, random).map(Operand::Dice)
            }
            Node::Element(element) if element.name.calc_kind().is_some() => {
                let evaluated = self.evaluate(element, random)?;
                Ok(Operand::Calc(evaluated, source_markup(node)))
            }
            Node::DiceResult(dice) => Ok(Operand::Dice(Roll::from(dice))),
            Node::CalcResult(calc) => {
                let markup = source_markup(node);
                Ok(Operand::Calc(
                    Evaluated {
                        kind: calc.name,
                        expression: calc.expression.clone(),
                        original: calc.original_expression.clone(),
                        value: calc.result,
                    },
                    markup,
                ))
            }
            Node::Element(element) => Err(EvalError::UnexpectedNode(element.name.as_str())),
            other => Err(EvalError::UnexpectedNode(other.node_type())),
        }
    }

    fn degrade(&self, element: Element, err: EvalError) -> Node {
        let literal = serializer::stringify_node(&Node::Element(element), self.config);
        log::debug!(target: "tom.prerender", "left as text ({}): {}", err, literal);
        Node::text(literal)
    }
}
