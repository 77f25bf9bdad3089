//! The three paths a post takes through the engine
//!
//!     write        user input -> preparse -> preprocess -> stringify      persisted text
//!     read         persisted text -> parse -> prerender                   evaluated tree
//!     view source  persisted text -> parse -> strip dice results -> stringify
//!
//! View source gives back what the author typed: frozen dice results are removed, so the text
//! can be edited and submitted again (and rolled again).

use crate::tom::ast::{Element, Node, Root, TagName};
use crate::tom::config::TomConfig;
use crate::tom::error::Result;
use crate::tom::parsing::{parse_with, ParserConfig};
use crate::tom::preprocess::Preprocessor;
use crate::tom::prerender::Prerenderer;
use crate::tom::random::RandomSource;
use crate::tom::serializer;

/// Write and read configurations bundled together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub write_config: ParserConfig,
    pub read_config: ParserConfig,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            write_config: ParserConfig::write(),
            read_config: ParserConfig::read(),
        }
    }
}

impl From<&TomConfig> for Pipeline {
    fn from(config: &TomConfig) -> Self {
        Self {
            write_config: config.write_config(),
            read_config: config.read_config(),
        }
    }
}

impl Pipeline {
    /// Turn a fresh submission into the text to persist, rolling its dice
    pub fn write<R>(&self, input: &str, random: &mut R) -> Result<String>
    where
        R: RandomSource + ?Sized,
    {
        let root = parse_with(input, &self.write_config)?;
        let root = Preprocessor::new(&self.write_config).preprocess(root, random);
        Ok(serializer::stringify(&root, &self.write_config))
    }

    /// Parse and evaluate persisted text for display
    pub fn read<R>(&self, persisted: &str, random: &mut R) -> Result<Root>
    where
        R: RandomSource + ?Sized,
    {
        let root = parse_with(persisted, &self.read_config)?;
        Ok(Prerenderer::new(&self.read_config).prerender(root, random))
    }

    /// Persisted text as its author wrote it
    pub fn view_source(&self, persisted: &str) -> Result<String> {
        let root = parse_with(persisted, &self.read_config)?;
        Ok(serializer::stringify(
            &strip_dice_results(root),
            &self.write_config,
        ))
    }
}

/// Write path with the built-in configurations
pub fn write<R>(input: &str, random: &mut R) -> Result<String>
where
    R: RandomSource + ?Sized,
{
    Pipeline::default().write(input, random)
}

/// Read path with the built-in configurations
pub fn read<R>(persisted: &str, random: &mut R) -> Result<Root>
where
    R: RandomSource + ?Sized,
{
    Pipeline::default().read(persisted, random)
}

/// View-source path with the built-in configurations
pub fn view_source(persisted: &str) -> Result<String> {
    Pipeline::default().view_source(persisted)
}

/// Drop the frozen result of every dice, wherever it sits
///
/// `DiceResult` nodes go back to plain dice elements too. Anything else a dice body holds is
/// kept and follows the bare dice, since a write-mode dice has no body.
pub fn strip_dice_results(root: Root) -> Root {
    Root::new(strip_nodes(root.children))
}

fn strip_nodes(nodes: Vec<Node>) -> Vec<Node> {
    nodes.into_iter().flat_map(strip_node).collect()
}

pub(crate) fn strip_node(node: Node) -> Vec<Node> {
    match node {
        Node::Element(element) if element.name == TagName::Dice => {
            strip_dice(strip_nodes(element.attributes), element.children)
        }
        Node::DiceResult(dice) => strip_dice(dice.attributes, dice.children),
        Node::Element(element) => vec![Node::element(
            element.name,
            strip_nodes(element.attributes),
            strip_nodes(element.children),
        )],
        Node::Nested { children } => vec![Node::nested(strip_nodes(children))],
        Node::CalcResult(mut calc) => {
            calc.attributes = strip_nodes(calc.attributes);
            calc.children = strip_nodes(calc.children);
            vec![Node::CalcResult(calc)]
        }
        text => vec![text],
    }
}

fn strip_dice(attributes: Vec<Node>, children: Vec<Node>) -> Vec<Node> {
    let mut body = children.into_iter().peekable();
    let frozen = body
        .peek()
        .and_then(Node::as_text)
        .is_some_and(|text| text.trim().parse::<i64>().is_ok());
    if frozen {
        body.next();
    }

    let mut out = vec![Node::Element(Element {
        name: TagName::Dice,
        attributes,
        children: Vec::new(),
    })];
    out.extend(strip_nodes(body.collect()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tom::random::FixedRandom;

    #[test]
    fn test_write_freezes_dice() {
        assert_eq!(
            write("roll [dice 1 6]!", &mut FixedRandom(4)).unwrap(),
            "roll [dice 1 6]4[/dice]!"
        );
    }

    #[test]
    fn test_view_source_strips_results() {
        assert_eq!(
            view_source("roll [dice 1 6]4[/dice] and [calc (+ 1 [dice 2 3]2[/dice])][/calc]")
                .unwrap(),
            "roll [dice 1 6] and [calc (+ 1 [dice 2 3])][/calc]"
        );
    }

    #[test]
    fn test_view_source_keeps_dice_body_content() {
        assert_eq!(
            view_source("[dice 1 6]4 [bld]x[/bld][/dice] end").unwrap(),
            "[dice 1 6][bld]x[/bld] end"
        );
        assert_eq!(
            view_source("[dice 1 6]lucky[/dice]").unwrap(),
            "[dice 1 6]lucky"
        );
    }

    #[test]
    fn test_view_source_then_write_rerolls() {
        let source = view_source("[dice 1 6]4[/dice]").unwrap();
        assert_eq!(
            write(&source, &mut FixedRandom(2)).unwrap(),
            "[dice 1 6]2[/dice]"
        );
    }

    #[test]
    fn test_read_uses_frozen_result() {
        let persisted = write("[dice 1 100]", &mut FixedRandom(42)).unwrap();
        let root = read(&persisted, &mut FixedRandom(1)).unwrap();
        assert!(matches!(
            root.children[..],
            [Node::DiceResult(crate::tom::ast::DiceResult { result: 42, .. })]
        ));
    }

    #[test]
    fn test_pipeline_from_config() {
        let config = crate::tom::config::load_defaults().unwrap();
        assert_eq!(Pipeline::from(&config), Pipeline::default());
    }
}
