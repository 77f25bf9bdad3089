//! Treeviz formatter
//!
//! One line per node, two spaces of indentation per level:
//!
//!     <indentation><icon> <label>
//!
//! Labels are truncated to 30 characters. Attributes are shown on the element's own line.
//!
//! Icons
//!     Root: ⧉
//!     Text: ◦
//!     Elements: bld 𝐁, itl 𝐼, clr ◐, ruby ⺍, spo ▒, sub ₛ, aa ▦, youtube ▶, hr ―,
//!               dice and calc before evaluation ⟦
//!     DiceResult: ⚄
//!     CalcResult: ∑

use super::registry::{FormatError, Formatter};
use crate::tom::ast::{CalcResult, DiceResult, Element, Root, TagName};
use crate::tom::parsing::ParserConfig;
use crate::tom::prerender::format_number;
use crate::tom::render::{render, Renderer};
use crate::tom::serializer;

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(tag: TagName) -> &'static str {
    match tag {
        TagName::Bld => "𝐁",
        TagName::Itl => "𝐼",
        TagName::Clr => "◐",
        TagName::Ruby => "⺍",
        TagName::Spo => "▒",
        TagName::Sub => "ₛ",
        TagName::Aa => "▦",
        TagName::Youtube => "▶",
        TagName::Hr => "―",
        TagName::Dice | TagName::Calc | TagName::Calcn => "⟦",
    }
}

/// Builds the lines of each subtree
///
/// A node's output is its own line followed by its children's lines, indented one level.
pub struct TreevizRenderer;

impl TreevizRenderer {
    fn node(line: String, children: Vec<Vec<String>>) -> Vec<String> {
        let mut lines = vec![line];
        lines.extend(
            children
                .into_iter()
                .flatten()
                .map(|child| format!("  {}", child)),
        );
        lines
    }
}

impl Renderer for TreevizRenderer {
    type Output = Vec<String>;

    fn render_text(&mut self, text: &str) -> Vec<String> {
        vec![format!("◦ {}", truncate(text, LABEL_WIDTH))]
    }

    fn render_element(&mut self, element: &Element, children: Vec<Vec<String>>) -> Vec<String> {
        let attributes =
            serializer::stringify_attributes(&element.attributes, &ParserConfig::read());
        let label = format!("{}{}", element.name, attributes);
        Self::node(
            format!("{} {}", icon(element.name), truncate(&label, LABEL_WIDTH)),
            children,
        )
    }

    fn render_dice_result(&mut self, dice: &DiceResult) -> Vec<String> {
        vec![format!("⚄ dice {}..{} = {}", dice.min, dice.max, dice.result)]
    }

    fn render_calc_result(&mut self, calc: &CalcResult, children: Vec<Vec<String>>) -> Vec<String> {
        let label = truncate(&calc.expression, LABEL_WIDTH);
        Self::node(
            format!("∑ {} {} = {}", calc.name, label, format_number(calc.result)),
            children,
        )
    }
}

/// Treeviz text of a whole tree
pub fn to_treeviz_str(root: &Root) -> String {
    let mut output = format!("⧉ Root ({} nodes)\n", root.children.len());
    for line in render(root, &mut TreevizRenderer).into_iter().flatten() {
        output.push_str("  ");
        output.push_str(&line);
        output.push('\n');
    }
    output
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, root: &Root) -> Result<String, FormatError> {
        Ok(to_treeviz_str(root))
    }
}
