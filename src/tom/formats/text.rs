//! Plain text projection of an evaluated tree
//!
//! Markup is dropped and only what a reader would see remains. Dice show as `[min~max]result`,
//! the way calcn displays them, and calc results as `expression = result`.

use super::registry::{FormatError, Formatter};
use crate::tom::ast::{CalcResult, DiceResult, Element, Root, TagName};
use crate::tom::prerender::format_number;
use crate::tom::render::{render, Renderer};

pub struct TextRenderer;

impl Renderer for TextRenderer {
    type Output = String;

    fn render_text(&mut self, text: &str) -> String {
        text.to_string()
    }

    fn render_element(&mut self, element: &Element, children: Vec<String>) -> String {
        let body = children.concat();
        match element.name {
            TagName::Hr => "\n----\n".to_string(),
            TagName::Youtube => match element.attributes.first().and_then(|a| a.as_text()) {
                Some(video) => format!("<youtube {}>", video),
                None => "<youtube>".to_string(),
            },
            TagName::Ruby => match element.text_attributes() {
                Some(furigana) if !furigana.is_empty() => {
                    format!("{}({})", body, furigana.join(" "))
                }
                _ => body,
            },
            _ => body,
        }
    }

    fn render_dice_result(&mut self, dice: &DiceResult) -> String {
        format!("[{}~{}]{}", dice.min, dice.max, dice.result)
    }

    fn render_calc_result(&mut self, calc: &CalcResult, _children: Vec<String>) -> String {
        format!("{} = {}", calc.expression, format_number(calc.result))
    }
}

pub fn to_text(root: &Root) -> String {
    render(root, &mut TextRenderer).concat()
}

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn serialize(&self, root: &Root) -> Result<String, FormatError> {
        Ok(to_text(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tom::parsing::parse;
    use crate::tom::prerender::prerender;
    use crate::tom::random::FixedRandom;

    fn text_of(source: &str) -> String {
        to_text(&prerender(parse(source).unwrap(), &mut FixedRandom(1)))
    }

    #[test]
    fn test_markup_is_dropped() {
        assert_eq!(text_of("[bld]a[/bld] [clr red]b[/clr]"), "a b");
    }

    #[test]
    fn test_evaluated_nodes() {
        assert_eq!(
            text_of("roll [dice 1 6]4[/dice], sum [calcn 1+2][/calcn]"),
            "roll [1~6]4, sum 1+2 = 3"
        );
    }

    #[test]
    fn test_ruby_and_youtube() {
        assert_eq!(text_of("[ruby かん じ]漢字[/ruby]"), "漢字(かん じ)");
        assert_eq!(text_of("[youtube abc123]"), "<youtube abc123>");
    }
}
