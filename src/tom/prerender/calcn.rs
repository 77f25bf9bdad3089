//! Infix arithmetic: `[calcn 3+4*[dice 1 6]][/calcn]`
//!
//! The attribute section is read as one flat infix stream. Each attribute contributes three
//! renderings, joined with single spaces: the display text, the text handed to the
//! [infix](super::infix) evaluator, and the original markup.
//!
//!     text        as written in all three
//!     group       parenthesized members
//!     dice        `[min~max]result` / `result` / `[dice min max]`
//!     calc(n)     its display / its value / its markup

use super::dice::Roll;
use super::error::EvalResult;
use super::{format_number, infix, Evaluated, Operand, Prerenderer};
use crate::tom::ast::{CalcKind, Node};
use crate::tom::random::RandomSource;

pub(super) fn evaluate<R>(
    pre: &Prerenderer<'_>,
    attributes: &[Node],
    random: &mut R,
) -> EvalResult<Evaluated>
where
    R: RandomSource + ?Sized,
{
    let stream = pieces(pre, attributes, random)?;
    let value = infix::evaluate(&stream.eval)?;
    log::trace!(target: "tom.prerender", "calcn '{}' = {}", stream.eval, format_number(value));
    Ok(Evaluated {
        kind: CalcKind::Calcn,
        expression: stream.display,
        original: stream.original,
        value,
    })
}

#[derive(Default)]
struct Stream {
    display: String,
    eval: String,
    original: String,
}

impl Stream {
    fn push(&mut self, display: &str, eval: &str, original: &str) {
        if !self.eval.is_empty() || !self.display.is_empty() {
            self.display.push(' ');
            self.eval.push(' ');
            self.original.push(' ');
        }
        self.display.push_str(display);
        self.eval.push_str(eval);
        self.original.push_str(original);
    }
}

fn pieces<R>(pre: &Prerenderer<'_>, nodes: &[Node], random: &mut R) -> EvalResult<Stream>
where
    R: RandomSource + ?Sized,
{
    let mut stream = Stream::default();
    for node in nodes {
        match node {
            Node::Text { value } => stream.push(value, value, value),
            Node::Nested { children } => {
                let inner = pieces(pre, children, random)?;
                stream.push(
                    &format!("({})", inner.display),
                    &format!("({})", inner.eval),
                    &format!("({})", inner.original),
                );
            }
            node => match pre.operand(node, random)? {
                Operand::Dice(roll) => {
                    let Roll { min, max, result } = roll;
                    stream.push(
                        &format!("[{}~{}]{}", min, max, result),
                        &operand_value(result as f64),
                        &format!("[dice {} {}]", min, max),
                    );
                }
                Operand::Calc(evaluated, markup) => {
                    let display = match evaluated.kind {
                        CalcKind::Calc => evaluated.expression,
                        CalcKind::Calcn => format!("({})", evaluated.expression),
                    };
                    stream.push(&display, &operand_value(evaluated.value), &markup);
                }
            },
        }
    }
    Ok(stream)
}

/// A number as it is spliced into the evaluation string
fn operand_value(value: f64) -> String {
    if value < 0.0 {
        format!("({})", format_number(value))
    } else {
        format_number(value)
    }
}
