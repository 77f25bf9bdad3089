//! Prefix arithmetic: `[calc (op operand...)][/calc]`
//!
//! The single attribute is a group whose first member is one of `+ - * /`. Operands are
//! numbers, nested groups, dice and other calc/calcn elements.
//!
//!     +   sum
//!     -   negation of a single operand, otherwise left-folded subtraction
//!     *   product
//!     /   reciprocal of a single operand, otherwise left-folded division

use super::dice::Roll;
use super::error::{EvalError, EvalResult};
use super::{format_number, Evaluated, Operand, Prerenderer};
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
    let [Node::Nested { children }] = attributes else {
        return Err(EvalError::MissingGroup);
    };
    let group = group(pre, children, random)?;
    Ok(Evaluated {
        kind: CalcKind::Calc,
        expression: group.display,
        original: group.original,
        value: group.value,
    })
}

struct Group {
    display: String,
    original: String,
    value: f64,
}

fn group<R>(pre: &Prerenderer<'_>, members: &[Node], random: &mut R) -> EvalResult<Group>
where
    R: RandomSource + ?Sized,
{
    let Some((op, operands)) = members.split_first() else {
        return Err(EvalError::Syntax("empty group".to_string()));
    };
    let op = match op.as_text() {
        Some(op @ ("+" | "-" | "*" | "/")) => op,
        Some(other) => return Err(EvalError::UnknownOperator(other.to_string())),
        None => return Err(EvalError::UnknownOperator(op.node_type().to_string())),
    };

    let mut values = Vec::with_capacity(operands.len());
    let mut display = format!("({}", op);
    let mut original = display.clone();
    for operand in operands {
        let (shown, source, value) = match operand {
            Node::Text { value } => (value.clone(), value.clone(), number(value)?),
            Node::Nested { children } => {
                let inner = group(pre, children, random)?;
                (inner.display, inner.original, inner.value)
            }
            node => match pre.operand(node, random)? {
                Operand::Dice(roll) => dice(roll),
                Operand::Calc(evaluated, markup) => {
                    let shown = match evaluated.kind {
                        CalcKind::Calc => evaluated.expression,
                        CalcKind::Calcn => format!("({})", evaluated.expression),
                    };
                    (shown, markup, evaluated.value)
                }
            },
        };
        display.push(' ');
        display.push_str(&shown);
        original.push(' ');
        original.push_str(&source);
        values.push(value);
    }
    display.push(')');
    original.push(')');

    let value = apply(op, &values)?;
    Ok(Group {
        display,
        original,
        value,
    })
}

fn dice(roll: Roll) -> (String, String, f64) {
    (
        "[dice]".to_string(),
        format!("[dice {} {}]", roll.min, roll.max),
        roll.result as f64,
    )
}

fn number(text: &str) -> EvalResult<f64> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(EvalError::NotANumber(text.to_string())),
    }
}

fn apply(op: &str, values: &[f64]) -> EvalResult<f64> {
    let (first, rest) = values.split_first().ok_or(EvalError::NoOperands)?;
    let value = match (op, rest.is_empty()) {
        ("+", _) => values.iter().sum::<f64>(),
        ("*", _) => values.iter().product::<f64>(),
        ("-", true) => -first,
        ("/", true) => 1.0 / first,
        ("-", false) => rest.iter().fold(*first, |acc, v| acc - v),
        ("/", false) => rest.iter().fold(*first, |acc, v| acc / v),
        _ => return Err(EvalError::UnknownOperator(op.to_string())),
    };
    if value.is_finite() {
        Ok(value)
    } else {
        log::debug!(target: "tom.prerender", "calc ({} ...) gave {}", op, format_number(value));
        Err(EvalError::NonFinite)
    }
}
