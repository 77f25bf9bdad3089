//! Dice validation and resolution

use super::error::{EvalError, EvalResult};
use crate::tom::ast::{DiceResult, Element, Node};
use crate::tom::random::RandomSource;

/// A dice element's bounds and value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Roll {
    pub min: i64,
    pub max: i64,
    pub result: i64,
}

/// Bounds of a dice element: exactly two integer attributes with `min <= max`
pub(crate) fn dice_bounds(attributes: &[Node]) -> EvalResult<(i64, i64)> {
    let [min, max] = attributes else {
        return Err(EvalError::DiceArity(attributes.len()));
    };
    let min = integer(min)?;
    let max = integer(max)?;
    if min > max {
        return Err(EvalError::DiceRange { min, max });
    }
    Ok((min, max))
}

fn integer(node: &Node) -> EvalResult<i64> {
    let text = node
        .as_text()
        .ok_or(EvalError::UnexpectedNode(node.node_type()))?;
    text.parse()
        .map_err(|_| EvalError::DiceBound(text.to_string()))
}

/// Value of a read-mode dice element
///
/// The frozen result in the body wins. Without one (or when it does not parse) the dice is
/// rolled now.
pub(crate) fn resolve<R>(element: &Element, random: &mut R) -> EvalResult<Roll>
where
    R: RandomSource + ?Sized,
{
    let (min, max) = dice_bounds(&element.attributes)?;
    let result = match element.first_child_text().and_then(|t| t.trim().parse().ok()) {
        Some(frozen) => frozen,
        None => {
            let rolled = random.roll(min, max);
            log::debug!(target: "tom.prerender", "dice {}..={} had no frozen result, rolled {}", min, max, rolled);
            rolled
        }
    };
    Ok(Roll { min, max, result })
}

impl From<&DiceResult> for Roll {
    fn from(dice: &DiceResult) -> Self {
        Roll {
            min: dice.min,
            max: dice.max,
            result: dice.result,
        }
    }
}
