use std::fmt;

/// Why an element could not be evaluated
///
/// Never surfaced to callers: the element is degraded to literal text and the reason logged.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EvalError {
    /// dice needs exactly two attributes
    DiceArity(usize),
    /// A dice bound is not an integer
    DiceBound(String),
    /// `min > max`
    DiceRange { min: i64, max: i64 },
    /// calc needs exactly one parenthesized group
    MissingGroup,
    UnknownOperator(String),
    NoOperands,
    NotANumber(String),
    /// clr or youtube with the wrong number of text attributes
    Arity { tag: &'static str, count: usize },
    /// A node kind that cannot stand in an arithmetic expression
    UnexpectedNode(&'static str),
    /// Malformed infix expression
    Syntax(String),
    TooDeep,
    /// Division by zero, overflow to infinity and friends
    NonFinite,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DiceArity(n) => write!(f, "dice takes 2 bounds, got {}", n),
            EvalError::DiceBound(s) => write!(f, "dice bound '{}' is not an integer", s),
            EvalError::DiceRange { min, max } => {
                write!(f, "dice minimum {} is above maximum {}", min, max)
            }
            EvalError::MissingGroup => write!(f, "calc takes a single (op ...) group"),
            EvalError::UnknownOperator(op) => write!(f, "unknown operator '{}'", op),
            EvalError::NoOperands => write!(f, "operator without operands"),
            EvalError::NotANumber(s) => write!(f, "'{}' is not a number", s),
            EvalError::Arity { tag, count } => {
                write!(f, "{} cannot take {} text attributes", tag, count)
            }
            EvalError::UnexpectedNode(kind) => write!(f, "{} cannot be used as an operand", kind),
            EvalError::Syntax(msg) => write!(f, "syntax error: {}", msg),
            EvalError::TooDeep => write!(f, "expression nested too deeply"),
            EvalError::NonFinite => write!(f, "result is not a finite number"),
        }
    }
}

impl std::error::Error for EvalError {}

pub(crate) type EvalResult<T> = std::result::Result<T, EvalError>;
