mod error;
mod grammar;
mod parser;

pub use error::ParseError;

use parser::{Operand, RawCondition};

use crate::Condition;

/// Parse a condition string into a compiled [`Condition`].
///
/// A comparison must reference the submitted answer via the `answer` keyword
/// on exactly one side; when it appears on the right, the operator is
/// mirrored so evaluation always sees the answer as the left operand.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid condition syntax or does
/// not reference `answer` exactly once.
pub fn parse(input: &str) -> Result<Condition, ParseError> {
    use winnow::Parser;
    let raw = grammar::raw_condition
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))?;

    match raw {
        RawCondition::Always => Ok(Condition::Always),
        RawCondition::Never => Ok(Condition::Never),
        RawCondition::Compare { left, op, right } => match (left, right) {
            (Operand::Answer, Operand::Literal(value)) => {
                Ok(Condition::Compare { op, value })
            }
            (Operand::Literal(value), Operand::Answer) => Ok(Condition::Compare {
                op: op.mirror(),
                value,
            }),
            (Operand::Answer, Operand::Answer) => Err(ParseError::new(
                "comparison must reference 'answer' exactly once, found it on both sides",
            )),
            (Operand::Literal(_), Operand::Literal(_)) => Err(ParseError::new(
                "comparison must reference the submitted answer via the 'answer' keyword",
            )),
        },
    }
}
