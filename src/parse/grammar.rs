use winnow::combinator::{alt, cut_err, fail, opt};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::{Answer, CompareOp};

use super::parser::{Operand, RawCondition};

// -- Whitespace -------------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

// -- Literals ---------------------------------------------------------------

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = any.parse_next(input)?;
        match ch {
            '"' => return Ok(s),
            '\\' => {
                let esc = any.parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

/// A run of bare-word characters: identifiers, numbers, ISO dates. The token
/// is classified afterwards, so `2024-06-01` stays one token instead of being
/// split at the first dash.
fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
    })
    .parse_next(input)
}

fn classify(token: &str) -> Operand {
    match token {
        "answer" => Operand::Answer,
        "true" => Operand::Literal(Answer::Bool(true)),
        "false" => Operand::Literal(Answer::Bool(false)),
        other => match other.parse::<f64>() {
            Ok(n) => Operand::Literal(Answer::Number(n)),
            Err(_) => Operand::Literal(Answer::Text(other.to_owned())),
        },
    }
}

fn operand(input: &mut &str) -> ModalResult<Operand> {
    ws.parse_next(input)?;
    alt((
        string_literal.map(|s| Operand::Literal(Answer::Text(s))),
        word.map(classify),
    ))
    .context(StrContext::Expected(StrContextValue::Description("operand")))
    .parse_next(input)
}

// -- Comparison operators ---------------------------------------------------

fn compare_op(input: &mut &str) -> ModalResult<CompareOp> {
    ws.parse_next(input)?;
    // Longest tokens first: `===`/`!==` are spellings of `==`/`!=`.
    alt((
        ">=".value(CompareOp::Gte),
        "<=".value(CompareOp::Lte),
        "===".value(CompareOp::Eq),
        "==".value(CompareOp::Eq),
        "!==".value(CompareOp::Neq),
        "!=".value(CompareOp::Neq),
        ">".value(CompareOp::Gt),
        "<".value(CompareOp::Lt),
    ))
    .parse_next(input)
}

// -- Top-level condition ----------------------------------------------------

pub(crate) fn raw_condition(input: &mut &str) -> ModalResult<RawCondition> {
    let left = operand.parse_next(input)?;

    if let Some(op) = opt(compare_op).parse_next(input)? {
        let right = cut_err(operand).parse_next(input)?;
        ws.parse_next(input)?;
        return Ok(RawCondition::Compare { left, op, right });
    }

    ws.parse_next(input)?;
    match left {
        Operand::Literal(Answer::Bool(true)) => Ok(RawCondition::Always),
        Operand::Literal(Answer::Bool(false)) => Ok(RawCondition::Never),
        Operand::Literal(Answer::Text(ref word)) if word == "default" => {
            Ok(RawCondition::Always)
        }
        _ => fail
            .context(StrContext::Expected(StrContextValue::Description(
                "'default', 'true', 'false', or a comparison",
            )))
            .parse_next(input),
    }
}
