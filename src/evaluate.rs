use chrono::NaiveDate;

use crate::types::node::{CompiledNode, Target};
use crate::{Answer, AnswerError, InputKind};

/// Validate a raw answer against the node's expected input and constraints.
///
/// Returns the value to store in history. The only normalization is an
/// ISO-8601 string submitted to a date node, which is stored as a date.
pub(crate) fn check_answer(node: &CompiledNode, raw: Answer) -> Result<Answer, AnswerError> {
    match node.input {
        InputKind::Boolean => match raw {
            Answer::Bool(_) => Ok(raw),
            other => Err(type_error(node, &other)),
        },
        InputKind::Number => match raw {
            Answer::Number(v) => {
                if !v.is_finite() {
                    return Err(AnswerError::NotFinite {
                        node: node.id.clone(),
                    });
                }
                if let Some(min) = node.min {
                    if v < min {
                        return Err(AnswerError::BelowMin {
                            node: node.id.clone(),
                            min,
                            value: v,
                        });
                    }
                }
                if let Some(max) = node.max {
                    if v > max {
                        return Err(AnswerError::AboveMax {
                            node: node.id.clone(),
                            max,
                            value: v,
                        });
                    }
                }
                Ok(raw)
            }
            other => Err(type_error(node, &other)),
        },
        InputKind::Text => match raw {
            Answer::Text(ref s) => {
                if let Some(pattern) = &node.pattern {
                    if !pattern.is_match(s) {
                        return Err(AnswerError::Pattern {
                            node: node.id.clone(),
                        });
                    }
                }
                Ok(raw)
            }
            other => Err(type_error(node, &other)),
        },
        InputKind::Date => match raw {
            Answer::Date(_) => Ok(raw),
            Answer::Text(s) => s
                .parse::<NaiveDate>()
                .map(Answer::Date)
                .map_err(|_| AnswerError::InvalidDate {
                    node: node.id.clone(),
                }),
            other => Err(type_error(node, &other)),
        },
    }
}

fn type_error(node: &CompiledNode, got: &Answer) -> AnswerError {
    AnswerError::Type {
        node: node.id.clone(),
        expected: node.input,
        got: got.kind(),
    }
}

/// Resolve the next target for a validated answer.
///
/// Path rules are tried in array order and the first match wins; `None`
/// (including the empty-paths case) means no further node.
pub(crate) fn next_target(node: &CompiledNode, answer: &Answer) -> Option<Target> {
    for (rule, path) in node.paths.iter().enumerate() {
        if path.condition.matches(answer) {
            tracing::trace!(node = %node.id, rule, "path rule matched");
            return Some(path.target);
        }
    }
    None
}
