use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use super::condition::CompareOp;

/// The input type a node expects, and the category of a submitted [`Answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InputKind {
    /// A yes/no answer.
    Boolean,
    /// A finite numeric answer.
    Number,
    /// A free-text answer.
    Text,
    /// A calendar-date answer.
    Date,
}

/// Supported answer values for survey evaluation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Answer {
    /// A boolean value.
    Bool(bool),
    /// A 64-bit floating-point number.
    Number(f64),
    /// A UTF-8 string.
    Text(String),
    /// A calendar date without timezone.
    Date(NaiveDate),
}

impl Answer {
    /// The category of this value, as reported in validation errors.
    #[must_use]
    pub fn kind(&self) -> InputKind {
        match self {
            Answer::Bool(_) => InputKind::Boolean,
            Answer::Number(_) => InputKind::Number,
            Answer::Text(_) => InputKind::Text,
            Answer::Date(_) => InputKind::Date,
        }
    }

    /// Compare this answer to another value using the given operator.
    /// Returns `None` for incompatible types, so that a condition over
    /// mismatched values falls through instead of crashing a live session.
    #[must_use]
    pub fn compare(&self, op: CompareOp, other: &Answer) -> Option<bool> {
        let ord = self.partial_cmp_answer(other)?;
        Some(match op {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::Neq => ord != Ordering::Equal,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::Gte => ord != Ordering::Less,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::Lte => ord != Ordering::Greater,
        })
    }

    fn partial_cmp_answer(&self, other: &Answer) -> Option<Ordering> {
        match (self, other) {
            (Answer::Number(a), Answer::Number(b)) => a.partial_cmp(b),
            (Answer::Bool(a), Answer::Bool(b)) => {
                // Only equality comparisons are meaningful for bools
                if a == b {
                    Some(Ordering::Equal)
                } else {
                    // Return an ordering so Eq/Neq work, but Gt/Lt will give
                    // technically valid but semantically odd results. This is
                    // fine -- conditions should only use Eq/Neq with bools.
                    Some(a.cmp(b))
                }
            }
            (Answer::Text(a), Answer::Text(b)) => a.partial_cmp(b),
            (Answer::Date(a), Answer::Date(b)) => Some(a.cmp(b)),
            // The condition grammar has no date literal, so a text operand
            // compared against a date answer is parsed as an ISO date.
            (Answer::Date(a), Answer::Text(b)) => {
                b.parse::<NaiveDate>().ok().map(|d| a.cmp(&d))
            }
            (Answer::Text(a), Answer::Date(b)) => {
                a.parse::<NaiveDate>().ok().map(|d| d.cmp(b))
            }
            _ => None,
        }
    }
}

impl From<bool> for Answer {
    fn from(v: bool) -> Self {
        Answer::Bool(v)
    }
}

impl From<f64> for Answer {
    fn from(v: f64) -> Self {
        Answer::Number(v)
    }
}

#[allow(clippy::cast_precision_loss)]
impl From<i64> for Answer {
    fn from(v: i64) -> Self {
        Answer::Number(v as f64)
    }
}

impl From<&str> for Answer {
    fn from(v: &str) -> Self {
        Answer::Text(v.to_owned())
    }
}

impl From<String> for Answer {
    fn from(v: String) -> Self {
        Answer::Text(v)
    }
}

impl From<NaiveDate> for Answer {
    fn from(v: NaiveDate) -> Self {
        Answer::Date(v)
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Boolean => write!(f, "boolean"),
            InputKind::Number => write!(f, "number"),
            InputKind::Text => write!(f, "text"),
            InputKind::Date => write!(f, "date"),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Bool(v) => write!(f, "{v}"),
            Answer::Number(v) => write!(f, "{v}"),
            Answer::Text(v) => write!(f, "\"{v}\""),
            Answer::Date(v) => write!(f, "{v}"),
        }
    }
}
