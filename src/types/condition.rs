use std::fmt;

use super::answer::Answer;

/// Comparison operators supported in condition expressions.
///
/// The grammar also accepts `===` and `!==` as spellings of `==` and `!=`;
/// answers are typed, so equality is already strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    /// The operator with swapped operand sides: `5 > answer` is stored as
    /// `answer < 5`.
    #[must_use]
    pub(crate) fn mirror(self) -> Self {
        match self {
            CompareOp::Gt => CompareOp::Lt,
            CompareOp::Gte => CompareOp::Lte,
            CompareOp::Lt => CompareOp::Gt,
            CompareOp::Lte => CompareOp::Gte,
            CompareOp::Eq | CompareOp::Neq => self,
        }
    }
}

/// A compiled path condition. Produced by parsing the textual grammar during
/// schema compilation; evaluation never parses strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `"default"` or `"true"`: matches any answer. Used as a catch-all and
    /// only reached after every preceding rule has been tried.
    Always,
    /// `"false"`: never matches.
    Never,
    /// A comparison of the submitted answer against a literal, normalized so
    /// the answer is always the left operand.
    Compare { op: CompareOp, value: Answer },
}

impl Condition {
    /// Parse a condition string into its compiled form.
    ///
    /// [`Schema::compile()`](super::Schema::compile) does this for every
    /// path rule; calling it directly is useful for validating a single
    /// condition at authoring time.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`](crate::ParseError) if the input is not valid
    /// condition syntax.
    pub fn parse(input: &str) -> Result<Self, crate::ParseError> {
        crate::parse::parse(input)
    }

    /// Decide whether this condition matches the given answer.
    ///
    /// Pure and total: incompatible operand types evaluate to `false` rather
    /// than failing a live session.
    #[must_use]
    pub fn matches(&self, answer: &Answer) -> bool {
        match self {
            Condition::Always => true,
            Condition::Never => false,
            Condition::Compare { op, value } => {
                answer.compare(*op, value).unwrap_or(false)
            }
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Neq => write!(f, "!="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Always => write!(f, "default"),
            Condition::Never => write!(f, "false"),
            Condition::Compare { op, value } => write!(f, "answer {op} {value}"),
        }
    }
}
