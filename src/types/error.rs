use thiserror::Error;

use crate::parse::ParseError;

use super::answer::InputKind;

/// Structural problems found while compiling a schema. Construction fails
/// closed: no partially validated schema is ever returned.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema must contain at least one node")]
    Empty,

    #[error("duplicate node id '{id}'")]
    DuplicateNode { id: String },

    #[error("node '{node}' targets unknown node '{target}'")]
    UnknownTarget { node: String, target: String },

    #[error("invalid condition '{text}' in node '{node}', rule {rule}: {source}")]
    Condition {
        node: String,
        rule: usize,
        text: String,
        source: ParseError,
    },

    #[error("invalid pattern '{pattern}' on node '{node}': {message}")]
    Pattern {
        node: String,
        pattern: String,
        message: String,
    },
}

/// A submitted answer that fails the current node's type or constraint
/// checks. Recoverable: session state is untouched and the caller may
/// re-prompt and retry.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("node '{node}' expects a {expected} answer, got {got}")]
    Type {
        node: String,
        expected: InputKind,
        got: InputKind,
    },

    #[error("node '{node}' expects a finite number")]
    NotFinite { node: String },

    #[error("answer {value} is below the minimum {min} for node '{node}'")]
    BelowMin { node: String, min: f64, value: f64 },

    #[error("answer {value} is above the maximum {max} for node '{node}'")]
    AboveMax { node: String, max: f64, value: f64 },

    #[error("answer for node '{node}' does not match required pattern")]
    Pattern { node: String },

    #[error("invalid date string for node '{node}'")]
    InvalidDate { node: String },
}

/// Misuse of the session API by the calling layer, not a content problem.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("session has not been started")]
    NotStarted,

    #[error("session already started; call reset() to run it again")]
    AlreadyStarted,

    #[error("survey is complete; no further answers are accepted")]
    Complete,
}

/// Everything `submit_answer` can reject.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Answer(#[from] AnswerError),

    #[error(transparent)]
    State(#[from] StateError),
}
