mod compile;
mod evaluate;
mod parse;
mod types;

pub use parse::ParseError;
pub use types::{
    Answer, AnswerError, CompareOp, Condition, Constraints, InputKind, Node, NodeBuilder, NodeRef,
    PathRule, Schema, SchemaBuilder, SchemaError, Session, StateError, SubmitError, SurveyState,
    FINISH,
};
