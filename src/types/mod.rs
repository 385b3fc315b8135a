mod answer;
mod condition;
mod error;
pub(crate) mod node;
mod schema;
mod session;

pub use answer::{Answer, InputKind};
pub use condition::{CompareOp, Condition};
pub use error::{AnswerError, SchemaError, StateError, SubmitError};
pub use node::{Constraints, Node, PathRule, FINISH};
pub use schema::{NodeBuilder, NodeRef, Schema, SchemaBuilder};
pub use session::{Session, SurveyState};
