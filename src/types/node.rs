use regex::Regex;

use super::answer::InputKind;
use super::condition::Condition;

/// Reserved path target that ends the survey regardless of remaining nodes.
pub const FINISH: &str = "finish";

/// An ordered (condition, target) pair attached to a node.
///
/// The condition is a string in the condition grammar; it is parsed during
/// schema compilation. The target names another node id in the same schema,
/// or [`FINISH`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathRule {
    pub condition: String,
    pub target: String,
}

impl PathRule {
    pub fn new(condition: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            target: target.into(),
        }
    }
}

/// Optional validation constraints on a node's answer.
///
/// `min`/`max` apply to number nodes (inclusive); `pattern` applies to text
/// nodes and must match the full answer.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<String>,
}

/// One question in a survey schema: prompt, expected input type, optional
/// constraints, and the ordered path rules deciding what comes next.
///
/// This is the raw authoring shape. [`Schema::compile()`](super::Schema::compile)
/// validates it and parses its conditions into an executable form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: String,
    pub prompt: String,
    pub input: InputKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub constraints: Option<Constraints>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub paths: Vec<PathRule>,
}

impl Node {
    /// Create a node with no constraints and no paths (a terminal node until
    /// paths are added).
    pub fn new(id: impl Into<String>, prompt: impl Into<String>, input: InputKind) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            input,
            constraints: None,
            paths: Vec::new(),
        }
    }
}

/// A pre-resolved path destination: an index into the schema's node list, or
/// the end of the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Node(usize),
    Finish,
}

/// A path rule whose condition has been parsed and whose target has been
/// resolved to an index. Produced by the compilation step.
#[derive(Debug, Clone)]
pub(crate) struct CompiledPath {
    pub(crate) condition: Condition,
    pub(crate) target: Target,
}

/// A node whose conditions are parsed and whose pattern, if any, is a
/// compiled regex anchored to the full answer.
#[derive(Debug, Clone)]
pub(crate) struct CompiledNode {
    pub(crate) id: String,
    pub(crate) prompt: String,
    pub(crate) input: InputKind,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    /// Anchored form of `pattern_text`, used for matching.
    pub(crate) pattern: Option<Regex>,
    /// The pattern as authored, for presentation.
    pub(crate) pattern_text: Option<String>,
    pub(crate) paths: Vec<CompiledPath>,
}
