use std::collections::HashMap;
use std::fmt;

use super::answer::InputKind;
use super::error::SchemaError;
use super::node::{CompiledNode, Constraints, Node, PathRule};

/// Builder for constructing a [`Schema`].
///
/// Nodes are defined via closures and compiled into an immutable, thread-safe
/// schema. The first node defined is the survey's entry point.
///
/// # Example
///
/// ```
/// use wayline::{InputKind, SchemaBuilder};
///
/// let schema = SchemaBuilder::new()
///     .node("owns", "Do you own the property?", InputKind::Boolean, |n| {
///         n.path("answer == true", "rooms").path("default", "finish")
///     })
///     .node("rooms", "How many rooms does it have?", InputKind::Number, |n| {
///         n.range(1.0, 50.0)
///     })
///     .compile()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    nodes: Vec<Node>,
}

/// Intermediate builder passed to the node definition closure.
#[derive(Debug)]
pub struct NodeBuilder {
    constraints: Constraints,
    paths: Vec<PathRule>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a node. The closure adds constraints and path rules; returning
    /// it unchanged defines an unconstrained terminal node.
    #[must_use]
    pub fn node(
        mut self,
        id: &str,
        prompt: &str,
        input: InputKind,
        f: impl FnOnce(NodeBuilder) -> NodeBuilder,
    ) -> Self {
        let builder = f(NodeBuilder {
            constraints: Constraints::default(),
            paths: Vec::new(),
        });
        let constraints = if builder.constraints == Constraints::default() {
            None
        } else {
            Some(builder.constraints)
        };
        self.nodes.push(Node {
            id: id.to_owned(),
            prompt: prompt.to_owned(),
            input,
            constraints,
            paths: builder.paths,
        });
        self
    }

    /// Compile the nodes into an immutable `Schema`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if validation fails.
    pub fn compile(self) -> Result<Schema, SchemaError> {
        crate::compile::compile(&self.nodes)
    }
}

impl NodeBuilder {
    /// Append a path rule. Rules are tried in the order they are added.
    #[must_use]
    pub fn path(mut self, condition: &str, target: &str) -> Self {
        self.paths.push(PathRule::new(condition, target));
        self
    }

    /// Set inclusive numeric bounds.
    #[must_use]
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.constraints.min = Some(min);
        self.constraints.max = Some(max);
        self
    }

    /// Set the inclusive lower bound only.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    /// Set the inclusive upper bound only.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.constraints.max = Some(max);
        self
    }

    /// Require the full text answer to match the given regex.
    #[must_use]
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.constraints.pattern = Some(pattern.to_owned());
        self
    }
}

/// A compiled, immutable survey schema. Thread-safe and designed to live
/// behind `Arc`, shared read-only by any number of sessions.
#[derive(Debug)]
pub struct Schema {
    pub(crate) nodes: Vec<CompiledNode>,
    pub(crate) index: HashMap<String, usize>,
}

impl Schema {
    /// Validate and compile raw nodes into a `Schema`.
    ///
    /// All conditions are parsed and all patterns compiled here, so a live
    /// session never parses text and can never hit a dangling reference.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] naming the offending node on the first
    /// violation found.
    pub fn compile(nodes: Vec<Node>) -> Result<Self, SchemaError> {
        crate::compile::compile(&nodes)
    }

    /// The survey's entry point: the first node of the schema.
    #[must_use]
    pub fn entry(&self) -> NodeRef<'_> {
        NodeRef {
            node: &self.nodes[0],
        }
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<NodeRef<'_>> {
        self.index.get(id).map(|&i| NodeRef {
            node: &self.nodes[i],
        })
    }

    /// Number of nodes in the schema. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in schema (authoring) order.
    #[must_use]
    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Schema({} nodes, entry '{}')",
            self.nodes.len(),
            self.nodes[0].id,
        )
    }
}

/// A read-only view of one compiled node: everything a presentation layer
/// needs to render the question and collect an answer.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub(crate) node: &'a CompiledNode,
}

impl NodeRef<'_> {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.node.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.node.prompt
    }

    #[must_use]
    pub fn input(&self) -> InputKind {
        self.node.input
    }

    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.node.min
    }

    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.node.max
    }

    /// The text pattern as authored, if any.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.node.pattern_text.as_deref()
    }

    /// Whether this node has no outgoing path rules.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.node.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_nodes_in_order() {
        let schema = SchemaBuilder::new()
            .node("a", "First?", InputKind::Boolean, |n| {
                n.path("default", "b")
            })
            .node("b", "Second?", InputKind::Text, |n| n)
            .compile()
            .unwrap();

        assert_eq!(schema.node_ids(), vec!["a", "b"]);
        assert_eq!(schema.entry().id(), "a");
    }

    #[test]
    fn node_lookup_by_id() {
        let schema = SchemaBuilder::new()
            .node("start", "Ready?", InputKind::Boolean, |n| n)
            .compile()
            .unwrap();

        assert!(schema.node("start").is_some());
        assert!(schema.node("missing").is_none());
    }

    #[test]
    fn node_ref_exposes_render_data() {
        let schema = SchemaBuilder::new()
            .node("rooms", "How many rooms?", InputKind::Number, |n| {
                n.range(1.0, 10.0).path("answer > 5", "finish")
            })
            .node("zip", "Postcode?", InputKind::Text, |n| n.pattern(r"\d{5}"))
            .compile()
            .unwrap();

        let rooms = schema.node("rooms").unwrap();
        assert_eq!(rooms.prompt(), "How many rooms?");
        assert_eq!(rooms.input(), InputKind::Number);
        assert_eq!(rooms.min(), Some(1.0));
        assert_eq!(rooms.max(), Some(10.0));
        assert!(rooms.pattern().is_none());
        assert!(!rooms.is_terminal());

        let zip = schema.node("zip").unwrap();
        assert_eq!(zip.pattern(), Some(r"\d{5}"));
        assert!(zip.is_terminal());
    }

    #[test]
    fn display() {
        let schema = SchemaBuilder::new()
            .node("a", "?", InputKind::Boolean, |n| n)
            .node("b", "?", InputKind::Boolean, |n| n)
            .compile()
            .unwrap();
        assert_eq!(schema.to_string(), "Schema(2 nodes, entry 'a')");
    }
}
