use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::types::node::{CompiledNode, CompiledPath, Target};
use crate::{Node, Schema, SchemaError, FINISH};

pub(crate) fn compile(nodes: &[Node]) -> Result<Schema, SchemaError> {
    if nodes.is_empty() {
        return Err(SchemaError::Empty);
    }

    check_duplicates(nodes)?;

    let index: HashMap<String, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.clone(), i))
        .collect();

    check_targets(nodes, &index)?;

    let compiled: Vec<CompiledNode> = nodes
        .iter()
        .map(|node| compile_node(node, &index))
        .collect::<Result<_, _>>()?;

    tracing::debug!(nodes = compiled.len(), entry = %nodes[0].id, "schema compiled");

    Ok(Schema {
        nodes: compiled,
        index,
    })
}

fn check_duplicates(nodes: &[Node]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for node in nodes {
        if !seen.insert(&node.id) {
            return Err(SchemaError::DuplicateNode {
                id: node.id.clone(),
            });
        }
    }
    Ok(())
}

fn check_targets(nodes: &[Node], index: &HashMap<String, usize>) -> Result<(), SchemaError> {
    for node in nodes {
        for rule in &node.paths {
            if rule.target != FINISH && !index.contains_key(&rule.target) {
                return Err(SchemaError::UnknownTarget {
                    node: node.id.clone(),
                    target: rule.target.clone(),
                });
            }
        }
    }
    Ok(())
}

fn compile_node(node: &Node, index: &HashMap<String, usize>) -> Result<CompiledNode, SchemaError> {
    let paths = node
        .paths
        .iter()
        .enumerate()
        .map(|(rule, path)| {
            let condition =
                crate::parse::parse(&path.condition).map_err(|source| SchemaError::Condition {
                    node: node.id.clone(),
                    rule,
                    text: path.condition.clone(),
                    source,
                })?;
            let target = if path.target == FINISH {
                Target::Finish
            } else {
                // Presence is guaranteed by check_targets.
                Target::Node(index[&path.target])
            };
            Ok(CompiledPath { condition, target })
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;

    let constraints = node.constraints.clone().unwrap_or_default();
    let pattern = constraints
        .pattern
        .as_deref()
        .map(|p| {
            // Anchored so the full answer must match, not a substring.
            Regex::new(&format!("^(?:{p})$")).map_err(|e| SchemaError::Pattern {
                node: node.id.clone(),
                pattern: p.to_owned(),
                message: e.to_string(),
            })
        })
        .transpose()?;

    Ok(CompiledNode {
        id: node.id.clone(),
        prompt: node.prompt.clone(),
        input: node.input,
        min: constraints.min,
        max: constraints.max,
        pattern,
        pattern_text: constraints.pattern,
        paths,
    })
}
