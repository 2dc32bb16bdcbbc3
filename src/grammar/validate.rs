//! Construction-time checks that need the complete node graph.
//!
//! A rule that can come back to itself without consuming a character would
//! recurse forever at evaluation time. Such cycles are found here by following,
//! for every rule, the rules that may be entered at the very position the rule
//! itself started at: the first element of each sequence, and the following
//! ones as long as everything before them can match the empty string.

use super::error::{GrammarError, GrammarResult};
use super::node::{Node, ParserId, RuleDef, RuleId};

/// For every node, whether it can succeed without consuming input.
pub(crate) fn nullable_nodes(nodes: &[Node], rules: &[RuleDef]) -> Vec<bool> {
    let mut nullable = vec![false; nodes.len()];
    let mut nullable_rules = vec![false; rules.len()];

    // monotone, so this reaches a fixpoint
    loop {
        let mut changed = false;
        for (index, node) in nodes.iter().enumerate() {
            let value = match node {
                Node::Any(_) | Node::CharRange(_) | Node::CharSet(_) => false,
                Node::Literal(literal) => literal.is_empty(),
                Node::Eof(_) => true,
                Node::Sequence(children) => children.iter().all(|child| nullable[child.0]),
                Node::Rule(rule) => nullable_rules[rule.0],
            };
            if value && !nullable[index] {
                nullable[index] = true;
                changed = true;
            }
        }
        for (index, rule) in rules.iter().enumerate() {
            if !nullable_rules[index] && rule.alternatives.iter().any(|alt| nullable[alt.0]) {
                nullable_rules[index] = true;
                changed = true;
            }
        }
        if !changed {
            return nullable;
        }
    }
}

fn leading_rules(nodes: &[Node], nullable: &[bool], id: ParserId, out: &mut Vec<RuleId>) {
    match &nodes[id.0] {
        Node::Rule(rule) => out.push(*rule),
        Node::Sequence(children) => {
            for child in children {
                leading_rules(nodes, nullable, *child, out);
                if !nullable[child.0] {
                    break;
                }
            }
        }
        _ => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Active,
    Done,
}

fn find_cycle(
    rule: RuleId,
    edges: &[Vec<RuleId>],
    state: &mut [Visit],
    path: &mut Vec<RuleId>,
) -> Option<Vec<RuleId>> {
    match state[rule.0] {
        Visit::Done => return None,
        Visit::Active => {
            let start = path.iter().position(|r| *r == rule)?;
            let mut cycle = path[start..].to_vec();
            cycle.push(rule);
            return Some(cycle);
        }
        Visit::New => {}
    }

    state[rule.0] = Visit::Active;
    path.push(rule);
    for next in &edges[rule.0] {
        if let Some(cycle) = find_cycle(*next, edges, state, path) {
            return Some(cycle);
        }
    }
    path.pop();
    state[rule.0] = Visit::Done;
    None
}

pub(crate) fn check_left_recursion(nodes: &[Node], rules: &[RuleDef]) -> GrammarResult<()> {
    let nullable = nullable_nodes(nodes, rules);
    let edges: Vec<Vec<RuleId>> = rules
        .iter()
        .map(|rule| {
            let mut out = Vec::new();
            for alternative in &rule.alternatives {
                leading_rules(nodes, &nullable, *alternative, &mut out);
            }
            out.sort();
            out.dedup();
            out
        })
        .collect();

    let mut state = vec![Visit::New; rules.len()];
    let mut path = Vec::new();
    for start in 0..rules.len() {
        if let Some(cycle) = find_cycle(RuleId(start), &edges, &mut state, &mut path) {
            return Err(GrammarError::UnboundedRecursion {
                cycle: cycle
                    .iter()
                    .map(|rule| rules[rule.0].name.clone())
                    .collect(),
            });
        }
    }
    Ok(())
}
