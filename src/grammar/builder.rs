use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::debug;

use super::error::{GrammarError, GrammarResult};
use super::node::{Node, ParserId, RuleDef, RuleId};
use super::validate::check_left_recursion;
use super::Grammar;
use crate::analyzer::char_set::CharSet;
use crate::analyzer::combinators::{Any, CharRange, Eof, Literal};
use crate::config::EngineConfig;

/// Assembles a grammar node by node.
///
/// Every construction call returns the [`ParserId`] of the new node, which
/// later nodes use to refer to it. Rules are declared first and bound to their
/// alternatives afterwards, so a rule can appear inside its own definition.
///
/// ```
/// use twinparse::{GrammarBuilder, Mode};
///
/// let mut builder = GrammarBuilder::new();
/// let digit = builder.char_range('0', '9')?;
/// let number = builder.rule("number")?;
/// let more = builder.sequence([digit, number])?;
/// builder.bind(number, [more, digit])?;
///
/// let grammar = builder.build(number)?;
/// let span = grammar.parse("2024!", 0, Mode::Parser).unwrap();
/// assert_eq!(span.as_substring_of("2024!"), "2024");
/// # Ok::<(), twinparse::grammar::GrammarError>(())
/// ```
static NEXT_ARENA: AtomicU32 = AtomicU32::new(0);

#[derive(Debug)]
pub struct GrammarBuilder {
    arena: u32,
    nodes: Vec<Node>,
    rules: Vec<PendingRule>,
    names: HashMap<String, RuleId>,
}

#[derive(Debug)]
struct PendingRule {
    name: String,
    node: ParserId,
    alternatives: Option<Vec<ParserId>>,
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self {
            arena: NEXT_ARENA.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            rules: Vec::new(),
            names: HashMap::new(),
        }
    }

    fn push(&mut self, node: Node) -> ParserId {
        self.nodes.push(node);
        ParserId(self.nodes.len() - 1, self.arena)
    }

    /// Accepts only ids this builder handed out.
    fn check(&self, id: ParserId) -> GrammarResult<()> {
        if id.1 == self.arena && id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(GrammarError::UnknownParser { id: id.0 })
        }
    }

    fn rule_of(&self, id: ParserId) -> GrammarResult<RuleId> {
        self.check(id)?;
        match self.nodes[id.0] {
            Node::Rule(rule) => Ok(rule),
            _ => Err(GrammarError::NotARule { id: id.0 }),
        }
    }

    pub fn any(&mut self) -> ParserId {
        self.push(Node::Any(Any))
    }

    pub fn char_range(&mut self, lo: char, hi: char) -> GrammarResult<ParserId> {
        let range = CharRange::new(lo, hi)?;
        Ok(self.push(Node::CharRange(range)))
    }

    pub fn char_set(&mut self, spec: &str) -> GrammarResult<ParserId> {
        let set = CharSet::new(spec)?;
        Ok(self.push(Node::CharSet(set)))
    }

    pub fn literal(&mut self, text: &str) -> ParserId {
        self.push(Node::Literal(Literal::new(text)))
    }

    pub fn eof(&mut self) -> ParserId {
        self.push(Node::Eof(Eof))
    }

    pub fn sequence(
        &mut self,
        children: impl IntoIterator<Item = ParserId>,
    ) -> GrammarResult<ParserId> {
        let children: Vec<ParserId> = children.into_iter().collect();
        for child in &children {
            self.check(*child)?;
        }
        Ok(self.push(Node::Sequence(children)))
    }

    /// Declares a rule. Its alternatives are supplied later through [`bind`](Self::bind).
    pub fn rule(&mut self, name: &str) -> GrammarResult<ParserId> {
        if self.names.contains_key(name) {
            return Err(GrammarError::DuplicateRule {
                name: name.to_string(),
            });
        }
        let rule = RuleId(self.rules.len());
        let node = self.push(Node::Rule(rule));
        self.rules.push(PendingRule {
            name: name.to_string(),
            node,
            alternatives: None,
        });
        self.names.insert(name.to_string(), rule);
        Ok(node)
    }

    /// Binds a declared rule to its alternatives, in priority order. A rule can
    /// be bound exactly once.
    pub fn bind(
        &mut self,
        rule: ParserId,
        alternatives: impl IntoIterator<Item = ParserId>,
    ) -> GrammarResult<()> {
        let rule = self.rule_of(rule)?;
        let alternatives: Vec<ParserId> = alternatives.into_iter().collect();
        for alternative in &alternatives {
            self.check(*alternative)?;
        }

        let pending = &mut self.rules[rule.0];
        if pending.alternatives.is_some() {
            return Err(GrammarError::RuleAlreadyBound {
                name: pending.name.clone(),
            });
        }
        if alternatives.is_empty() {
            return Err(GrammarError::EmptyRule {
                name: pending.name.clone(),
            });
        }
        pending.alternatives = Some(alternatives);
        Ok(())
    }

    /// Binds a rule to a single target parser.
    pub fn set_target(&mut self, rule: ParserId, target: ParserId) -> GrammarResult<()> {
        self.bind(rule, [target])
    }

    pub fn build(self, root: ParserId) -> GrammarResult<Grammar> {
        self.build_with_config(root, EngineConfig::default())
    }

    /// Validates the assembled nodes and freezes them into a [`Grammar`].
    ///
    /// Fails when a rule was never bound or when a rule can reach itself
    /// without consuming input in between.
    #[tracing::instrument(level = "debug", skip(self, config))]
    pub fn build_with_config(self, root: ParserId, config: EngineConfig) -> GrammarResult<Grammar> {
        self.check(root)?;
        let GrammarBuilder {
            arena: _,
            nodes,
            rules,
            names,
        } = self;

        let rules = rules
            .into_iter()
            .map(|pending| match pending.alternatives {
                Some(alternatives) => Ok(RuleDef {
                    name: pending.name,
                    node: pending.node,
                    alternatives,
                }),
                None => Err(GrammarError::UnresolvedRule { name: pending.name }),
            })
            .collect::<GrammarResult<Vec<_>>>()
            .inspect_err(|e| tracing::error!("{}", e))?;

        check_left_recursion(&nodes, &rules).inspect_err(|e| tracing::error!("{}", e))?;

        debug!(nodes = nodes.len(), rules = rules.len(), "grammar built");
        Ok(Grammar::new(nodes, rules, names, root, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rule_binding() {
        let mut builder = GrammarBuilder::new();
        let a = builder.literal("a");
        let rule = builder.rule("r").unwrap();

        assert_eq!(
            builder.bind(rule, []),
            Err(GrammarError::EmptyRule {
                name: "r".to_string()
            })
        );
        assert_eq!(builder.set_target(rule, a), Ok(()));
        assert_eq!(
            builder.set_target(rule, a),
            Err(GrammarError::RuleAlreadyBound {
                name: "r".to_string()
            })
        );
    }

    #[test]
    fn test_bind_requires_rule_node() {
        let mut builder = GrammarBuilder::new();
        let a = builder.literal("a");
        let b = builder.literal("b");
        assert_eq!(builder.bind(a, [b]), Err(GrammarError::NotARule { id: 0 }));
    }

    #[test]
    fn test_duplicate_rule() {
        let mut builder = GrammarBuilder::new();
        builder.rule("token").unwrap();
        assert_eq!(
            builder.rule("token"),
            Err(GrammarError::DuplicateRule {
                name: "token".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_parser() {
        let mut builder = GrammarBuilder::new();
        let a = builder.literal("a");
        let out_of_range = ParserId(7, builder.arena);
        assert_eq!(
            builder.sequence([a, out_of_range]),
            Err(GrammarError::UnknownParser { id: 7 })
        );
        assert!(matches!(
            builder.build(out_of_range),
            Err(GrammarError::UnknownParser { id: 7 })
        ));
    }

    #[test]
    fn test_ids_from_another_builder() {
        let mut builder = GrammarBuilder::new();
        let mut other = GrammarBuilder::new();
        let rule = builder.rule("r").unwrap();
        let a = builder.literal("a");
        // same index as `a`, but handed out by `other`
        let b = other.literal("b");
        let foreign = other.literal("c");
        assert_eq!(a.index(), foreign.index());
        assert_ne!(a, foreign);

        assert_eq!(
            builder.sequence([a, foreign]),
            Err(GrammarError::UnknownParser { id: 1 })
        );
        assert_eq!(
            builder.set_target(rule, b),
            Err(GrammarError::UnknownParser { id: 0 })
        );
        assert_eq!(
            other.bind(rule, [b]),
            Err(GrammarError::UnknownParser { id: 0 })
        );
        assert!(matches!(
            builder.build(foreign),
            Err(GrammarError::UnknownParser { id: 1 })
        ));
    }

    #[test]
    fn test_unresolved_rule_is_rejected() {
        let mut builder = GrammarBuilder::new();
        let a = builder.literal("a");
        let dangling = builder.rule("dangling").unwrap();
        let root = builder.sequence([a, dangling]).unwrap();
        assert_eq!(
            builder.build(root).err(),
            Some(GrammarError::UnresolvedRule {
                name: "dangling".to_string()
            })
        );
    }

    #[test]
    fn test_construction_errors_surface_early() {
        let mut builder = GrammarBuilder::new();
        assert!(matches!(
            builder.char_set("a-z-"),
            Err(GrammarError::MalformedCharSetSpec { .. })
        ));
        assert_eq!(
            builder.char_range('9', '0'),
            Err(GrammarError::MalformedRange { lo: '9', hi: '0' })
        );
    }
}
