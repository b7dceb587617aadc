//! Implicit-rule resolution over the suffix graph.
//!
//! Given a target with no explicit rule, the resolver walks the known
//! suffixes (the dependency list of `.SUFFIXES`) looking for a registered
//! transformation whose source either exists, is a declared target, or
//! (outside POSIX mode) can itself be produced by another suffix rule.

use crate::{
    MAX_CHAIN_DEPTH,
    archive::split_member,
    config::Config,
    error::EngineError,
    mtime::{MtimeOracle, Probe},
    names::{NameId, NameRegistry, SUFFIXES},
    rules::{Commands, Rule},
    suffix::{PATTERN_PLACEHOLDER, split_suffix, suffix},
};
use std::{collections::HashSet, rc::Rc};
use tracing::{debug, trace, warn};

#[cfg(feature = "pattern-rules")]
use crate::suffix::split_pattern;

///
/// Resolver
///
/// Implicit-rule resolution for one build run. Borrows the registry, the
/// mode flags, and the mtime oracle; owns the transient resolution state:
/// the set of names whose resolution is currently underway (the cycle
/// guard) and the chain depth counter.
///

pub struct Resolver<'a> {
    names: &'a mut NameRegistry,
    config: &'a Config,
    oracle: &'a dyn MtimeOracle,
    resolving: HashSet<NameId>,
    depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(
        names: &'a mut NameRegistry,
        config: &'a Config,
        oracle: &'a dyn MtimeOracle,
    ) -> Self {
        Self {
            names,
            config,
            oracle,
            resolving: HashSet::new(),
            depth: 0,
        }
    }

    /// Search the known suffix transformations for a way to produce
    /// `target`.
    ///
    /// Returns the implicit prerequisite on success. `Ok(None)` means no
    /// chain of rules applies, which is a normal outcome, not a failure. When
    /// `out_rule` is supplied it receives the synthesized dependency and
    /// the matched rule's command list on success, and is left untouched
    /// otherwise.
    pub fn resolve(
        &mut self,
        target: NameId,
        out_rule: Option<&mut Rule>,
    ) -> Result<Option<NameId>, EngineError> {
        if self.depth >= MAX_CHAIN_DEPTH {
            warn!(
                name = self.names.name(target),
                "inference chain depth exhausted"
            );
            return Ok(None);
        }
        self.resolving.insert(target);
        self.depth += 1;
        let found = self.search(target, out_rule);
        self.depth -= 1;
        self.resolving.remove(&target);
        found
    }

    fn search(
        &mut self,
        target: NameId,
        mut out_rule: Option<&mut Rule>,
    ) -> Result<Option<NameId>, EngineError> {
        let target_name = self.names.name(target).to_owned();
        let (outer, member) = split_member(&target_name);

        // The archive keeps the suffix; the member drives the stem.
        let target_suffix = suffix(outer).to_owned();
        let (stem, _) = split_suffix(member.unwrap_or(outer));
        let stem = stem.to_owned();

        let candidates = self.known_suffixes();

        let mut chain = false;
        loop {
            for &candidate in &candidates {
                let candidate_suffix = self.names.name(candidate).to_owned();
                let Some((prereq, commands)) =
                    self.try_candidate(&candidate_suffix, &target_suffix, &stem, chain)?
                else {
                    continue;
                };
                if let Some(rule) = out_rule.take() {
                    rule.deps = vec![prereq];
                    rule.commands = commands;
                }
                debug!(
                    from = self.names.name(prereq),
                    to = target_name.as_str(),
                    chained = chain,
                    "inferred implicit prerequisite"
                );
                return Ok(Some(prereq));
            }
            // Chained inference starts only after the direct pass has
            // exhausted every candidate, and never in strict POSIX mode.
            if chain || self.config.posix {
                return Ok(None);
            }
            chain = true;
        }
    }

    /// Test one known suffix against the target. Returns the prerequisite
    /// and the matched rule's command list when the candidate is
    /// acceptable.
    fn try_candidate(
        &mut self,
        candidate_suffix: &str,
        target_suffix: &str,
        stem: &str,
        chain: bool,
    ) -> Result<Option<(NameId, Rc<Commands>)>, EngineError> {
        let Some(rule_entity) = self
            .names
            .compose(&[candidate_suffix, target_suffix], false)
        else {
            return Ok(None);
        };
        let Some(matched) = self.names.rules(rule_entity).first() else {
            return Ok(None);
        };
        let commands = Rc::clone(&matched.commands);

        let Some(prereq) = self.prerequisite(stem, candidate_suffix)? else {
            return Ok(None);
        };
        if self.resolving.contains(&prereq) {
            trace!(
                name = self.names.name(prereq),
                "prerequisite already being resolved, skipping"
            );
            return Ok(None);
        }
        self.probe(prereq);

        let accepted = if chain {
            self.resolve(prereq, None)?.is_some()
        } else {
            self.names.probe_state(prereq).exists() || self.names.flags(prereq).target
        };
        Ok(accepted.then_some((prereq, commands)))
    }

    /// Materialize the implicit-prerequisite name for one candidate
    /// suffix: `stem ++ suffix`, or with a pattern suffix the stem
    /// substituted for the placeholder.
    fn prerequisite(
        &mut self,
        stem: &str,
        candidate_suffix: &str,
    ) -> Result<Option<NameId>, EngineError> {
        if !candidate_suffix.contains(PATTERN_PLACEHOLDER) {
            return Ok(self.names.compose(&[stem, candidate_suffix], true));
        }
        #[cfg(feature = "pattern-rules")]
        {
            let (prefix, tail) = split_pattern(candidate_suffix)?;
            trace!(prefix, stem, tail, "substituting stem into pattern suffix");
            Ok(self.names.compose(&[prefix, stem, tail], true))
        }
        #[cfg(not(feature = "pattern-rules"))]
        {
            trace!(
                pattern = candidate_suffix,
                "pattern suffix skipped, support disabled"
            );
            Ok(None)
        }
    }

    /// Known suffixes in declaration order: the dependency lists of every
    /// rule attached to `.SUFFIXES`.
    fn known_suffixes(&self) -> Vec<NameId> {
        self.names.find(SUFFIXES).map_or_else(Vec::new, |id| {
            self.names
                .rules(id)
                .iter()
                .flat_map(|rule| rule.deps.iter().copied())
                .collect()
        })
    }

    /// Probe-once-and-cache freshness check.
    fn probe(&mut self, id: NameId) {
        if self.names.probe_state(id).is_known() {
            return;
        }
        let state = self
            .oracle
            .probe(self.names.name(id))
            .map_or(Probe::Missing, Probe::Modified);
        self.names.set_probe_state(id, state);
    }
}
