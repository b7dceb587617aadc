//! Shared helpers for unit tests.

use crate::{
    mtime::{MtimeOracle, Timestamp},
    names::{NameId, NameRegistry},
    rules::{Commands, Rule},
};
use std::{
    collections::BTreeSet,
    rc::Rc,
    time::{Duration, SystemTime},
};

///
/// StaticOracle
///
/// Fake mtime oracle backed by a fixed set of present file names.
///

pub(crate) struct StaticOracle {
    present: BTreeSet<String>,
}

impl StaticOracle {
    pub(crate) fn empty() -> Self {
        Self {
            present: BTreeSet::new(),
        }
    }

    pub(crate) fn with<I, S>(present: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            present: present.into_iter().map(Into::into).collect(),
        }
    }
}

impl MtimeOracle for StaticOracle {
    fn probe(&self, name: &str) -> Option<Timestamp> {
        self.present
            .contains(name)
            .then(|| Timestamp::new(SystemTime::UNIX_EPOCH + Duration::from_secs(1)))
    }
}

/// Register `target` with one rule made of `deps` and `commands`.
pub(crate) fn register_rule(
    names: &mut NameRegistry,
    target: &str,
    deps: &[&str],
    commands: &[&str],
) -> NameId {
    let dep_ids = deps.iter().map(|dep| names.intern(dep)).collect();
    let lines = commands.iter().map(|line| (*line).to_owned()).collect();
    let id = names.intern(target);
    names.push_rule(id, Rule::new(dep_ids, Rc::new(Commands::new(lines))));
    id
}
