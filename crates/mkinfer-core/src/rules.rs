use crate::names::NameId;
use derive_more::{Deref, DerefMut};
use std::rc::Rc;

///
/// Commands
///
/// Ordered command lines for one rule. When a matched suffix rule is
/// reused, the list is shared via `Rc`, never deep-copied.
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Eq, PartialEq)]
pub struct Commands(Vec<String>);

impl Commands {
    #[must_use]
    pub const fn new(lines: Vec<String>) -> Self {
        Self(lines)
    }
}

///
/// Rule
///
/// One rule owned by its target entity: an ordered dependency list plus the
/// command list. Dependency order is the order of discovery.
///

#[derive(Clone, Debug, Default)]
pub struct Rule {
    pub deps: Vec<NameId>,
    pub commands: Rc<Commands>,
}

impl Rule {
    #[must_use]
    pub const fn new(deps: Vec<NameId>, commands: Rc<Commands>) -> Self {
        Self { deps, commands }
    }
}
