//! Family-wide group of top-level auxiliary contexts.

use super::BrowsingContext;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Weakly referenced auxiliary contexts of one top-level family.
///
/// A root creates the group; every context created beneath it holds the same
/// group. Dead members are pruned when the group is read.
#[derive(Default)]
pub struct ContextGroup {
    members: RefCell<Vec<Weak<BrowsingContext>>>,
}

impl ContextGroup {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn register(&self, context: &Rc<BrowsingContext>) {
        self.members.borrow_mut().push(Rc::downgrade(context));
    }

    /// Live members in registration order.
    pub fn members(&self) -> Vec<Rc<BrowsingContext>> {
        let mut members = self.members.borrow_mut();
        let mut live = Vec::with_capacity(members.len());
        members.retain(|member| match member.upgrade() {
            Some(context) => {
                live.push(context);
                true
            }
            None => false,
        });
        live
    }

    pub fn len(&self) -> usize {
        self.members().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, context: &BrowsingContext) -> bool {
        self.members()
            .iter()
            .any(|member| member.id() == context.id())
    }
}

impl fmt::Debug for ContextGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<_> = self.members().iter().map(|m| m.id()).collect();
        f.debug_struct("ContextGroup").field("members", &ids).finish()
    }
}
