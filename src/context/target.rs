//! Navigation target selection.

use super::{BrowsingContext, Sandbox, SandboxFlag};
use crate::document::BlankDocument;
use crate::error::ContextError;
use std::rc::Rc;
use tracing::{debug, warn};

/// A parsed navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// `""` or `_self`
    Current,
    /// `_parent`
    Parent,
    /// `_top`
    Top,
    /// `_blank`
    Blank,
    Named(&'a str),
}

impl<'a> Target<'a> {
    /// Keywords match ASCII case-insensitively; anything else is a name.
    pub fn parse(target: &'a str) -> Self {
        if target.is_empty() || target.eq_ignore_ascii_case("_self") {
            Target::Current
        } else if target.eq_ignore_ascii_case("_parent") {
            Target::Parent
        } else if target.eq_ignore_ascii_case("_top") {
            Target::Top
        } else if target.eq_ignore_ascii_case("_blank") {
            Target::Blank
        } else {
            Target::Named(target)
        }
    }
}

impl BrowsingContext {
    /// Choose the context a navigation towards `target` should use.
    ///
    /// Unknown names and `_blank` create a new auxiliary context under this
    /// one, which fails when this context's sandbox restricts auxiliary
    /// navigation. The caller owns the returned context.
    pub fn choose_target(self: &Rc<Self>, target: &str) -> Result<Rc<Self>, ContextError> {
        match Target::parse(target) {
            Target::Current => Ok(Rc::clone(self)),
            Target::Parent => Ok(self.parent().unwrap_or_else(|| Rc::clone(self))),
            Target::Top => Ok(self.top()),
            Target::Blank => self.open_auxiliary(target, ""),
            Target::Named(name) => match self.find_child(name) {
                Some(found) => Ok(found),
                None => self.open_auxiliary(target, name),
            },
        }
    }

    fn open_auxiliary(
        self: &Rc<Self>,
        target: &str,
        name: &str,
    ) -> Result<Rc<Self>, ContextError> {
        if self.security().contains(SandboxFlag::AuxiliaryNavigation) {
            warn!(
                context = %self.id(),
                target,
                "Auxiliary context creation blocked by sandbox"
            );
            return Err(ContextError::NavigationBlocked {
                context: self.id(),
                target: target.to_string(),
                flag: SandboxFlag::AuxiliaryNavigation,
            });
        }

        let child = self.create_named_child(name, self.auxiliary_sandbox(), false);
        child.navigate(Rc::new(BlankDocument::for_context(&child)));
        debug!(context = %self.id(), child = %child.id(), target, "Opened auxiliary context");
        Ok(child)
    }

    /// Sandbox for an auxiliary context opened from here. Restrictions carry
    /// over unless popups may escape the sandbox.
    fn auxiliary_sandbox(&self) -> Sandbox {
        let defaults = self.settings().default_sandbox;
        if self.security().contains(SandboxFlag::PopupsEscape) {
            defaults | self.security()
        } else {
            defaults
        }
    }
}
