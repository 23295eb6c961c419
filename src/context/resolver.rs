//! Name resolution across a context tree.
//!
//! Lookup runs in two phases. Phase 1 walks from the starting context up
//! through its ancestors; at each step it checks the named-children table and
//! then descends into the contexts embedded in the active document, skipping
//! the branch it just came up from. Phase 2 runs only when phase 1 reaches
//! past the root, and scans every live member of the family group.

use super::BrowsingContext;
use std::rc::Rc;
use tracing::{instrument, trace};

/// Enumerates the contexts embedded in a context's content.
pub trait ChildContextSource {
    fn child_contexts(&self, context: &BrowsingContext) -> Vec<Rc<BrowsingContext>>;
}

/// Reads children from the context's active document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveDocumentChildren;

impl ChildContextSource for ActiveDocumentChildren {
    fn child_contexts(&self, context: &BrowsingContext) -> Vec<Rc<BrowsingContext>> {
        context
            .active_document()
            .map(|document| document.attached_child_contexts())
            .unwrap_or_default()
    }
}

impl<F> ChildContextSource for F
where
    F: Fn(&BrowsingContext) -> Vec<Rc<BrowsingContext>>,
{
    fn child_contexts(&self, context: &BrowsingContext) -> Vec<Rc<BrowsingContext>> {
        self(context)
    }
}

/// Finds contexts by name.
#[derive(Debug, Clone)]
pub struct NameResolver<S = ActiveDocumentChildren> {
    source: S,
    group_fallback: bool,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::with_source(ActiveDocumentChildren)
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ChildContextSource> NameResolver<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            group_fallback: true,
        }
    }

    /// Enable or disable the family group scan (phase 2).
    pub fn group_fallback(mut self, enabled: bool) -> Self {
        self.group_fallback = enabled;
        self
    }

    /// Resolve `name` starting from `start`.
    #[instrument(level = "trace", skip(self, start), fields(from = %start.id()))]
    pub fn find(&self, start: &Rc<BrowsingContext>, name: &str) -> Option<Rc<BrowsingContext>> {
        let mut current = Some(Rc::clone(start));
        let mut excluded: Option<Rc<BrowsingContext>> = None;

        while let Some(context) = current {
            if let Some(found) = self.find_recursive(&context, name, excluded.as_deref()) {
                trace!(found = %found.id(), at = %context.id(), "Resolved through ancestry");
                return Some(found);
            }
            current = context.parent();
            excluded = Some(context);
        }

        if !self.group_fallback {
            return None;
        }

        // The loop ran at least once, so the last visited ancestor exists.
        let last = excluded?;
        let members = last.group().members();
        trace!(members = members.len(), "Scanning family group");
        members
            .iter()
            .find_map(|member| self.find_recursive(member, name, None))
    }

    /// Search `context` and the contexts embedded beneath it, skipping the
    /// embedded child equal to `excluded`.
    pub fn find_recursive(
        &self,
        context: &Rc<BrowsingContext>,
        name: &str,
        excluded: Option<&BrowsingContext>,
    ) -> Option<Rc<BrowsingContext>> {
        if !name.is_empty() {
            if let Some(child) = context.named_child(name) {
                return Some(child);
            }
        }

        self.source
            .child_contexts(context)
            .iter()
            .filter(|child| excluded.map_or(true, |skip| skip.id() != child.id()))
            .find_map(|child| self.find_recursive(child, name, None))
    }
}
