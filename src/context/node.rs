//! Browsing context node: identity, documents, links and services.

use super::{ContextGroup, ContextId, NameResolver, Sandbox};
use crate::config::Settings;
use crate::document::{Document, History, Window};
use crate::service::{Configuration, ResolveAll, Service, ServiceRegistry};
use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// One execution context in a context tree.
///
/// Contexts are always handled through `Rc`. The tree never owns its nodes:
/// parents, named children and group members are weak links, and whoever
/// embeds or displays a context keeps it alive.
pub struct BrowsingContext {
    id: ContextId,
    security: Sandbox,
    is_frame: bool,
    parent: Option<Weak<BrowsingContext>>,
    creator: Option<Weak<dyn Document>>,
    active: RefCell<Option<Rc<dyn Document>>>,
    history: OnceCell<Option<Rc<dyn History>>>,
    named_children: RefCell<HashMap<String, Weak<BrowsingContext>>>,
    group: Rc<ContextGroup>,
    settings: Rc<Settings>,
    services: ServiceRegistry,
}

impl BrowsingContext {
    /// Create a root context seeded from `configuration`.
    pub fn new(configuration: Configuration, security: Sandbox) -> Rc<Self> {
        Self::create_root(configuration.into_services(), security)
    }

    /// Create a root context with explicit family settings.
    pub fn with_settings(
        configuration: Configuration,
        security: Sandbox,
        settings: Settings,
    ) -> Rc<Self> {
        Self::build(
            configuration.into_services(),
            security,
            None,
            false,
            ContextGroup::new(),
            Rc::new(settings),
        )
    }

    /// Create an unsandboxed root context whose only service is `instance`.
    pub fn new_from<T: ?Sized + 'static>(instance: Rc<T>) -> Rc<Self> {
        Self::new(Configuration::new().with_instance(instance), Sandbox::NONE)
    }

    /// Create a root context: no parent, no creator document, not a frame.
    pub fn create_root(services: Rc<[Service]>, security: Sandbox) -> Rc<Self> {
        Self::build(
            services,
            security,
            None,
            false,
            ContextGroup::new(),
            Rc::new(Settings::default()),
        )
    }

    fn build(
        services: Rc<[Service]>,
        security: Sandbox,
        parent: Option<&Rc<BrowsingContext>>,
        is_frame: bool,
        group: Rc<ContextGroup>,
        settings: Rc<Settings>,
    ) -> Rc<Self> {
        let creator = parent
            .and_then(|p| p.active_document())
            .map(|document| Rc::downgrade(&document));
        let context = Rc::new(Self {
            id: ContextId::next(),
            security,
            is_frame,
            parent: parent.map(Rc::downgrade),
            creator,
            active: RefCell::new(None),
            history: OnceCell::new(),
            named_children: RefCell::new(HashMap::new()),
            group,
            settings,
            services: ServiceRegistry::new(services),
        });

        let history = context.resolve::<dyn History>();
        context.history.get_or_init(|| history);

        debug!(
            context = %context.id,
            parent = ?parent.map(|p| p.id()),
            is_frame,
            sandbox = %security,
            services = context.services.len(),
            "Created browsing context"
        );
        context
    }

    /// Create a child seeded from this context's original services.
    ///
    /// The child snapshots the current active document as its creator and
    /// shares this context's family group without joining it.
    pub fn create_child(self: &Rc<Self>, security: Sandbox, is_frame: bool) -> Rc<Self> {
        Self::build(
            self.services.original(),
            security,
            Some(self),
            is_frame,
            Rc::clone(&self.group),
            Rc::clone(&self.settings),
        )
    }

    /// Create a child and make it reachable by `name`.
    ///
    /// A non-frame child is registered in the family group. A non-empty
    /// `name` is always recorded in this context's named-children table.
    pub fn create_named_child(
        self: &Rc<Self>,
        name: &str,
        security: Sandbox,
        is_frame: bool,
    ) -> Rc<Self> {
        let child = self.create_child(security, is_frame);

        if !is_frame {
            self.group.register(&child);
        }

        if !name.is_empty() {
            self.named_children
                .borrow_mut()
                .insert(name.to_string(), Rc::downgrade(&child));
        }

        debug!(
            context = %self.id,
            child = %child.id,
            name,
            is_frame,
            "Registered named child"
        );
        child
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn security(&self) -> Sandbox {
        self.security
    }

    pub fn is_frame(&self) -> bool {
        self.is_frame
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn group(&self) -> &Rc<ContextGroup> {
        &self.group
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    /// The creating context, if it is still alive.
    pub fn parent(&self) -> Option<Rc<Self>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Iterator over live ancestors, nearest first.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: self.parent(),
        }
    }

    /// The top-most live ancestor, or this context when it has none.
    pub fn top(self: &Rc<Self>) -> Rc<Self> {
        self.ancestors().last().unwrap_or_else(|| Rc::clone(self))
    }

    /// The parent's active document at creation time, if it still exists.
    pub fn creator_document(&self) -> Option<Rc<dyn Document>> {
        self.creator.as_ref().and_then(Weak::upgrade)
    }

    pub fn active_document(&self) -> Option<Rc<dyn Document>> {
        self.active.borrow().clone()
    }

    /// Replace the active document. The previous document is released.
    pub fn navigate(&self, document: Rc<dyn Document>) {
        let previous = self.active.replace(Some(document));
        trace!(
            context = %self.id,
            replaced = previous.is_some(),
            "Active document replaced"
        );
    }

    /// The window of the active document.
    pub fn current_window(&self) -> Option<Rc<dyn Window>> {
        self.active_document()?.default_view()
    }

    /// Session history resolved when the context was created.
    pub fn history(&self) -> Option<Rc<dyn History>> {
        self.history.get().cloned().flatten()
    }

    /// First service providing `T`.
    pub fn resolve<T: ?Sized + 'static>(self: &Rc<Self>) -> Option<Rc<T>> {
        self.services.resolve(self)
    }

    /// Every service providing `T`, lazily and in registration order.
    pub fn resolve_all<T: ?Sized + 'static>(self: &Rc<Self>) -> ResolveAll<'_, T> {
        self.services.resolve_all(self)
    }

    /// Live child registered under `name` in this context's own table.
    ///
    /// An entry whose child is gone is removed and reported as absent.
    pub fn named_child(&self, name: &str) -> Option<Rc<Self>> {
        let mut named = self.named_children.borrow_mut();
        let child = named.get(name)?.upgrade();
        if child.is_none() {
            trace!(context = %self.id, name, "Pruned dead named child");
            named.remove(name);
        }
        child
    }

    /// Names of live entries in the named-children table, sorted.
    pub fn child_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .named_children
            .borrow()
            .iter()
            .filter(|(_, child)| child.strong_count() > 0)
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Find a context by name, starting here and widening to ancestors and
    /// then to the family group.
    pub fn find_child(self: &Rc<Self>, name: &str) -> Option<Rc<Self>> {
        NameResolver::new()
            .group_fallback(self.settings.group_fallback)
            .find(self, name)
    }

    /// Dispose the active document and clear the slot.
    ///
    /// Children are not disposed and tables referencing this context are
    /// left as they are.
    pub fn dispose(&self) {
        let document = self.active.borrow_mut().take();
        if let Some(document) = document {
            debug!(context = %self.id, "Disposing active document");
            document.dispose();
        }
    }
}

impl Drop for BrowsingContext {
    fn drop(&mut self) {
        if let Some(document) = self.active.get_mut().take() {
            document.dispose();
        }
    }
}

impl fmt::Debug for BrowsingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowsingContext")
            .field("id", &self.id)
            .field("security", &self.security)
            .field("is_frame", &self.is_frame)
            .field("parent", &self.parent().map(|p| p.id()))
            .field("named_children", &self.child_names())
            .field("services", &self.services)
            .finish()
    }
}

/// Iterator returned by [`BrowsingContext::ancestors`].
pub struct Ancestors {
    next: Option<Rc<BrowsingContext>>,
}

impl Iterator for Ancestors {
    type Item = Rc<BrowsingContext>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}
