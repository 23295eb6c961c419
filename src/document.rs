//! Collaborator interfaces consumed by browsing contexts.
//!
//! Documents, windows and session history are built elsewhere; a context only
//! needs the narrow surface declared here. `BlankDocument` is the minimal
//! `about:blank` document used for fresh contexts and in tests.

use crate::context::BrowsingContext;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// A document hosted as the active document of a context.
pub trait Document {
    /// The window presenting this document, if any.
    fn default_view(&self) -> Option<Rc<dyn Window>>;

    /// Releases resources held by the document. Called by the owning context
    /// when it is disposed or dropped.
    fn dispose(&self);

    /// Child contexts embedded in this document's content, in document order.
    fn attached_child_contexts(&self) -> Vec<Rc<BrowsingContext>>;
}

/// The view of a document.
pub trait Window {
    /// The context displaying this window, if it is still alive.
    fn browsing_context(&self) -> Option<Rc<BrowsingContext>>;
}

/// Session history service.
pub trait History {
    /// Number of entries in the joint session history.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Window bound to a context through a weak link.
#[derive(Debug)]
pub struct ContextWindow {
    context: Weak<BrowsingContext>,
}

impl ContextWindow {
    pub fn new(context: &Rc<BrowsingContext>) -> Self {
        Self {
            context: Rc::downgrade(context),
        }
    }
}

impl Window for ContextWindow {
    fn browsing_context(&self) -> Option<Rc<BrowsingContext>> {
        self.context.upgrade()
    }
}

/// Empty document that can embed frame contexts.
///
/// Embedded contexts are held strongly, the way a frame element keeps its
/// nested context alive; disposing the document releases them.
#[derive(Default)]
pub struct BlankDocument {
    view: Option<Rc<dyn Window>>,
    frames: RefCell<Vec<Rc<BrowsingContext>>>,
    disposed: Cell<bool>,
}

impl BlankDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document whose default view is a window onto `context`.
    pub fn for_context(context: &Rc<BrowsingContext>) -> Self {
        Self {
            view: Some(Rc::new(ContextWindow::new(context))),
            ..Self::default()
        }
    }

    /// Embeds a frame context at the end of the document.
    pub fn attach(&self, frame: Rc<BrowsingContext>) {
        self.frames.borrow_mut().push(frame);
    }

    /// Removes an embedded frame, releasing the document's hold on it.
    pub fn detach(&self, frame: &BrowsingContext) -> Option<Rc<BrowsingContext>> {
        let mut frames = self.frames.borrow_mut();
        let index = frames.iter().position(|f| f.id() == frame.id())?;
        Some(frames.remove(index))
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

impl Document for BlankDocument {
    fn default_view(&self) -> Option<Rc<dyn Window>> {
        self.view.clone()
    }

    fn dispose(&self) {
        self.disposed.set(true);
        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        drop(frames);
    }

    fn attached_child_contexts(&self) -> Vec<Rc<BrowsingContext>> {
        self.frames.borrow().clone()
    }
}
