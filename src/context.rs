//! Browsing contexts
//!
//! A tree of execution contexts, each hosting at most one active document.
//! Parents are referenced weakly, named children are referenced weakly, and
//! every top-level family shares one group of weakly referenced auxiliary
//! contexts. Lookups treat a dead reference as an absent entry.

pub mod group;
pub mod id;
pub mod node;
pub mod resolver;
pub mod sandbox;
pub mod target;

pub use group::ContextGroup;
pub use id::ContextId;
pub use node::{Ancestors, BrowsingContext};
pub use resolver::{ActiveDocumentChildren, ChildContextSource, NameResolver};
pub use sandbox::{Sandbox, SandboxFlag};
pub use target::Target;
