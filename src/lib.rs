//! bctx: Browsing Context Trees
//!
//! In-memory trees of browsing contexts. Each context hosts an active
//! document, resolves services from an ordered list of lazily-built slots, and
//! can find other contexts of its family by name.
//!
//! ```
//! use bctx::{BrowsingContext, Configuration, Sandbox};
//! use std::rc::Rc;
//!
//! let root = BrowsingContext::new(
//!     Configuration::new().with_instance(Rc::new("en-US".to_string())),
//!     Sandbox::NONE,
//! );
//! let popup = root.create_named_child("popup", Sandbox::NONE, false);
//! let frame = root.create_child(Sandbox::NONE, true);
//!
//! assert_eq!(root.resolve::<String>().unwrap().as_str(), "en-US");
//! assert!(Rc::ptr_eq(&frame.find_child("popup").unwrap(), &popup));
//! ```

pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod logging;
pub mod service;

pub use config::{BctxConfig, ConfigLoader, Settings};
pub use context::{BrowsingContext, ContextGroup, ContextId, NameResolver, Sandbox, SandboxFlag};
pub use document::{BlankDocument, Document, History, Window};
pub use error::ContextError;
pub use logging::{init_logging, LoggingConfig};
pub use service::{Configuration, Service};
