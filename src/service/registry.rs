//! Per-context service registry with memoizing slots.

use super::{Service, ServiceInstance};
use crate::context::BrowsingContext;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;
use tracing::debug;

/// Ordered service slots owned by one context.
///
/// `original` is the pristine list the context was seeded with and is shared
/// with every context seeded from it. `slots` is this context's working copy;
/// a factory slot becomes an instance slot the first time it is resolved.
pub struct ServiceRegistry {
    original: Rc<[Service]>,
    slots: RefCell<Vec<Service>>,
}

impl ServiceRegistry {
    pub fn new(original: Rc<[Service]>) -> Self {
        let slots = RefCell::new(original.to_vec());
        Self { original, slots }
    }

    /// The immutable origin set, used to seed child contexts.
    pub fn original(&self) -> Rc<[Service]> {
        Rc::clone(&self.original)
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether slot `index` currently holds an instance. `None` when out of range.
    pub fn is_resolved(&self, index: usize) -> Option<bool> {
        self.slots.borrow().get(index).map(Service::is_resolved)
    }

    /// First service providing `T`, in registration order.
    pub fn resolve<T: ?Sized + 'static>(&self, owner: &Rc<BrowsingContext>) -> Option<Rc<T>> {
        self.resolve_all(owner).next()
    }

    /// Every service providing `T`, in registration order.
    ///
    /// The sequence is lazy: factories run only as the iterator reaches their
    /// slot. Call again to restart.
    pub fn resolve_all<'a, T: ?Sized + 'static>(
        &'a self,
        owner: &'a Rc<BrowsingContext>,
    ) -> ResolveAll<'a, T> {
        ResolveAll {
            registry: self,
            owner,
            next: 0,
            _capability: PhantomData,
        }
    }

    /// Resolves slot `index` for capability `T`, memoizing a factory result.
    fn resolve_slot<T: ?Sized + 'static>(
        &self,
        index: usize,
        owner: &Rc<BrowsingContext>,
    ) -> Option<Rc<T>> {
        // The borrow ends before the factory runs so that factories may
        // resolve other services of the same context.
        let factory = match self.slots.borrow().get(index)? {
            Service::Instance(instance) => return instance.downcast::<T>(),
            Service::Factory(factory) if factory.produces::<T>() => factory.clone(),
            Service::Factory(_) => return None,
        };

        debug!(
            context = %owner.id(),
            slot = index,
            service = factory.type_name(),
            "Invoking service factory"
        );
        let produced = factory.invoke(owner);

        let mut slots = self.slots.borrow_mut();
        match &slots[index] {
            // A re-entrant resolution already filled this slot; keep its value.
            Service::Instance(existing) => existing.downcast::<T>(),
            Service::Factory(_) => {
                let value = produced.downcast::<T>();
                slots[index] = Service::Instance(produced);
                value
            }
        }
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.slots.borrow().iter()).finish()
    }
}

/// Lazy sequence returned by [`ServiceRegistry::resolve_all`].
pub struct ResolveAll<'a, T: ?Sized> {
    registry: &'a ServiceRegistry,
    owner: &'a Rc<BrowsingContext>,
    next: usize,
    _capability: PhantomData<fn() -> Rc<T>>,
}

impl<T: ?Sized + 'static> Iterator for ResolveAll<'_, T> {
    type Item = Rc<T>;

    fn next(&mut self) -> Option<Rc<T>> {
        let len = self.registry.len();
        while self.next < len {
            let index = self.next;
            self.next += 1;
            if let Some(value) = self.registry.resolve_slot::<T>(index, self.owner) {
                return Some(value);
            }
        }
        None
    }
}
