//! Services injected into browsing contexts.
//!
//! A service is registered under exactly one capability type `T` (a concrete
//! type or a trait object such as `dyn History`). It is either a ready
//! instance or a factory that builds the instance for the context that first
//! asks for it.

use crate::context::BrowsingContext;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::rc::Rc;

pub mod registry;

pub use registry::{ResolveAll, ServiceRegistry};

type CreateFn = dyn Fn(&Rc<BrowsingContext>) -> Rc<dyn Any>;

/// Resolved service value. Holds an `Rc<T>` behind `dyn Any`.
#[derive(Clone)]
pub struct ServiceInstance {
    type_name: &'static str,
    value: Rc<dyn Any>,
}

impl ServiceInstance {
    pub fn new<T: ?Sized + 'static>(value: Rc<T>) -> Self {
        Self {
            type_name: type_name::<T>(),
            value: Rc::new(value),
        }
    }

    fn from_erased(type_name: &'static str, value: Rc<dyn Any>) -> Self {
        Self { type_name, value }
    }

    pub fn satisfies<T: ?Sized + 'static>(&self) -> bool {
        self.value.is::<Rc<T>>()
    }

    pub fn downcast<T: ?Sized + 'static>(&self) -> Option<Rc<T>> {
        self.value.downcast_ref::<Rc<T>>().cloned()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// Deferred service constructor bound to its declared output type.
#[derive(Clone)]
pub struct ServiceFactory {
    output: TypeId,
    type_name: &'static str,
    create: Rc<CreateFn>,
}

impl ServiceFactory {
    pub fn new<T, F>(create: F) -> Self
    where
        T: ?Sized + 'static,
        F: Fn(&Rc<BrowsingContext>) -> Rc<T> + 'static,
    {
        Self {
            output: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            create: Rc::new(move |context: &Rc<BrowsingContext>| {
                Rc::new(create(context)) as Rc<dyn Any>
            }),
        }
    }

    pub fn produces<T: ?Sized + 'static>(&self) -> bool {
        self.output == TypeId::of::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn invoke(&self, owner: &Rc<BrowsingContext>) -> ServiceInstance {
        ServiceInstance::from_erased(self.type_name, (self.create)(owner))
    }
}

/// One entry of a service list.
#[derive(Clone)]
pub enum Service {
    Instance(ServiceInstance),
    Factory(ServiceFactory),
}

impl Service {
    pub fn instance<T: ?Sized + 'static>(value: Rc<T>) -> Self {
        Service::Instance(ServiceInstance::new(value))
    }

    pub fn factory<T, F>(create: F) -> Self
    where
        T: ?Sized + 'static,
        F: Fn(&Rc<BrowsingContext>) -> Rc<T> + 'static,
    {
        Service::Factory(ServiceFactory::new(create))
    }

    /// Whether this entry can provide capability `T`.
    pub fn provides<T: ?Sized + 'static>(&self) -> bool {
        match self {
            Service::Instance(instance) => instance.satisfies::<T>(),
            Service::Factory(factory) => factory.produces::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Service::Instance(instance) => instance.type_name(),
            Service::Factory(factory) => factory.type_name(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Service::Instance(_))
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Instance(instance) => write!(f, "Instance({})", instance.type_name()),
            Service::Factory(factory) => write!(f, "Factory({})", factory.type_name()),
        }
    }
}

/// Ordered service list used to seed root contexts.
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    services: Vec<Service>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a service. Earlier entries win when several provide the same
    /// capability.
    pub fn with(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    pub fn with_instance<T: ?Sized + 'static>(self, value: Rc<T>) -> Self {
        self.with(Service::instance(value))
    }

    pub fn with_factory<T, F>(self, create: F) -> Self
    where
        T: ?Sized + 'static,
        F: Fn(&Rc<BrowsingContext>) -> Rc<T> + 'static,
    {
        self.with(Service::factory(create))
    }

    /// Drops every entry providing capability `T`.
    pub fn without<T: ?Sized + 'static>(mut self) -> Self {
        self.services.retain(|service| !service.provides::<T>());
        self
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn into_services(self) -> Rc<[Service]> {
        self.services.into()
    }
}
