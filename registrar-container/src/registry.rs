//! # The Registry
//!
//! Maps service names to factories and, for singletons, to the one
//! instance each factory produced.
//!
//! ```text
//! bind(KEY, f)       ──> factories[KEY] = f
//! singleton(KEY, f)  ──> factories[KEY] = memoize(f)
//! resolve(KEY)       ──> factories[KEY](&registry)
//!                              │ singleton only
//!                              ▼
//!                          cache[KEY]
//! ```
//!
//! # Examples
//! ```rust
//! use registrar_container::prelude::*;
//! use std::sync::Arc;
//!
//! trait Log: Send + Sync {
//!     fn info(&self, msg: &str);
//! }
//!
//! struct ConsoleLog;
//! impl Log for ConsoleLog {
//!     fn info(&self, msg: &str) { println!("{msg}"); }
//! }
//!
//! struct UserService {
//!     log: Arc<dyn Log>,
//! }
//!
//! const LOGGER: ServiceKey<Arc<dyn Log>> = ServiceKey::new("logger");
//! const USERS: ServiceKey<UserService> = ServiceKey::new("users");
//!
//! let mut registry = Registry::new();
//! registry
//!     .singleton(LOGGER, |_| Ok(Arc::new(ConsoleLog) as Arc<dyn Log>))?
//!     .bind(USERS, |r| Ok(UserService { log: r.resolve(LOGGER)? }));
//!
//! let users = registry.resolve(USERS)?;
//! users.log.info("ready");
//! # Ok::<(), RegistryError>(())
//! ```

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use registrar_support::id::{IdGenerator, TimeOrderedIds};
use registrar_support::rendering::suggest_similar;
use tracing::{debug, error, info, instrument, trace};

use crate::error::{AlreadyInstantiatedError, RegistryError, Result, UnboundError};
use crate::key::{ServiceId, ServiceKey};
use crate::lifetime::{Lifetime, ServiceState};
use crate::provider::Provider;

/// A type-erased service instance.
pub type Instance = Box<dyn Any + Send + Sync>;

/// Type-erased factory as stored in the registry.
///
/// Factories receive the registry itself so they can resolve their own
/// dependencies.
pub type FactoryFn = Arc<dyn Fn(&Registry) -> Result<Instance> + Send + Sync>;

/// Binding entry for a single service name.
struct Registration {
    service: ServiceId,
    factory: FactoryFn,
    lifetime: Lifetime,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("service", &self.service)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

// ═══════════════════════════════════════════
// RegistryBuilder
// ═══════════════════════════════════════════

/// Configures a [`Registry`] before creating it.
///
/// # Examples
/// ```rust
/// use registrar_container::prelude::*;
///
/// let registry = Registry::builder()
///     .id_generator(|| String::from("test-registry"))
///     .build()?;
///
/// assert_eq!(registry.instance_id(), "test-registry");
/// # Ok::<(), RegistryError>(())
/// ```
pub struct RegistryBuilder {
    id_generator: Box<dyn IdGenerator>,
    providers: Vec<Box<dyn Provider>>,
}

impl RegistryBuilder {
    fn new() -> Self {
        Self {
            id_generator: Box::new(TimeOrderedIds),
            providers: Vec::new(),
        }
    }

    /// Replace the source of the registry identifier.
    pub fn id_generator(mut self, generator: impl IdGenerator + 'static) -> Self {
        self.id_generator = Box::new(generator);
        self
    }

    /// Queue a [`Provider`] to be applied when the registry is built.
    ///
    /// Providers are applied in the order they were added.
    pub fn provider(mut self, provider: impl Provider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Create the registry and apply queued providers.
    pub fn build(self) -> Result<Registry> {
        let mut registry = Registry::with_id(self.id_generator.generate());

        for provider in &self.providers {
            registry.add_provider(provider.as_ref())?;
        }

        info!(
            id = %registry.instance_id,
            bound = registry.len(),
            "Registry created"
        );
        Ok(registry)
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("providers", &self.providers.len())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════

/// Typed service registry.
///
/// Mutating operations take `&mut self`; [`resolve`](Registry::resolve)
/// takes `&self` and is safe to call from several threads. Concurrent
/// first resolutions of one singleton may each run the factory, but only
/// the first stored value is kept and returned to every caller.
pub struct Registry {
    factories: HashMap<ServiceId, Registration>,
    cache: RwLock<HashMap<ServiceId, Instance>>,
    instance_id: String,
}

impl Registry {
    /// Creates an empty registry with a fresh time-ordered identifier.
    pub fn new() -> Self {
        Self::with_id(TimeOrderedIds.generate())
    }

    /// Create a new builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    fn with_id(instance_id: String) -> Self {
        Self {
            factories: HashMap::new(),
            cache: RwLock::new(HashMap::new()),
            instance_id,
        }
    }

    /// The identifier assigned at construction. Never changes.
    #[inline]
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    // ── Binding ──

    /// Bind a transient factory to `key`.
    ///
    /// The factory runs on every [`resolve`](Registry::resolve). Rebinding
    /// replaces the previous factory; an already cached singleton instance
    /// under the same name is left in place.
    pub fn bind<T, F>(&mut self, key: ServiceKey<T>, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Registry) -> Result<T> + Send + Sync + 'static,
    {
        self.register(
            key.id(),
            Lifetime::Transient,
            Arc::new(move |registry: &Registry| -> Result<Instance> {
                Ok(Box::new(factory(registry)?) as Instance)
            }),
        )
    }

    /// Bind a singleton factory to `key`.
    ///
    /// The factory runs on the first successful resolve; its result is
    /// cached and cloned out on every later resolve (use `Arc<T>` to share
    /// one allocation). If the factory fails, the failure is logged and
    /// returned as [`RegistryError::InstantiationFailed`], and the next
    /// resolve tries again.
    ///
    /// The factory runs at most once only while resolution is serialized.
    /// Threads racing on the first resolve may each run it; one value is
    /// kept. Wrap the registry in a lock if construction must happen once.
    ///
    /// # Errors
    /// Returns [`RegistryError::AlreadyInstantiated`] if an instance for
    /// this name is already cached. Rebinding before the first resolve is
    /// allowed.
    pub fn singleton<T, F>(&mut self, key: ServiceKey<T>, factory: F) -> Result<&mut Self>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&Registry) -> Result<T> + Send + Sync + 'static,
    {
        let service = key.id();

        if self.cache.get_mut().contains_key(&service) {
            return Err(RegistryError::AlreadyInstantiated(
                AlreadyInstantiatedError { service },
            ));
        }

        let memoized = move |registry: &Registry| -> Result<Instance> {
            if let Some(value) = registry.cached::<T>(&service)? {
                trace!(service = %service, "Singleton cache hit");
                return Ok(Box::new(value) as Instance);
            }

            let value = factory(registry).map_err(|source| {
                error!(
                    service = %service,
                    cause = %source,
                    "Error during singleton instantiation"
                );
                RegistryError::InstantiationFailed {
                    service,
                    source: Box::new(source),
                }
            })?;

            Ok(Box::new(registry.store(service, value)?) as Instance)
        };

        Ok(self.register(service, Lifetime::Singleton, Arc::new(memoized)))
    }

    /// Apply a [`Provider`] module.
    #[instrument(skip_all, fields(provider = provider.name()))]
    pub fn add_provider(&mut self, provider: &dyn Provider) -> Result<&mut Self> {
        let before = self.len();
        provider.register(self)?;
        debug!(bound = self.len(), added = self.len().saturating_sub(before), "Provider applied");
        Ok(self)
    }

    // ── Resolution ──

    /// Resolve the service bound to `key`.
    ///
    /// ```rust,ignore
    /// let db: Arc<Database> = registry.resolve(DATABASE)?;
    /// ```
    ///
    /// # Errors
    /// - [`RegistryError::Unbound`] if nothing is bound under the name
    /// - [`RegistryError::TypeMismatch`] if the name is bound with another type
    /// - whatever the factory returns; singleton failures arrive wrapped in
    ///   [`RegistryError::InstantiationFailed`]
    pub fn resolve<T: Send + Sync + 'static>(&self, key: ServiceKey<T>) -> Result<T> {
        let requested = key.id();
        trace!(service = %requested, "Resolving");

        let registration = self.registration(&requested)?;
        if registration.service.type_id() != requested.type_id() {
            return Err(mismatch::<T>(registration.service));
        }

        let instance = (registration.factory)(self)?;
        instance
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| mismatch::<T>(registration.service))
    }

    // ── Reset ──

    /// Remove every binding and every cached instance.
    ///
    /// The registry keeps its [`instance_id`](Registry::instance_id);
    /// services must be bound again before they can be resolved.
    #[allow(clippy::should_implement_trait)]
    pub fn drop(&mut self) {
        let cache = self.cache.get_mut();
        debug!(
            id = %self.instance_id,
            bound = self.factories.len(),
            cached = cache.len(),
            "Dropping all bindings"
        );
        cache.clear();
        self.factories.clear();
    }

    // ── Queries ──

    /// Returns `true` if a factory is bound under the key's name.
    pub fn contains<T: 'static>(&self, key: ServiceKey<T>) -> bool {
        self.state(key).is_bound()
    }

    /// Returns `true` if an instance is cached under the key's name.
    ///
    /// The cache outlives a later [`bind`](Registry::bind) over an
    /// instantiated singleton, so this can be `true` for a name that is
    /// now transient. Only [`drop`](Registry::drop) clears it.
    pub fn is_instantiated<T: 'static>(&self, key: ServiceKey<T>) -> bool {
        self.cache.read().contains_key(&key.id())
    }

    /// Returns the lifetime of the binding under the key's name.
    pub fn lifetime<T: 'static>(&self, key: ServiceKey<T>) -> Option<Lifetime> {
        self.factories.get(&key.id()).map(|reg| reg.lifetime)
    }

    /// Returns where the key's name stands in its binding lifecycle.
    ///
    /// Reports the current binding only: a name rebound with
    /// [`bind`](Registry::bind) after its singleton was built is
    /// `Transient`, even though [`is_instantiated`](Registry::is_instantiated)
    /// still sees the old instance.
    pub fn state<T: 'static>(&self, key: ServiceKey<T>) -> ServiceState {
        match self.lifetime(key) {
            None => ServiceState::Unbound,
            Some(lifetime) if lifetime.is_cached() => ServiceState::Singleton {
                instantiated: self.is_instantiated(key),
            },
            Some(_) => ServiceState::Transient,
        }
    }

    /// Returns the number of bound services.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Returns the bound service names, sorted.
    pub fn service_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().map(ServiceId::name).collect();
        names.sort_unstable();
        names
    }

    // ── Internal ──

    fn register(&mut self, service: ServiceId, lifetime: Lifetime, factory: FactoryFn) -> &mut Self {
        let replaced = self
            .factories
            .insert(service, Registration { service, factory, lifetime })
            .is_some();

        debug!(service = %service, lifetime = %lifetime, replaced, "Bound service");
        self
    }

    fn registration(&self, service: &ServiceId) -> Result<&Registration> {
        self.factories.get(service).ok_or_else(|| {
            let names = self.service_names();
            RegistryError::Unbound(UnboundError {
                service: *service,
                suggestions: suggest_similar(service.name(), &names, 3),
            })
        })
    }

    /// Reads a cached singleton without holding the lock past the clone.
    fn cached<T: Clone + 'static>(&self, service: &ServiceId) -> Result<Option<T>> {
        let cache = self.cache.read();
        match cache.get(service) {
            None => Ok(None),
            Some(instance) => instance
                .downcast_ref::<T>()
                .cloned()
                .map(Some)
                .ok_or_else(|| mismatch::<T>(*service)),
        }
    }

    /// Stores a freshly built singleton; if another caller got there
    /// first, their value wins.
    fn store<T: Clone + Send + Sync + 'static>(&self, service: ServiceId, value: T) -> Result<T> {
        let mut cache = self.cache.write();
        let stored = cache
            .entry(service)
            .or_insert_with(|| Box::new(value) as Instance);

        trace!(service = %service, "Singleton cached");
        stored
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| mismatch::<T>(service))
    }
}

fn mismatch<T>(service: ServiceId) -> RegistryError {
    RegistryError::TypeMismatch {
        service,
        expected: type_name::<T>(),
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("instance_id", &self.instance_id)
            .field("bound", &self.factories.len())
            .field("cached", &self.cache.read().len())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Registry, RegistryBuilder};
    pub use crate::error::{RegistryError, Result};
    pub use crate::key::ServiceKey;
    pub use crate::lifetime::{Lifetime, ServiceState};
    pub use crate::provider::Provider;
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::sync::atomic::{AtomicU32, Ordering};

    const COUNTER: ServiceKey<u32> = ServiceKey::new("counter");
    const GREETING: ServiceKey<String> = ServiceKey::new("greeting");

    fn counting_factory(calls: Arc<AtomicU32>) -> impl Fn(&Registry) -> Result<u32> + Send + Sync {
        move |_| Ok(calls.fetch_add(1, Ordering::SeqCst))
    }

    #[test]
    fn transient_invokes_factory_per_resolve() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut registry = Registry::new();
        registry.bind(COUNTER, counting_factory(calls.clone()));

        assert_eq!(registry.resolve(COUNTER).unwrap(), 0);
        assert_eq!(registry.resolve(COUNTER).unwrap(), 1);
        assert_eq!(registry.resolve(COUNTER).unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn bind_does_not_invoke_factory() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut registry = Registry::new();
        registry.bind(COUNTER, counting_factory(calls.clone()));
        registry.singleton(GREETING, |_| Ok(String::from("hi"))).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!registry.is_instantiated(GREETING));
    }

    #[test]
    fn singleton_factory_called_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut registry = Registry::new();
        registry.singleton(COUNTER, counting_factory(calls.clone())).unwrap();

        let a = registry.resolve(COUNTER).unwrap();
        let b = registry.resolve(COUNTER).unwrap();

        assert_eq!(a, b);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn singleton_shares_arc_identity() {
        const SHARED: ServiceKey<Arc<Vec<u8>>> = ServiceKey::new("shared");

        let mut registry = Registry::new();
        registry.singleton(SHARED, |_| Ok(Arc::new(vec![1, 2, 3]))).unwrap();

        let a = registry.resolve(SHARED).unwrap();
        let b = registry.resolve(SHARED).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn resolve_unbound_fails() {
        let registry = Registry::new();

        match registry.resolve(COUNTER).unwrap_err() {
            RegistryError::Unbound(e) => assert_eq!(e.service.name(), "counter"),
            other => panic!("Expected Unbound, got: {other:?}"),
        }
    }

    #[test]
    fn unbound_suggests_similar_names() {
        const COUNTERS: ServiceKey<u32> = ServiceKey::new("counters");

        let mut registry = Registry::new();
        registry.bind(COUNTERS, |_| Ok(1));

        match registry.resolve(COUNTER).unwrap_err() {
            RegistryError::Unbound(e) => assert_eq!(e.suggestions, vec!["counters".to_string()]),
            other => panic!("Expected Unbound, got: {other:?}"),
        }
    }

    #[test]
    fn singleton_rebind_before_resolve_overwrites() {
        let mut registry = Registry::new();
        registry.singleton(COUNTER, |_| Ok(1)).unwrap();
        registry.singleton(COUNTER, |_| Ok(2)).unwrap();

        assert_eq!(registry.resolve(COUNTER).unwrap(), 2);
    }

    #[test]
    fn singleton_after_resolve_is_rejected() {
        let mut registry = Registry::new();
        registry.singleton(COUNTER, |_| Ok(1)).unwrap();
        registry.singleton(COUNTER, |_| Ok(2)).unwrap();
        registry.resolve(COUNTER).unwrap();

        let err = registry.singleton(COUNTER, |_| Ok(3)).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyInstantiated(_)));
        assert_eq!(registry.resolve(COUNTER).unwrap(), 2);
    }

    #[test]
    fn falsy_values_count_as_instantiated() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut registry = Registry::new();
        registry.singleton(COUNTER, counting_factory(calls.clone())).unwrap();

        assert_eq!(registry.resolve(COUNTER).unwrap(), 0);
        assert_eq!(registry.resolve(COUNTER).unwrap(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(registry.singleton(COUNTER, |_| Ok(7)).is_err());
    }

    #[test]
    fn singleton_failure_is_wrapped_and_retried() {
        let attempts = Arc::new(AtomicU32::new(0));
        let mut registry = Registry::new();
        registry
            .singleton(GREETING, {
                let attempts = attempts.clone();
                move |_| {
                    if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(RegistryError::factory("not ready"))
                    } else {
                        Ok(String::from("hello"))
                    }
                }
            })
            .unwrap();

        let err = registry.resolve(GREETING).unwrap_err();
        assert!(matches!(err, RegistryError::InstantiationFailed { .. }));
        assert_eq!(err.to_string(), "Error during singleton instantiation (greeting)");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("Factory failed: not ready")
        );
        assert!(!registry.is_instantiated(GREETING));

        assert_eq!(registry.resolve(GREETING).unwrap(), "hello");
        assert_eq!(registry.resolve(GREETING).unwrap(), "hello");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn transient_failure_propagates_unchanged() {
        let mut registry = Registry::new();
        registry.bind(GREETING, |_| Err(RegistryError::factory("boom")));

        let err = registry.resolve(GREETING).unwrap_err();
        assert!(matches!(err, RegistryError::Factory { .. }));
    }

    #[test]
    fn factory_resolves_dependencies() {
        let mut registry = Registry::new();
        registry.singleton(COUNTER, |_| Ok(41)).unwrap();
        registry.bind(GREETING, |r| Ok(format!("answer {}", r.resolve(COUNTER)? + 1)));

        assert_eq!(registry.resolve(GREETING).unwrap(), "answer 42");
        assert!(registry.is_instantiated(COUNTER));
    }

    #[test]
    fn missing_dependency_inside_singleton_is_wrapped() {
        let mut registry = Registry::new();
        registry
            .singleton(GREETING, |r| Ok(r.resolve(COUNTER)?.to_string()))
            .unwrap();

        let err = registry.resolve(GREETING).unwrap_err();
        match err {
            RegistryError::InstantiationFailed { service, source } => {
                assert_eq!(service.name(), "greeting");
                assert!(matches!(*source, RegistryError::Unbound(_)));
            }
            other => panic!("Expected InstantiationFailed, got: {other:?}"),
        }
    }

    #[test]
    fn drop_clears_bindings_and_cache() {
        let mut registry = Registry::new();
        let id = registry.instance_id().to_string();
        registry.singleton(COUNTER, |_| Ok(1)).unwrap();
        registry.bind(GREETING, |_| Ok(String::from("hi")));
        registry.resolve(COUNTER).unwrap();

        registry.drop();

        assert!(registry.is_empty());
        assert!(!registry.is_instantiated(COUNTER));
        assert!(matches!(registry.resolve(COUNTER), Err(RegistryError::Unbound(_))));
        assert!(matches!(registry.resolve(GREETING), Err(RegistryError::Unbound(_))));
        assert_eq!(registry.instance_id(), id);

        registry.singleton(COUNTER, |_| Ok(5)).unwrap();
        assert_eq!(registry.resolve(COUNTER).unwrap(), 5);
    }

    #[test]
    fn bind_over_instantiated_singleton_keeps_cache() {
        let mut registry = Registry::new();
        registry.singleton(COUNTER, |_| Ok(1)).unwrap();
        registry.resolve(COUNTER).unwrap();

        registry.bind(COUNTER, |_| Ok(9));

        assert_eq!(registry.resolve(COUNTER).unwrap(), 9);
        assert!(registry.is_instantiated(COUNTER));
        assert_eq!(registry.state(COUNTER), ServiceState::Transient);
        assert!(registry.singleton(COUNTER, |_| Ok(3)).is_err());
    }

    #[test]
    fn state_machine_transitions() {
        let mut registry = Registry::new();
        assert_eq!(registry.state(COUNTER), ServiceState::Unbound);

        registry.singleton(COUNTER, |_| Ok(1)).unwrap();
        assert_eq!(registry.state(COUNTER), ServiceState::Singleton { instantiated: false });

        registry.resolve(COUNTER).unwrap();
        assert_eq!(registry.state(COUNTER), ServiceState::Singleton { instantiated: true });

        registry.bind(GREETING, |_| Ok(String::new()));
        assert_eq!(registry.state(GREETING), ServiceState::Transient);
        assert_eq!(registry.lifetime(GREETING), Some(Lifetime::Transient));

        registry.drop();
        assert_eq!(registry.state(COUNTER), ServiceState::Unbound);
        assert_eq!(registry.state(GREETING), ServiceState::Unbound);
    }

    #[test]
    fn same_name_different_type_is_a_mismatch() {
        const PORT_TEXT: ServiceKey<String> = ServiceKey::new("port");
        const PORT: ServiceKey<u16> = ServiceKey::new("port");

        let mut registry = Registry::new();
        registry.bind(PORT_TEXT, |_| Ok(String::from("8080")));

        assert!(registry.contains(PORT));
        assert!(matches!(
            registry.resolve(PORT),
            Err(RegistryError::TypeMismatch { .. })
        ));

        registry.bind(PORT, |_| Ok(8080));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve(PORT).unwrap(), 8080);
    }

    #[test]
    fn builder_uses_injected_id_generator() {
        let registry = Registry::builder()
            .id_generator(|| String::from("fixed"))
            .build()
            .unwrap();

        assert_eq!(registry.instance_id(), "fixed");
    }

    #[test]
    fn distinct_registries_have_distinct_ids() {
        let a = Registry::new();
        let b = Registry::new();
        assert_ne!(a.instance_id(), b.instance_id());
    }

    #[test]
    fn default_ids_follow_creation_order() {
        let first = Registry::new();
        let second = Registry::new();
        assert!(first.instance_id() < second.instance_id());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn singleton_failure_is_logged_with_cause() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let logs = logs.clone();
                move || logs.clone()
            })
            .with_max_level(tracing::Level::ERROR)
            .with_ansi(false)
            .finish();

        let mut registry = Registry::new();
        registry
            .singleton(GREETING, |_| -> Result<String> {
                Err(RegistryError::factory("socket closed"))
            })
            .unwrap();

        tracing::subscriber::with_default(subscriber, || {
            assert!(registry.resolve(GREETING).is_err());
        });

        let output = String::from_utf8(logs.0.lock().clone()).unwrap();
        let errors: Vec<&str> = output.lines().filter(|line| line.contains("ERROR")).collect();
        assert_eq!(errors.len(), 1, "{output}");
        assert!(errors[0].contains("greeting"));
        assert!(errors[0].contains("socket closed"));
    }

    #[test]
    fn service_names_sorted() {
        let mut registry = Registry::new();
        registry.bind(GREETING, |_| Ok(String::new()));
        registry.bind(COUNTER, |_| Ok(0));

        assert_eq!(registry.service_names(), vec!["counter", "greeting"]);
    }

    #[test]
    fn concurrent_resolves_share_one_singleton() {
        const SHARED: ServiceKey<Arc<AtomicU32>> = ServiceKey::new("shared");

        let mut registry = Registry::new();
        registry.singleton(SHARED, |_| Ok(Arc::new(AtomicU32::new(0)))).unwrap();

        let first = registry.resolve(SHARED).unwrap();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let shared = registry.resolve(SHARED).unwrap();
                    shared.fetch_add(1, Ordering::SeqCst);
                });
            }
        });

        assert_eq!(first.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn debug_display() {
        let mut registry = Registry::builder()
            .id_generator(|| String::from("dbg"))
            .build()
            .unwrap();
        registry.bind(COUNTER, |_| Ok(1));

        let debug = format!("{registry:?}");
        assert!(debug.contains("Registry"));
        assert!(debug.contains("dbg"));
        assert!(debug.contains("bound: 1"));
    }
}
