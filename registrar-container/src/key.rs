//! Service identification keys.
//!
//! A [`ServiceKey<T>`] pairs a service name with the type that name
//! resolves to. Declaring the keys of an application as constants in one
//! place gives the registry a closed set of names, and `resolve(KEY)`
//! hands back a `T` without any casting at the call site.
//!
//! Internally the registry stores the type-erased [`ServiceId`].

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Typed name of a service.
///
/// # Examples
/// ```
/// use registrar_container::key::ServiceKey;
/// use std::sync::Arc;
///
/// trait Log: Send + Sync {
///     fn info(&self, msg: &str);
/// }
///
/// const LOGGER: ServiceKey<Arc<dyn Log>> = ServiceKey::new("logger");
/// const PORT: ServiceKey<u16> = ServiceKey::new("port");
///
/// assert_eq!(LOGGER.name(), "logger");
/// assert_eq!(PORT.name(), "port");
/// ```
pub struct ServiceKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ServiceKey<T> {
    /// Creates a key for the service called `name`.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// Returns the service name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: 'static> ServiceKey<T> {
    /// Erases the value type, keeping a runtime tag for it.
    #[inline]
    pub fn id(&self) -> ServiceId {
        ServiceId {
            name: self.name,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }
}

// Manual impls: `T` itself need not be Clone/Copy.
impl<T> Clone for ServiceKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ServiceKey<T> {}

impl<T> fmt::Debug for ServiceKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceKey({:?}: {})", self.name, type_name::<T>())
    }
}

impl<T> fmt::Display for ServiceKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Type-erased service key.
///
/// Two ids are equal when their names are equal: a registry holds at
/// most one binding per name. The [`TypeId`] travels along so that
/// resolving through a key of the wrong type is reported instead of
/// silently misbehaving.
#[derive(Clone, Copy)]
pub struct ServiceId {
    name: &'static str,
    type_id: TypeId,
    type_name: &'static str,
}

impl ServiceId {
    /// Returns the service name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`TypeId`] of the bound value type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the human-readable value type name.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for ServiceId {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ServiceId {}

impl Hash for ServiceId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceId({:?}: {})", self.name, self.type_name)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
