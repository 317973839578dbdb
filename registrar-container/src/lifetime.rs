//! Service lifetimes and per-name binding state.
//!
//! - [`Lifetime::Singleton`]: one instance, built on first resolve, cached
//! - [`Lifetime::Transient`]: new instance on every resolve
use std::fmt;

/// How long a resolved service lives.
///
/// # Examples
/// ```
/// use registrar_container::lifetime::Lifetime;
///
/// assert!(Lifetime::Singleton.is_cached());
/// assert!(!Lifetime::Transient.is_cached());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// One instance for the lifetime of the registry.
    ///
    /// Built on first resolve and kept until [`Registry::drop`] clears
    /// the cache.
    ///
    /// # When to use
    /// - Connection pools
    /// - Configuration objects
    /// - Shared caches
    ///
    /// [`Registry::drop`]: crate::registry::Registry::drop
    Singleton,

    /// New instance on every resolve. Never cached.
    Transient,
}

impl Lifetime {
    /// Returns `true` if instances of this lifetime are cached.
    #[inline]
    pub fn is_cached(&self) -> bool {
        matches!(self, Lifetime::Singleton)
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifetime::Singleton => write!(f, "Singleton"),
            Lifetime::Transient => write!(f, "Transient"),
        }
    }
}

/// Where a single service name stands.
///
/// ```text
/// Unbound ──bind──────> Transient
/// Unbound ──singleton─> Singleton { instantiated: false }
///                            │ first successful resolve
///                            ▼
///                       Singleton { instantiated: true }
/// ```
///
/// `drop()` sends every name back to `Unbound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Unbound,
    Transient,
    Singleton { instantiated: bool },
}

impl ServiceState {
    /// Returns `true` unless the name is unbound.
    #[inline]
    pub fn is_bound(&self) -> bool {
        !matches!(self, ServiceState::Unbound)
    }

    /// Returns the lifetime of the binding, if any.
    pub fn lifetime(&self) -> Option<Lifetime> {
        match self {
            ServiceState::Unbound => None,
            ServiceState::Transient => Some(Lifetime::Transient),
            ServiceState::Singleton { .. } => Some(Lifetime::Singleton),
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceState::Unbound => write!(f, "Unbound"),
            ServiceState::Transient => write!(f, "Bound (Transient)"),
            ServiceState::Singleton { instantiated: false } => {
                write!(f, "Bound (Singleton, uninstantiated)")
            }
            ServiceState::Singleton { instantiated: true } => {
                write!(f, "Bound (Singleton, instantiated)")
            }
        }
    }
}
