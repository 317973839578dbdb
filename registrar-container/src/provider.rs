//! Provider trait: a module of related service bindings.
//!
//! Providers group the bindings of one concern so a composition root
//! reads as a list of modules instead of one long registration block.
//!
//! # Examples
//! ```rust
//! use registrar_container::prelude::*;
//! use std::sync::Arc;
//!
//! struct Database {
//!     url: String,
//! }
//!
//! const DATABASE_URL: ServiceKey<String> = ServiceKey::new("database_url");
//! const DATABASE: ServiceKey<Arc<Database>> = ServiceKey::new("database");
//!
//! struct DatabaseProvider;
//!
//! impl Provider for DatabaseProvider {
//!     fn register(&self, registry: &mut Registry) -> Result<()> {
//!         registry.bind(DATABASE_URL, |_| Ok(String::from("postgres://localhost")));
//!         registry.singleton(DATABASE, |r| {
//!             Ok(Arc::new(Database { url: r.resolve(DATABASE_URL)? }))
//!         })?;
//!         Ok(())
//!     }
//! }
//!
//! let registry = Registry::builder().provider(DatabaseProvider).build()?;
//! assert_eq!(registry.resolve(DATABASE)?.url, "postgres://localhost");
//! # Ok::<(), RegistryError>(())
//! ```

use crate::error::Result;
use crate::registry::Registry;

/// A module that binds related services into a [`Registry`].
pub trait Provider: Send + Sync {
    /// Bind this provider's services.
    ///
    /// Errors from [`Registry::singleton`] propagate to the caller of
    /// [`Registry::add_provider`] or [`RegistryBuilder::build`].
    ///
    /// [`RegistryBuilder::build`]: crate::registry::RegistryBuilder::build
    fn register(&self, registry: &mut Registry) -> Result<()>;

    /// Optional: human-readable name for logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
