//! # Registrar: typed service registry for Rust
//!
//! A small composition root: bind factories under typed names, resolve
//! them later as fresh (transient) or cached (singleton) instances.
//!
//! ```rust
//! use registrar::prelude::*;
//!
//! const GREETING: ServiceKey<String> = ServiceKey::new("greeting");
//!
//! let mut registry = Registry::new();
//! registry.bind(GREETING, |_| Ok(String::from("hello")));
//! assert_eq!(registry.resolve(GREETING)?, "hello");
//! # Ok::<(), RegistryError>(())
//! ```

pub use registrar_container::*;
pub use registrar_support::*;
