//! Core registry implementation for Registrar.

pub mod error;
pub mod key;
pub mod lifetime;
pub mod provider;
pub mod registry;

pub use error::{RegistryError, Result};
pub use key::{ServiceId, ServiceKey};
pub use lifetime::{Lifetime, ServiceState};
pub use registry::{Registry, RegistryBuilder, prelude};
