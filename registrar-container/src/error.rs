//! Error types for registry operations.
//!
//! Every message names the offending service so a failure in a large
//! composition root points straight at the binding involved.

use std::fmt;

use registrar_support::rendering::{quote_names, shorten_type_name};

use crate::key::ServiceId;

/// Main error type for all registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// `resolve` was called for a name with no factory.
    #[error("{}", .0)]
    Unbound(UnboundError),

    /// `singleton` was called for a name whose instance already exists.
    #[error("{}", .0)]
    AlreadyInstantiated(AlreadyInstantiatedError),

    /// A singleton factory failed during construction.
    ///
    /// The cache stays empty, so the next resolve retries.
    #[error("Error during singleton instantiation ({service})")]
    InstantiationFailed {
        service: ServiceId,
        #[source]
        source: Box<RegistryError>,
    },

    /// The value bound under a name is not of the type the key declares.
    #[error(
        "Type mismatch for \"{service}\": bound as {}, requested as {}",
        shorten_type_name(.service.type_name()),
        shorten_type_name(.expected)
    )]
    TypeMismatch {
        service: ServiceId,
        expected: &'static str,
    },

    /// A user factory reported a failure of its own.
    #[error("Factory failed: {source}")]
    Factory {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RegistryError {
    /// Wraps an arbitrary error raised inside a factory.
    ///
    /// ```
    /// use registrar_container::error::RegistryError;
    ///
    /// let err = RegistryError::factory("connection refused");
    /// assert_eq!(err.to_string(), "Factory failed: connection refused");
    /// ```
    pub fn factory(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        RegistryError::Factory {
            source: source.into(),
        }
    }

    /// Returns the service name this error is about, if any.
    pub fn service(&self) -> Option<&'static str> {
        match self {
            RegistryError::Unbound(e) => Some(e.service.name()),
            RegistryError::AlreadyInstantiated(e) => Some(e.service.name()),
            RegistryError::InstantiationFailed { service, .. }
            | RegistryError::TypeMismatch { service, .. } => Some(service.name()),
            RegistryError::Factory { .. } => None,
        }
    }
}

/// Error when a service name has no factory.
#[derive(Debug)]
pub struct UnboundError {
    /// The service that was requested
    pub service: ServiceId,
    /// Bound names that look similar
    pub suggestions: Vec<String>,
}

impl fmt::Display for UnboundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" is not bound to the registry", self.service)?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean: {}", quote_names(&self.suggestions))?;
        }

        write!(
            f,
            "\n  Hint: call .bind() or .singleton() for \"{}\" before resolving it",
            self.service
        )
    }
}

/// Error when re-registering a singleton that was already built.
#[derive(Debug)]
pub struct AlreadyInstantiatedError {
    pub service: ServiceId,
}

impl fmt::Display for AlreadyInstantiatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Singleton \"{}\" has already been instantiated",
            self.service
        )?;
        write!(
            f,
            "\n  Hint: register singletons before their first resolve, or call .drop() to start over"
        )
    }
}

/// Convenient Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
