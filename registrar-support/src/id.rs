//! Registry identifiers.
//!
//! Every registry carries an opaque identity string drawn once from an
//! [`IdGenerator`]. The default, [`TimeOrderedIds`], yields UUIDv7 strings:
//! 128 bits, unique, and sortable by creation time.

use tracing::trace;
use uuid::Uuid;

/// Source of unique identifiers.
///
/// Any `Fn() -> String` closure is a generator, which keeps tests free
/// to substitute predictable ids.
///
/// # Examples
/// ```
/// use registrar_support::id::IdGenerator;
///
/// let fixed = || String::from("registry-under-test");
/// assert_eq!(fixed.generate(), "registry-under-test");
/// ```
pub trait IdGenerator: Send + Sync {
    /// Produces a fresh identifier.
    fn generate(&self) -> String;
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Time-ordered identifiers backed by UUIDv7.
///
/// The hyphenated lowercase form has a fixed width, so lexicographic order
/// follows creation order.
///
/// ```
/// use registrar_support::id::{IdGenerator, TimeOrderedIds};
///
/// let id = TimeOrderedIds.generate();
/// assert_eq!(id.len(), 36);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOrderedIds;

impl IdGenerator for TimeOrderedIds {
    fn generate(&self) -> String {
        let id = Uuid::now_v7().to_string();
        trace!(%id, "Generated identifier");
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn time_ordered_ids_are_unique() {
        let ids: HashSet<String> = (0..256).map(|_| TimeOrderedIds.generate()).collect();
        assert_eq!(ids.len(), 256);
    }

    #[test]
    fn time_ordered_ids_sort_in_creation_order() {
        let ids: Vec<String> = (0..5000).map(|_| TimeOrderedIds.generate()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn time_ordered_ids_are_uuid_v7() {
        let id = TimeOrderedIds.generate();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn closure_is_a_generator() {
        let counter = AtomicU32::new(0);
        let sequential = move || format!("id-{}", counter.fetch_add(1, Ordering::SeqCst));

        assert_eq!(sequential.generate(), "id-0");
        assert_eq!(sequential.generate(), "id-1");
    }
}
