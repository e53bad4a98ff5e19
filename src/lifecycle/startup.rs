//! Startup orchestration.
//!
//! # Responsibilities
//! - Invoke the application factory exactly once
//! - Bind the resulting handle to an [`EntryPoint`] returned to the caller
//! - Surface construction failures unmodified
//!
//! # Design Decisions
//! - Fail fast: a factory error is fatal, no retries
//! - No process-wide global: the caller owns the entry point and passes it
//!   to whatever hosting runtime needs it
//! - Listeners start after bootstrap (traffic only when ready)

use std::fmt;
use std::sync::Arc;

/// A bootstrapped application handle, ready to be handed to a hosting runtime.
///
/// Clones share the same handle; lookups never rebuild it.
pub struct EntryPoint<A> {
    handle: Arc<A>,
}

impl<A> EntryPoint<A> {
    fn new(app: A) -> Self {
        Self {
            handle: Arc::new(app),
        }
    }

    /// The bound application handle.
    pub fn handle(&self) -> &Arc<A> {
        &self.handle
    }

    /// Whether `other` is the exact handle this entry point is bound to.
    pub fn is_bound_to(&self, other: &Arc<A>) -> bool {
        Arc::ptr_eq(&self.handle, other)
    }
}

impl<A> Clone for EntryPoint<A> {
    fn clone(&self) -> Self {
        Self {
            handle: Arc::clone(&self.handle),
        }
    }
}

impl<A> std::ops::Deref for EntryPoint<A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.handle
    }
}

impl<A> fmt::Debug for EntryPoint<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("handle", &Arc::as_ptr(&self.handle))
            .finish()
    }
}

/// Construct the application and bind it to an [`EntryPoint`].
///
/// The factory runs exactly once. Its error is returned as-is and no entry
/// point exists afterwards.
pub fn bootstrap<A, E, F>(factory: F) -> Result<EntryPoint<A>, E>
where
    F: FnOnce() -> Result<A, E>,
    E: fmt::Display,
{
    tracing::info!("Constructing application");

    match factory() {
        Ok(app) => {
            let entry = EntryPoint::new(app);
            tracing::info!("Application constructed");
            Ok(entry)
        }
        Err(e) => {
            tracing::error!(error = %e, "Application construction failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq, Eq)]
    struct Sentinel(u64);

    #[derive(Debug, PartialEq, Eq)]
    struct ConstructionError(&'static str);

    impl fmt::Display for ConstructionError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "construction failed: {}", self.0)
        }
    }

    #[test]
    fn test_entry_point_bound_to_factory_handle() {
        let handle = Arc::new(Sentinel(42));
        let returned = Arc::clone(&handle);

        let entry = bootstrap(move || Ok::<_, ConstructionError>(returned)).unwrap();

        // The factory's own Arc is wrapped, so compare the inner handle.
        assert!(Arc::ptr_eq(&**entry.handle(), &handle));
        assert_eq!(entry.handle().0, 42);
    }

    #[test]
    fn test_factory_error_propagates_unmodified() {
        let result = bootstrap(|| Err::<Sentinel, _>(ConstructionError("no database")));
        assert_eq!(result.unwrap_err(), ConstructionError("no database"));
    }

    #[test]
    fn test_factory_invoked_exactly_once() {
        let calls = AtomicUsize::new(0);

        let entry = bootstrap(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ConstructionError>(Sentinel(1))
        })
        .unwrap();

        let _ = entry.handle();
        let _ = entry.clone().handle();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_factory_invoked_exactly_once() {
        let calls = AtomicUsize::new(0);

        let result = bootstrap(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<Sentinel, _>(ConstructionError("boom"))
        });

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handle_stable_across_lookups() {
        let entry = bootstrap(|| Ok::<_, ConstructionError>(Sentinel(7))).unwrap();

        let first = Arc::clone(entry.handle());
        let second = Arc::clone(entry.handle());
        let cloned = entry.clone();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(entry.is_bound_to(&first));
        assert!(cloned.is_bound_to(&first));
        assert_eq!(*entry, Sentinel(7));
    }
}
