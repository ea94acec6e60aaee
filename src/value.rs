//! Values that are either fixed at construction or re-read on every use.
//!
//! Several countdown settings (the initial count, the tick interval, the
//! completion callback) may change while the component is alive. A
//! [`MaybeDynamic`] holds either a constant or a provider function, and
//! [`MaybeDynamic::resolve`] returns whatever the value is *right now*.
//!
//! ```rust
//! use bubbletea_countdown::value::MaybeDynamic;
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//!
//! let fixed = MaybeDynamic::from(10u64);
//! assert_eq!(fixed.resolve(), 10);
//!
//! let source = Arc::new(AtomicU64::new(5));
//! let handle = Arc::clone(&source);
//! let dynamic = MaybeDynamic::from_fn(move || handle.load(Ordering::SeqCst));
//! assert_eq!(dynamic.resolve(), 5);
//!
//! source.store(8, Ordering::SeqCst);
//! assert_eq!(dynamic.resolve(), 8);
//! ```

use std::fmt;
use std::sync::Arc;

/// A zero-argument callback shared between the component and its owner.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Wraps a closure into a [`Callback`].
///
/// ```rust
/// use bubbletea_countdown::value::callback;
///
/// let done = callback(|| println!("done"));
/// done();
/// ```
pub fn callback<F>(f: F) -> Callback
where
    F: Fn() + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A value that is either constant or produced by a provider at read time.
pub enum MaybeDynamic<T> {
    /// A value fixed when the setting was created.
    Static(T),
    /// A provider invoked on every [`resolve`](MaybeDynamic::resolve).
    Dynamic(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T> MaybeDynamic<T> {
    /// Creates a dynamic value backed by `provider`.
    pub fn from_fn<F>(provider: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        MaybeDynamic::Dynamic(Arc::new(provider))
    }

    /// Returns `true` if the value is re-read from a provider.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, MaybeDynamic::Dynamic(_))
    }
}

impl<T: Clone> MaybeDynamic<T> {
    /// Returns the current value, invoking the provider if there is one.
    pub fn resolve(&self) -> T {
        match self {
            MaybeDynamic::Static(value) => value.clone(),
            MaybeDynamic::Dynamic(provider) => provider(),
        }
    }
}

impl<T> From<T> for MaybeDynamic<T> {
    fn from(value: T) -> Self {
        MaybeDynamic::Static(value)
    }
}

impl<T: Clone> Clone for MaybeDynamic<T> {
    fn clone(&self) -> Self {
        match self {
            MaybeDynamic::Static(value) => MaybeDynamic::Static(value.clone()),
            MaybeDynamic::Dynamic(provider) => MaybeDynamic::Dynamic(Arc::clone(provider)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for MaybeDynamic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaybeDynamic::Static(value) => f.debug_tuple("Static").field(value).finish(),
            MaybeDynamic::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_static_resolves_to_constant() {
        let value = MaybeDynamic::from(Duration::from_millis(250));
        assert!(!value.is_dynamic());
        assert_eq!(value.resolve(), Duration::from_millis(250));
        assert_eq!(value.resolve(), Duration::from_millis(250));
    }

    #[test]
    fn test_dynamic_invokes_provider_on_every_resolve() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let value = MaybeDynamic::from_fn(move || counter.fetch_add(1, Ordering::SeqCst) + 1);

        assert!(value.is_dynamic());
        assert_eq!(value.resolve(), 1);
        assert_eq!(value.resolve(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clone_shares_provider() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let value = MaybeDynamic::from_fn(move || counter.fetch_add(1, Ordering::SeqCst));
        let copy = value.clone();

        value.resolve();
        copy.resolve();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_debug_hides_provider() {
        let value: MaybeDynamic<u64> = MaybeDynamic::from_fn(|| 3);
        assert_eq!(format!("{:?}", value), "Dynamic(..)");
        assert_eq!(format!("{:?}", MaybeDynamic::from(3u64)), "Static(3)");
    }

    #[test]
    fn test_resolved_callback_runs() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let cb: MaybeDynamic<Callback> = MaybeDynamic::from(callback(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }));

        (cb.resolve())();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
