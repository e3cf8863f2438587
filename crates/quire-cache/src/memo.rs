//! Per-entity recompute-on-invalidate cache slot.

use std::fmt;
use std::sync::OnceLock;

/// A lazily computed value that can be invalidated.
///
/// Lookups take `&self` and populate the slot on a miss. [`Memo::invalidate`]
/// takes `&mut self`, which makes a cached value unobservable once the owner
/// starts mutating the data it was derived from.
///
/// Backed by [`OnceLock`], so a `Memo<T>` is `Send + Sync` whenever `T` is.
pub struct Memo<T> {
    slot: OnceLock<T>,
}

impl<T> Memo<T> {
    /// Create an empty memo.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Create a memo that already holds `value`.
    #[must_use]
    pub fn frozen(value: T) -> Self {
        let slot = OnceLock::new();
        let _ = slot.set(value);
        Self { slot }
    }

    /// Cached value, if any.
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Whether a value is currently cached.
    pub fn is_cached(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Return the cached value, computing it with `load` on a miss.
    pub fn get_or_init<F>(&self, load: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.slot.get_or_init(load)
    }

    /// Return the cached value, computing it with a fallible `load` on a miss.
    ///
    /// A failed load caches nothing; the next call runs `load` again.
    pub fn get_or_try_init<F, E>(&self, load: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.slot.get() {
            return Ok(value);
        }
        let value = load()?;
        // A concurrent reader may have won the race; both loaded from the same state.
        Ok(self.slot.get_or_init(|| value))
    }

    /// Drop the cached value so the next lookup recomputes it.
    pub fn invalidate(&mut self) {
        self.slot.take();
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Memo<T> {
    fn clone(&self) -> Self {
        match self.slot.get() {
            Some(value) => Self::frozen(value.clone()),
            None => Self::new(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            Some(value) => f.debug_tuple("Memo").field(value).finish(),
            None => f.write_str("Memo(<empty>)"),
        }
    }
}
