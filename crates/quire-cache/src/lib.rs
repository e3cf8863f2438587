//! Memoization primitives for Quire.
//!
//! Every entity that exposes a derived value (a page or book serialized form)
//! owns one [`Memo`] slot for it. The slot is filled lazily through a shared
//! reference and cleared through an exclusive one, so the borrow checker
//! guarantees that no reader holds a cached value across a mutation.
//!
//! # Example
//!
//! ```
//! use quire_cache::Memo;
//!
//! let mut memo = Memo::new();
//! assert_eq!(memo.get_or_init(|| "v1".to_owned()), "v1");
//! // Cached: the loader is not called again.
//! assert_eq!(memo.get_or_init(|| "v2".to_owned()), "v1");
//!
//! memo.invalidate();
//! assert_eq!(memo.get_or_init(|| "v2".to_owned()), "v2");
//! ```

mod memo;

pub use memo::Memo;
