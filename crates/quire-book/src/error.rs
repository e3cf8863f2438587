//! Book and page error types.

use quire_text::ComponentError;

/// Error returned by page and book operations.
///
/// None of these are transient: they describe programming or content errors
/// and retrying the same call fails the same way.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    /// An argument was rejected (e.g. an empty component list).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A page index was outside the book.
    #[error("Page index {index} out of range for book with {len} pages")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of pages at the time of the call.
        len: usize,
    },

    /// A mutation was attempted on an immutable page.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// A serialized page is longer than the protocol allows.
    #[error("Serialized page is {length} characters long, exceeding the limit of {max}")]
    SizeExceeded {
        /// Length of the rejected page, in UTF-16 code units.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The backing component could not be encoded.
    #[error(transparent)]
    Component(#[from] ComponentError),
}
