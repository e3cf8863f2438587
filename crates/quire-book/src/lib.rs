//! Cache-coherent book and page model for Quire.
//!
//! This crate provides:
//! - [`Page`]: One rich text component in a mutable or immutable variant,
//!   with a cached serialized form
//! - [`Book`]: Ordered immutable page snapshots with a cached aggregate form
//! - [`BookBuilder`]: Staged construction that snapshots pages once, at build
//! - [`serialize_page`] / [`serialize_book`]: The wire-text serializers
//!
//! Cached serialized forms always reflect the last committed mutation:
//! components are copied at every boundary, and every mutator clears the
//! owning entity's cache before it returns.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), quire_book::BookError> {
//! use quire_book::{Book, Page};
//! use quire_text::{ClickEvent, TextComponent};
//!
//! let mut book = Book::builder(Page::of("Welcome"))
//!     .add_page(Page::new(
//!         TextComponent::new("Back to start").with_click_event(ClickEvent::change_page(1)),
//!     ))
//!     .build()?;
//!
//! book.modify_page(0, |c| c.with_child(" aboard"))?;
//!
//! let wire = book.serialized_form()?;
//! assert!(wire.starts_with(r#"{author:"",title:"",pages:[{"text":"Welcome","extra""#));
//! # Ok(())
//! # }
//! ```

mod book;
mod builder;
mod error;
mod page;
mod serializer;

pub use book::Book;
pub use builder::BookBuilder;
pub use error::BookError;
pub use page::Page;
pub use serializer::{MAX_PAGE_LENGTH, serialize_book, serialize_page, wire_length};

/// An entity with a wire-text representation.
///
/// `serialize` always recomputes; entities cache its result behind their own
/// `serialized_form` accessor.
pub trait Serializable {
    /// Compute the wire text from the current state.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::SizeExceeded`] if a page is too long to send.
    fn serialize(&self) -> Result<String, BookError>;
}
