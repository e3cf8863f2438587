//! Staged book construction.

use quire_text::{FormattedComponent, TextComponent};

use crate::book::snapshot_all;
use crate::{Book, BookError, Page};

/// Builder for [`Book`].
///
/// Unlike [`Book`], the builder keeps pages as given (mutable pages stay
/// mutable) and snapshots them exactly once, in [`BookBuilder::build`]. The
/// front page always comes first, followed by the additional pages in the
/// order they were added.
///
/// # Example
///
/// ```
/// use quire_book::{Book, Page};
///
/// let book = Book::builder(Page::of("Hello"))
///     .add_page(Page::of("World"))
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     book.serialized_form().unwrap(),
///     r#"{author:"",title:"",pages:[{"text":"Hello"},{"text":"World"}]}"#
/// );
/// ```
#[derive(Clone, Debug)]
pub struct BookBuilder<C: FormattedComponent = TextComponent> {
    front_page: Page<C>,
    additional_pages: Vec<Page<C>>,
}

impl<C: FormattedComponent> BookBuilder<C> {
    /// Create a builder with the required front page.
    #[must_use]
    pub fn new(front_page: Page<C>) -> Self {
        Self {
            front_page,
            additional_pages: Vec::new(),
        }
    }

    /// Replace the front page.
    #[must_use]
    pub fn front_page(mut self, page: Page<C>) -> Self {
        self.front_page = page;
        self
    }

    /// Append a page after the pages added so far.
    #[must_use]
    pub fn add_page(mut self, page: Page<C>) -> Self {
        self.additional_pages.push(page);
        self
    }

    /// Append pages, in order.
    #[must_use]
    pub fn add_pages<I>(mut self, pages: I) -> Self
    where
        I: IntoIterator<Item = Page<C>>,
    {
        self.additional_pages.extend(pages);
        self
    }

    /// Reset the builder to `front_page` followed by `additional_pages`.
    ///
    /// Previously added pages are discarded.
    #[must_use]
    pub fn pages<I>(mut self, front_page: Page<C>, additional_pages: I) -> Self
    where
        I: IntoIterator<Item = Page<C>>,
    {
        self.additional_pages.clear();
        self.front_page(front_page).add_pages(additional_pages)
    }

    /// Number of pages the built book will have.
    pub fn len(&self) -> usize {
        1 + self.additional_pages.len()
    }

    /// Always `false`: a builder holds at least its front page.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Snapshot the front page and additional pages into a new [`Book`].
    ///
    /// # Errors
    ///
    /// Returns [`BookError::SizeExceeded`] if any page is too long to send.
    pub fn build(self) -> Result<Book<C>, BookError> {
        let pages = std::iter::once(&self.front_page).chain(&self.additional_pages);
        let snapshots = snapshot_all(pages)?;

        tracing::debug!(pages = snapshots.len(), "Built book");
        Ok(Book::from_snapshots(snapshots))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::MAX_PAGE_LENGTH;

    fn texts(book: &Book) -> Vec<String> {
        book.pages().map(|page| page.backing_component().text).collect()
    }

    #[test]
    fn test_build_hello_world() {
        let book = BookBuilder::new(Page::of("Hello"))
            .add_page(Page::of("World"))
            .build()
            .unwrap();

        assert_eq!(
            book.serialized_form().unwrap(),
            r#"{author:"",title:"",pages:[{"text":"Hello"},{"text":"World"}]}"#
        );
    }

    #[test]
    fn test_front_page_comes_first() {
        let book = BookBuilder::new(Page::of("old front"))
            .add_pages([Page::of("b"), Page::of("c")])
            .front_page(Page::of("a"))
            .build()
            .unwrap();

        assert_eq!(texts(&book), ["a", "b", "c"]);
    }

    #[test]
    fn test_pages_resets_accumulated_pages() {
        let builder = BookBuilder::new(Page::of("x"))
            .add_page(Page::of("y"))
            .pages(Page::of("a"), [Page::of("b")]);

        assert_eq!(builder.len(), 2);
        assert_eq!(texts(&builder.build().unwrap()), ["a", "b"]);
    }

    #[test]
    fn test_builder_keeps_pages_mutable_until_build() {
        let builder = BookBuilder::new(Page::of("a"));
        assert!(builder.front_page.is_mutable());

        let book = builder.build().unwrap();

        assert!(book.pages().all(|page| !page.is_mutable()));
    }

    #[test]
    fn test_build_front_page_only() {
        let book = BookBuilder::new(Page::of("only")).build().unwrap();
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_build_rejects_oversized_page() {
        let result = BookBuilder::new(Page::of("a"))
            .add_page(Page::of("a".repeat(MAX_PAGE_LENGTH)))
            .build();

        assert!(matches!(result, Err(BookError::SizeExceeded { .. })));
    }
}
