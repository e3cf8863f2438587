//! Multi-page books.
//!
//! A [`Book`] keeps an ordered list of immutable page snapshots and caches its
//! aggregate serialized form. Every page handed to the book is snapshotted on
//! the way in, so a caller keeping the original page (and mutating it later)
//! can never change the book. Pages inside the book are modified only through
//! [`Book::modify_page`], which installs a fresh snapshot.
//!
//! Any structural change clears the cached serialized form before returning.
//! Index-based methods are bounds-checked and fail with
//! [`BookError::IndexOutOfRange`].

use quire_cache::Memo;
use quire_text::{FormattedComponent, TextComponent};

use crate::{BookBuilder, BookError, Page, Serializable, serializer};

/// An ordered collection of pages with a cached serialized form.
#[derive(Clone, Debug)]
pub struct Book<C: FormattedComponent = TextComponent> {
    pages: Vec<Page<C>>,
    serialized: Memo<String>,
}

impl<C: FormattedComponent> Default for Book<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: FormattedComponent> Book<C> {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            serialized: Memo::new(),
        }
    }

    /// Start building a book whose first page is `front_page`.
    #[must_use]
    pub fn builder(front_page: Page<C>) -> BookBuilder<C> {
        BookBuilder::new(front_page)
    }

    /// Create a book holding snapshots of `pages`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::SizeExceeded`] if any page is too long to send.
    pub fn from_pages<'a, I>(pages: I) -> Result<Self, BookError>
    where
        I: IntoIterator<Item = &'a Page<C>>,
        C: 'a,
    {
        let pages = snapshot_all(pages)?;
        Ok(Self::from_snapshots(pages))
    }

    /// Create a book from pages that are already immutable.
    pub(crate) fn from_snapshots(pages: Vec<Page<C>>) -> Self {
        debug_assert!(pages.iter().all(|page| !page.is_mutable()));
        Self {
            pages,
            serialized: Memo::new(),
        }
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the book has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate over the stored (immutable) pages in order.
    pub fn pages(&self) -> impl ExactSizeIterator<Item = &Page<C>> {
        self.pages.iter()
    }

    /// The immutable page at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::IndexOutOfRange`] if `index >= len()`.
    pub fn page(&self, index: usize) -> Result<&Page<C>, BookError> {
        self.pages.get(index).ok_or(BookError::IndexOutOfRange {
            index,
            len: self.pages.len(),
        })
    }

    /// Append a snapshot of `page`.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::SizeExceeded`] if the page is too long to send.
    pub fn add_page(&mut self, page: &Page<C>) -> Result<(), BookError> {
        let snapshot = page.to_immutable_copy()?;
        self.pages.push(snapshot);
        self.invalidate();

        tracing::debug!(pages = self.pages.len(), "Added page");
        Ok(())
    }

    /// Append snapshots of `pages`, in order.
    ///
    /// Either every page is added or, if one cannot be snapshotted, none is.
    /// Adding nothing leaves the cached serialized form intact.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::SizeExceeded`] if any page is too long to send.
    pub fn add_pages<'a, I>(&mut self, pages: I) -> Result<(), BookError>
    where
        I: IntoIterator<Item = &'a Page<C>>,
        C: 'a,
    {
        let snapshots = snapshot_all(pages)?;
        if snapshots.is_empty() {
            return Ok(());
        }

        let added = snapshots.len();
        self.pages.extend(snapshots);
        self.invalidate();

        tracing::debug!(added, pages = self.pages.len(), "Added pages");
        Ok(())
    }

    /// Insert a snapshot of `page` at `index`, shifting later pages back.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::IndexOutOfRange`] if `index > len()`, or
    /// [`BookError::SizeExceeded`] if the page is too long to send.
    pub fn insert_page(&mut self, index: usize, page: &Page<C>) -> Result<(), BookError> {
        if index > self.pages.len() {
            return Err(self.out_of_range(index));
        }

        let snapshot = page.to_immutable_copy()?;
        self.pages.insert(index, snapshot);
        self.invalidate();

        tracing::debug!(index, pages = self.pages.len(), "Inserted page");
        Ok(())
    }

    /// Replace the page at `index` with a snapshot of `page`.
    ///
    /// Returns the page previously stored at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::IndexOutOfRange`] if `index >= len()`, or
    /// [`BookError::SizeExceeded`] if the page is too long to send.
    pub fn set_page(&mut self, index: usize, page: &Page<C>) -> Result<Page<C>, BookError> {
        self.check_index(index)?;

        let snapshot = page.to_immutable_copy()?;
        let previous = std::mem::replace(&mut self.pages[index], snapshot);
        self.invalidate();

        tracing::debug!(index, "Replaced page");
        Ok(previous)
    }

    /// Remove and return the page at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove_page(&mut self, index: usize) -> Result<Page<C>, BookError> {
        self.check_index(index)?;

        let removed = self.pages.remove(index);
        self.invalidate();

        tracing::debug!(index, pages = self.pages.len(), "Removed page");
        Ok(removed)
    }

    /// Replace the page at `index` with one whose component is `transform`
    /// applied to a copy of the current component.
    ///
    /// The replacement is frozen directly from the transformed component; no
    /// intermediate mutable page is created.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::IndexOutOfRange`] if `index >= len()`, or
    /// [`BookError::SizeExceeded`] if the transformed page is too long to send.
    /// On error the book is unchanged.
    pub fn modify_page<F>(&mut self, index: usize, transform: F) -> Result<(), BookError>
    where
        F: FnOnce(C) -> C,
    {
        let current = self.page(index)?.backing_component();

        let modified = Page::frozen(transform(current))?;
        self.pages[index] = modified;
        self.invalidate();

        tracing::debug!(index, "Modified page");
        Ok(())
    }

    /// Serialized wire text of the whole book.
    ///
    /// Computed from the pages' serialized forms on first use after
    /// construction or mutation, then cached.
    ///
    /// # Errors
    ///
    /// Propagates page serialization errors. Stored pages are snapshots whose
    /// forms were validated on insertion, so this only fails for pages built
    /// by a misbehaving component adapter.
    pub fn serialized_form(&self) -> Result<&str, BookError> {
        self.serialized
            .get_or_try_init(|| {
                tracing::trace!(pages = self.pages.len(), "Book serialized form cache miss");
                self.serialize()
            })
            .map(String::as_str)
    }

    fn invalidate(&mut self) {
        self.serialized.invalidate();
    }

    fn check_index(&self, index: usize) -> Result<(), BookError> {
        if index < self.pages.len() {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> BookError {
        BookError::IndexOutOfRange {
            index,
            len: self.pages.len(),
        }
    }
}

impl<C: FormattedComponent> Serializable for Book<C> {
    fn serialize(&self) -> Result<String, BookError> {
        let pages = self
            .pages
            .iter()
            .map(Page::serialized_form)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(serializer::serialize_book(pages))
    }
}

/// Snapshot every page, failing before anything is kept if one is rejected.
pub(crate) fn snapshot_all<'a, C, I>(pages: I) -> Result<Vec<Page<C>>, BookError>
where
    C: FormattedComponent + 'a,
    I: IntoIterator<Item = &'a Page<C>>,
{
    pages.into_iter().map(Page::to_immutable_copy).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quire_text::Color;

    use super::*;
    use crate::MAX_PAGE_LENGTH;

    static_assertions::assert_impl_all!(Book: Send, Sync, Clone);

    fn book_of(texts: &[&str]) -> Book {
        let pages: Vec<Page> = texts.iter().map(|text| Page::of(*text)).collect();
        Book::from_pages(&pages).unwrap()
    }

    fn texts(book: &Book) -> Vec<String> {
        book.pages().map(|page| page.backing_component().text).collect()
    }

    fn oversized() -> Page {
        Page::of("a".repeat(MAX_PAGE_LENGTH))
    }

    // ========================================================================
    // Structure
    // ========================================================================

    #[test]
    fn test_new_book_is_empty() {
        let book: Book = Book::new();
        assert!(book.is_empty());
        assert_eq!(book.serialized_form().unwrap(), r#"{author:"",title:"",pages:[]}"#);
    }

    #[test]
    fn test_add_page_stores_immutable_snapshot() {
        let mut book = Book::new();
        let page = Page::of("Hello");

        book.add_page(&page).unwrap();

        assert_eq!(book.len(), 1);
        assert!(page.is_mutable());
        assert!(!book.page(0).unwrap().is_mutable());
    }

    #[test]
    fn test_add_pages_appends_in_order() {
        let mut book = book_of(&["a"]);
        let pages = [Page::of("b"), Page::of("c")];

        book.add_pages(&pages).unwrap();

        assert_eq!(texts(&book), ["a", "b", "c"]);
    }

    #[test]
    fn test_add_pages_is_all_or_nothing() {
        let mut book = book_of(&["a"]);
        let pages = [Page::of("b"), oversized()];

        let result = book.add_pages(&pages);

        assert!(matches!(result, Err(BookError::SizeExceeded { .. })));
        assert_eq!(texts(&book), ["a"]);
    }

    #[test]
    fn test_add_no_pages_keeps_cache() {
        let mut book = book_of(&["a"]);
        book.serialized_form().unwrap();

        book.add_pages([]).unwrap();

        assert!(book.serialized.is_cached());
    }

    #[test]
    fn test_duplicate_page_allowed() {
        let mut book = Book::new();
        let page = Page::of("same");

        book.add_page(&page).unwrap();
        book.add_page(&page).unwrap();

        assert_eq!(
            book.serialized_form().unwrap(),
            r#"{author:"",title:"",pages:[{"text":"same"},{"text":"same"}]}"#
        );
    }

    #[test]
    fn test_insert_page_at_front_middle_and_end() {
        let mut book = book_of(&["b", "d"]);

        book.insert_page(0, &Page::of("a")).unwrap();
        book.insert_page(2, &Page::of("c")).unwrap();
        book.insert_page(4, &Page::of("e")).unwrap();

        assert_eq!(texts(&book), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_set_page_returns_previous() {
        let mut book = book_of(&["a", "b"]);

        let previous = book.set_page(1, &Page::of("B")).unwrap();

        assert_eq!(previous.backing_component().text, "b");
        assert_eq!(texts(&book), ["a", "B"]);
    }

    #[test]
    fn test_remove_page_returns_removed() {
        let mut book = book_of(&["a", "b", "c"]);

        let removed = book.remove_page(1).unwrap();

        assert_eq!(removed.backing_component().text, "b");
        assert_eq!(texts(&book), ["a", "c"]);
    }

    // ========================================================================
    // Bounds
    // ========================================================================

    #[test]
    fn test_page_out_of_range() {
        let book = book_of(&["a", "b"]);

        for index in [book.len(), usize::MAX] {
            let err = book.page(index).unwrap_err();
            assert!(
                matches!(err, BookError::IndexOutOfRange { index: i, len: 2 } if i == index),
                "Expected IndexOutOfRange, got {err:?}"
            );
        }
    }

    #[test]
    fn test_index_mutators_check_bounds() {
        let mut book = book_of(&["a"]);

        assert!(matches!(
            book.insert_page(2, &Page::of("x")),
            Err(BookError::IndexOutOfRange { index: 2, len: 1 })
        ));
        assert!(matches!(
            book.set_page(1, &Page::of("x")),
            Err(BookError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            book.remove_page(1),
            Err(BookError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            book.modify_page(1, |c| c),
            Err(BookError::IndexOutOfRange { .. })
        ));
        assert_eq!(texts(&book), ["a"]);
    }

    // ========================================================================
    // Isolation and modification
    // ========================================================================

    #[test]
    fn test_mutating_added_page_does_not_change_book() {
        let mut book = Book::new();
        let mut page = Page::of("Hello");
        book.add_page(&page).unwrap();
        let before = book.serialized_form().unwrap().to_owned();

        page.set_backing_component(TextComponent::new("Changed"))
            .unwrap();

        assert_eq!(book.serialized_form().unwrap(), before);
        assert_eq!(book.page(0).unwrap().backing_component().text, "Hello");
    }

    #[test]
    fn test_stored_pages_reject_mutation() {
        let book = book_of(&["a"]);
        let mut page = book.page(0).unwrap().clone();

        assert!(matches!(
            page.set_backing_component(TextComponent::new("x")),
            Err(BookError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_modify_page_applies_transform_to_current_component() {
        let mut book = book_of(&["a", "b"]);
        let before = book.page(1).unwrap().backing_component();
        let transform = |c: TextComponent| c.with_color(Color::Red).with_child("!");

        book.modify_page(1, transform).unwrap();

        let page = book.page(1).unwrap();
        assert!(!page.is_mutable());
        assert_eq!(page.backing_component(), transform(before));
    }

    #[test]
    fn test_modify_page_oversized_leaves_book_unchanged() {
        let mut book = book_of(&["a"]);

        let result = book.modify_page(0, |c| c.with_child("a".repeat(MAX_PAGE_LENGTH)));

        assert!(matches!(result, Err(BookError::SizeExceeded { .. })));
        assert_eq!(texts(&book), ["a"]);
    }

    // ========================================================================
    // Cache behavior
    // ========================================================================

    #[test]
    fn test_serialized_form_is_idempotent() {
        let book = book_of(&["a", "b"]);

        let first = book.serialized_form().unwrap().to_owned();

        assert!(book.serialized.is_cached());
        assert_eq!(book.serialized_form().unwrap(), first);
    }

    #[test]
    fn test_every_mutation_invalidates_cache() {
        let mut book = book_of(&["a", "b"]);
        let mutations: [fn(&mut Book); 6] = [
            |b| b.add_page(&Page::of("x")).unwrap(),
            |b| b.add_pages(&[Page::of("x")]).unwrap(),
            |b| b.insert_page(0, &Page::of("x")).unwrap(),
            |b| drop(b.set_page(0, &Page::of("x")).unwrap()),
            |b| drop(b.remove_page(0).unwrap()),
            |b| b.modify_page(0, |c| c.with_bold(true)).unwrap(),
        ];

        for mutate in mutations {
            book.serialized_form().unwrap();
            mutate(&mut book);
            assert!(!book.serialized.is_cached());
            assert_eq!(
                book.serialized_form().unwrap(),
                book.serialize().unwrap(),
                "cache must reflect the last mutation"
            );
        }
    }

    #[test]
    fn test_serialized_form_reflects_styled_and_plain_pages() {
        let mut book = book_of(&["plain"]);
        book.add_page(&Page::new(TextComponent::new("bold").with_bold(true)))
            .unwrap();

        assert_eq!(
            book.serialized_form().unwrap(),
            r#"{author:"",title:"",pages:[{"text":"plain"},"{\"text\":\"bold\",\"bold\":true}"]}"#
        );
    }

    #[test]
    fn test_add_oversized_page_fails() {
        let mut book = Book::new();
        assert!(matches!(
            book.add_page(&oversized()),
            Err(BookError::SizeExceeded { .. })
        ));
        assert!(book.is_empty());
    }
}
