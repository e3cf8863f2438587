//! Book pages.
//!
//! A [`Page`] wraps one backing component and caches its serialized form.
//! Pages come in two variants:
//!
//! - **Mutable**: the backing component can be replaced or transformed; every
//!   mutation clears the cached serialized form before returning.
//! - **Immutable**: a frozen snapshot whose serialized form was computed once,
//!   when it was created. All mutators fail with
//!   [`BookError::UnsupportedOperation`].
//!
//! The backing component never escapes by reference: accessors hand out
//! clones and mutators take ownership of what they store, so nothing outside
//! the page can change the component behind the cache's back.

use std::sync::Arc;

use quire_cache::Memo;
use quire_text::{FormattedComponent, TextComponent};

use crate::{BookError, Serializable, serializer};

/// A single page of a [`Book`](crate::Book).
#[derive(Clone, Debug)]
pub struct Page<C: FormattedComponent = TextComponent> {
    state: PageState<C>,
}

#[derive(Clone, Debug)]
enum PageState<C> {
    Mutable { component: C, serialized: Memo<String> },
    Immutable(Arc<Snapshot<C>>),
}

/// Frozen page content. Shared between clones of the same immutable page.
#[derive(Debug)]
struct Snapshot<C> {
    component: C,
    serialized: String,
}

impl<C: FormattedComponent> Page<C> {
    /// Create a mutable page backed by `component`.
    #[must_use]
    pub fn new(component: C) -> Self {
        Self {
            state: PageState::Mutable {
                component,
                serialized: Memo::new(),
            },
        }
    }

    /// Create a mutable page from one or more components.
    ///
    /// The first component becomes the base; every further component is
    /// appended to it as a nested child, in order.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::InvalidArgument`] if `components` is empty.
    pub fn from_components<I>(components: I) -> Result<Self, BookError>
    where
        I: IntoIterator<Item = C>,
    {
        let mut components = components.into_iter();
        let Some(mut base) = components.next() else {
            return Err(BookError::InvalidArgument(
                "components is empty".to_owned(),
            ));
        };

        for component in components {
            base.append_child(component);
        }

        Ok(Self::new(base))
    }

    /// Create an immutable page directly from a component, serializing it now.
    pub(crate) fn frozen(component: C) -> Result<Self, BookError> {
        let serialized = serializer::serialize_page(&component)?;
        Ok(Self::from_snapshot(Snapshot {
            component,
            serialized,
        }))
    }

    fn from_snapshot(snapshot: Snapshot<C>) -> Self {
        Self {
            state: PageState::Immutable(Arc::new(snapshot)),
        }
    }

    /// Whether this page accepts mutations.
    pub fn is_mutable(&self) -> bool {
        matches!(self.state, PageState::Mutable { .. })
    }

    /// A copy of the backing component.
    ///
    /// Changing the returned value never affects this page.
    pub fn backing_component(&self) -> C {
        self.component().clone()
    }

    /// Replace the backing component.
    ///
    /// The page takes exclusive ownership of `component`; callers that want to
    /// keep using theirs pass a clone. Clears the cached serialized form.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::UnsupportedOperation`] on an immutable page.
    pub fn set_backing_component(&mut self, component: C) -> Result<(), BookError> {
        match &mut self.state {
            PageState::Mutable {
                component: current,
                serialized,
            } => {
                *current = component;
                serialized.invalidate();
                Ok(())
            }
            PageState::Immutable(_) => Err(BookError::UnsupportedOperation(
                "immutable pages cannot change their backing component",
            )),
        }
    }

    /// Replace the backing component with `transform` applied to a copy of it.
    ///
    /// The transform never sees the stored component itself. On an immutable
    /// page the transform is not invoked.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::UnsupportedOperation`] on an immutable page.
    pub fn modify_backing_component<F>(&mut self, transform: F) -> Result<(), BookError>
    where
        F: FnOnce(C) -> C,
    {
        if !self.is_mutable() {
            return Err(BookError::UnsupportedOperation(
                "immutable pages cannot modify their backing component",
            ));
        }

        let modified = transform(self.backing_component());
        self.set_backing_component(modified)
    }

    /// Serialized wire text of this page.
    ///
    /// Mutable pages compute it on first use after construction or mutation
    /// and cache it; immutable pages return the value frozen at creation.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::SizeExceeded`] if the page is too long to send.
    pub fn serialized_form(&self) -> Result<&str, BookError> {
        match &self.state {
            PageState::Mutable {
                component,
                serialized,
            } => serialized
                .get_or_try_init(|| {
                    tracing::trace!("Page serialized form cache miss");
                    serializer::serialize_page(component)
                })
                .map(String::as_str),
            PageState::Immutable(snapshot) => Ok(snapshot.serialized.as_str()),
        }
    }

    /// Create an immutable snapshot of this page.
    ///
    /// The snapshot owns a copy of the current component and its serialized
    /// form, computed now (or reused if already cached) and never again.
    /// Snapshotting an immutable page shares its existing snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::SizeExceeded`] if the page is too long to send.
    pub fn to_immutable_copy(&self) -> Result<Self, BookError> {
        match &self.state {
            PageState::Mutable {
                component,
                serialized,
            } => {
                let serialized = match serialized.get() {
                    Some(cached) => cached.clone(),
                    None => serializer::serialize_page(component)?,
                };
                Ok(Self::from_snapshot(Snapshot {
                    component: component.clone(),
                    serialized,
                }))
            }
            PageState::Immutable(snapshot) => Ok(Self {
                state: PageState::Immutable(Arc::clone(snapshot)),
            }),
        }
    }

    /// Whether both pages are the same immutable snapshot.
    pub fn shares_snapshot_with(&self, other: &Self) -> bool {
        match (&self.state, &other.state) {
            (PageState::Immutable(a), PageState::Immutable(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn component(&self) -> &C {
        match &self.state {
            PageState::Mutable { component, .. } => component,
            PageState::Immutable(snapshot) => &snapshot.component,
        }
    }
}

impl Page<TextComponent> {
    /// Create a mutable page holding unstyled `text`.
    #[must_use]
    pub fn of(text: impl Into<String>) -> Self {
        Self::new(TextComponent::new(text))
    }
}

impl<C: FormattedComponent> Serializable for Page<C> {
    fn serialize(&self) -> Result<String, BookError> {
        serializer::serialize_page(self.component())
    }
}
