//! Rich text components for Quire books.
//!
//! This crate defines the capability set the book model needs from a text
//! formatting library, and ships the default adapter:
//!
//! - [`FormattedComponent`]: Deep copy, child append, styling predicate and
//!   native wire text
//! - [`TextComponent`]: Chat-style text node with colors, decorations,
//!   click/hover events and nested children
//!
//! # Example
//!
//! ```
//! use quire_text::{Color, FormattedComponent, TextComponent};
//!
//! let plain = TextComponent::new("Hello");
//! assert!(!plain.has_styling());
//! assert_eq!(plain.to_wire_text().unwrap(), r#"{"text":"Hello"}"#);
//!
//! let styled = TextComponent::new("Hello").with_color(Color::Gold);
//! assert!(styled.has_styling());
//! ```

mod component;

pub use component::{ClickAction, ClickEvent, Color, HoverEvent, TextComponent};

use std::fmt::Debug;

/// Error produced while encoding a component to its native wire text.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// The component could not be encoded.
    #[error("Failed to encode component: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Capabilities the book model requires from a rich text node.
///
/// Deep copy is expressed through [`Clone`]: a clone must never share mutable
/// state with the original.
pub trait FormattedComponent: Clone + Debug + Send + Sync {
    /// Append a nested child after any existing children.
    fn append_child(&mut self, child: Self);

    /// Whether this node or any nested child carries styling.
    fn has_styling(&self) -> bool;

    /// Encode the node to its native wire text.
    fn to_wire_text(&self) -> Result<String, ComponentError>;
}
