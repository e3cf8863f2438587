//! Page and book wire-text serializers.
//!
//! Books are written in a JSON-like shape with unquoted keys that the client
//! converts to item data:
//!
//! ```text
//! {author:"",title:"",pages:[<page1>,<page2>,...]}
//! ```
//!
//! `author` and `title` are mandatory keys but are never displayed, so they
//! are always empty.

use quire_text::{ComponentError, FormattedComponent};

use crate::BookError;

/// Maximum length of one serialized page, in UTF-16 code units.
pub const MAX_PAGE_LENGTH: usize = 32767;

const AUTHOR_ATTRIBUTE: &str = "author:\"\"";
const TITLE_ATTRIBUTE: &str = "title:\"\"";
const PAGES_KEY: &str = "pages";
const PAGES_DELIMITER: &str = ",";

/// Serialize a component to page wire text.
///
/// Unstyled components are emitted as their native wire text. Styled
/// components (including those with a styled nested child) have their native
/// text re-encoded as a quoted, escaped string literal, because the client
/// only keeps formatting for pages delivered in that form.
///
/// # Errors
///
/// Returns [`BookError::SizeExceeded`] if the result is longer than
/// [`MAX_PAGE_LENGTH`], and [`BookError::Component`] if encoding fails.
pub fn serialize_page<C: FormattedComponent>(component: &C) -> Result<String, BookError> {
    let native = component.to_wire_text()?;

    let serialized = if component.has_styling() {
        serde_json::to_string(&native).map_err(ComponentError::from)?
    } else {
        native
    };

    let length = wire_length(&serialized);
    if length > MAX_PAGE_LENGTH {
        return Err(BookError::SizeExceeded {
            length,
            max: MAX_PAGE_LENGTH,
        });
    }

    Ok(serialized)
}

/// Join serialized pages, in order, into book wire text.
pub fn serialize_book<'a, I>(pages: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = format!("{{{AUTHOR_ATTRIBUTE},{TITLE_ATTRIBUTE},{PAGES_KEY}:[");
    for (index, page) in pages.into_iter().enumerate() {
        if index > 0 {
            out.push_str(PAGES_DELIMITER);
        }
        out.push_str(page);
    }
    out.push_str("]}");
    out
}

/// Length of wire text as counted by the client (UTF-16 code units).
pub fn wire_length(text: &str) -> usize {
    text.encode_utf16().count()
}
