//! `quire check` command implementation.

use std::path::PathBuf;

use clap::Args;
use quire_book::{BookError, MAX_PAGE_LENGTH, Page, Serializable, wire_length};
use quire_config::Config;
use quire_text::FormattedComponent;

use super::manifest_pages;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to manifest file (default: auto-discover quire.toml).
    #[arg(short, long, env = "QUIRE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Size report for one page.
#[derive(Debug, PartialEq, Eq)]
struct PageReport {
    /// 1-based page number, as shown to readers.
    number: usize,
    /// Serialized length in UTF-16 code units.
    length: usize,
    /// Whether the page is sent double-encoded.
    styled: bool,
    /// Whether the page fits the protocol limit.
    fits: bool,
}

impl PageReport {
    fn line(&self) -> String {
        let kind = if self.styled { "styled" } else { "plain" };
        if self.fits {
            format!(
                "Page {}: {} / {MAX_PAGE_LENGTH} characters ({kind})",
                self.number, self.length
            )
        } else {
            format!(
                "Page {}: {} characters exceeds the limit of {MAX_PAGE_LENGTH} ({kind})",
                self.number, self.length
            )
        }
    }
}

/// Serialize `page` on its own and report its size.
fn inspect_page(index: usize, page: &Page) -> Result<PageReport, BookError> {
    let styled = page.backing_component().has_styling();
    let (length, fits) = match page.serialize() {
        Ok(serialized) => (wire_length(&serialized), true),
        Err(BookError::SizeExceeded { length, .. }) => (length, false),
        Err(err) => return Err(err),
    };

    Ok(PageReport {
        number: index + 1,
        length,
        styled,
        fits,
    })
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest is invalid or any page exceeds the
    /// size limit.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let pages = manifest_pages(&config)?;

        let mut oversized = 0;
        for (index, page) in pages.iter().enumerate() {
            let report = inspect_page(index, page)?;
            if report.fits {
                output.info(&report.line());
            } else {
                tracing::warn!(page = report.number, length = report.length, "Page too long");
                output.warning(&report.line());
                oversized += 1;
            }
        }

        if oversized > 0 {
            return Err(CliError::Validation(format!(
                "{oversized} of {} page(s) exceed the size limit",
                pages.len()
            )));
        }

        output.success(&format!("All {} page(s) fit", pages.len()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quire_text::TextComponent;

    use super::*;

    #[test]
    fn test_inspect_plain_page() {
        let report = inspect_page(0, &Page::of("Hello")).unwrap();

        assert_eq!(
            report,
            PageReport {
                number: 1,
                length: 16,
                styled: false,
                fits: true,
            }
        );
        assert_eq!(report.line(), "Page 1: 16 / 32767 characters (plain)");
    }

    #[test]
    fn test_inspect_styled_page() {
        let page = Page::new(TextComponent::new("Hi").with_bold(true));

        let report = inspect_page(2, &page).unwrap();

        assert_eq!(report.number, 3);
        assert!(report.styled);
        assert_eq!(report.length, r#""{\"text\":\"Hi\",\"bold\":true}""#.len());
    }

    #[test]
    fn test_inspect_oversized_page() {
        let page = Page::of("a".repeat(MAX_PAGE_LENGTH));

        let report = inspect_page(0, &page).unwrap();

        assert!(!report.fits);
        assert_eq!(report.length, MAX_PAGE_LENGTH + 11);
        assert_eq!(
            report.line(),
            format!(
                "Page 1: {} characters exceeds the limit of 32767 (plain)",
                MAX_PAGE_LENGTH + 11
            )
        );
    }
}
