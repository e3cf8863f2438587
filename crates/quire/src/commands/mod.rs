//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod render;

pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

use quire_book::{Book, BookBuilder, Page};
use quire_config::Config;

use crate::error::CliError;

/// Create one mutable page per manifest entry, in manifest order.
pub(crate) fn manifest_pages(config: &Config) -> Result<Vec<Page>, CliError> {
    config
        .pages
        .iter()
        .map(|page| Page::from_components(page.components()).map_err(CliError::from))
        .collect()
}

/// Build the book described by the manifest; the first page is the front page.
pub(crate) fn build_book(config: &Config) -> Result<Book, CliError> {
    let mut pages = manifest_pages(config)?.into_iter();
    let front_page = pages
        .next()
        .ok_or_else(|| CliError::Validation("manifest has no pages".to_owned()))?;

    Ok(BookBuilder::new(front_page).add_pages(pages).build()?)
}
