//! Query capability over a parsed HTML page.
//!
//! Thin wrapper around `scraper` that returns ordered lists of elements,
//! text tokens, and attributes. Positional lookups go through [`nth`] and
//! [`at_least`], which turn a short result into an [`ExtractionError`]
//! naming the field being read.

use scraper::{ElementRef, Html, Selector};

use crate::error::{ExtractionError, ExtractionResult};
use crate::types::FieldKey;

/// A parsed page.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// All elements matching a CSS selector, in document order.
    pub fn select(&self, css: &str) -> ExtractionResult<Vec<ElementRef<'_>>> {
        let selector = parse_selector(css)?;
        Ok(self.html.select(&selector).collect())
    }

    /// Direct text of every element matching `css`, flattened in document order.
    pub fn own_texts(&self, css: &str) -> ExtractionResult<Vec<String>> {
        Ok(self.select(css)?.into_iter().flat_map(own_text).collect())
    }

    /// Value of `attr` on every matching element that carries it.
    pub fn attrs(&self, css: &str, attr: &str) -> ExtractionResult<Vec<String>> {
        Ok(self
            .select(css)?
            .into_iter()
            .filter_map(|el| el.value().attr(attr).map(str::to_string))
            .collect())
    }
}

fn parse_selector(css: &str) -> ExtractionResult<Selector> {
    Selector::parse(css).map_err(|_| ExtractionError::InvalidSelector(css.to_string()))
}

/// Text nodes that are direct children of `el`, trimmed, blanks skipped.
pub fn own_text(el: ElementRef<'_>) -> Vec<String> {
    el.children()
        .filter_map(|node| node.value().as_text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Every text node under `el` (itself included), trimmed, blanks skipped.
pub fn all_text(el: ElementRef<'_>) -> Vec<String> {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Direct child elements of `el` with the given tag name.
pub fn children<'a>(el: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == tag)
        .collect()
}

/// Following sibling elements of `el` with the given tag name.
pub fn following_siblings<'a>(el: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|sibling| sibling.value().name() == tag)
        .collect()
}

/// Walk a path of child tag names from each element in `roots`.
pub fn descend<'a>(roots: Vec<ElementRef<'a>>, path: &[&str]) -> Vec<ElementRef<'a>> {
    path.iter().fold(roots, |level, tag| {
        level.into_iter().flat_map(|el| children(el, tag)).collect()
    })
}

/// The `n`th item, or an error naming the field and query.
pub fn nth<T>(field: FieldKey, query: &str, items: Vec<T>, n: usize) -> ExtractionResult<T> {
    let found = items.len();
    if found == 0 {
        return Err(ExtractionError::Missing {
            field,
            query: query.to_string(),
        });
    }
    items
        .into_iter()
        .nth(n)
        .ok_or_else(|| ExtractionError::TooFew {
            field,
            query: query.to_string(),
            expected: n + 1,
            found,
        })
}

/// Require at least `expected` items.
pub fn at_least<T>(
    field: FieldKey,
    query: &str,
    items: Vec<T>,
    expected: usize,
) -> ExtractionResult<Vec<T>> {
    if items.len() < expected {
        return Err(ExtractionError::TooFew {
            field,
            query: query.to_string(),
            expected,
            found: items.len(),
        });
    }
    Ok(items)
}
