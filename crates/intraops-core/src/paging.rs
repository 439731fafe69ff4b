//! Keyset pagination shared by every list query
//!
//! A page is fetched by sort key: the cursor is the (base64url) sort key of
//! the last item returned, and the next page starts strictly after it.
//! Repositories fetch `limit + 1` rows so `has_more` is exact.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;

use crate::errors::{DomainError, Result};

/// Default maximum items per page
pub const DEFAULT_PAGE_LIMIT: usize = 50;
/// Largest page a caller may ask for
pub const MAX_PAGE_LIMIT: usize = 500;

/// Options controlling a paginated list query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: Option<usize>,
    /// Cursor from a previous page
    pub cursor: Option<String>,
    /// Substring filter on the item's name
    ///
    /// Only ASCII letters match case-insensitively, the way SQLite's
    /// `lower()` folds them: `"NET"` finds `"net 30"`, `"ä"` does not find
    /// `"Ä"`.
    pub name_contains: Option<String>,
}

impl ListOptions {
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT)
    }

    /// Decode the cursor into the sort key to resume after
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the cursor is not one this module produced.
    pub fn after_key(&self) -> Result<Option<String>> {
        let Some(cursor) = self.cursor.as_deref() else {
            return Ok(None);
        };
        URL_SAFE_NO_PAD
            .decode(cursor)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .map(Some)
            .ok_or_else(|| {
                DomainError::InvalidCursor {
                    cursor: cursor.to_string(),
                }
                .into()
            })
    }
}

pub fn encode_cursor(key: &str) -> String {
    URL_SAFE_NO_PAD.encode(key.as_bytes())
}

/// A page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor for the next page; `None` on the last page
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Build a page from an over-fetched, already sorted batch
    ///
    /// `raw` holds at most `limit + 1` items; the extra item only signals
    /// that another page exists.
    pub fn from_overshot(mut raw: Vec<T>, limit: usize, sort_key: impl Fn(&T) -> String) -> Self {
        let has_more = raw.len() > limit;
        raw.truncate(limit);
        let next_cursor = if has_more {
            raw.last().map(|item| encode_cursor(&sort_key(item)))
        } else {
            None
        };
        Page {
            items: raw,
            next_cursor,
            has_more,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        }
    }
}

/// Paginate an in-memory collection by sort key
///
/// # Errors
///
/// `InvalidInput` for an undecodable cursor.
pub fn paginate<T: Clone>(
    items: impl IntoIterator<Item = T>,
    options: &ListOptions,
    sort_key: impl Fn(&T) -> String,
    name: impl Fn(&T) -> &str,
) -> Result<Page<T>> {
    let after = options.after_key()?;
    let needle = options
        .name_contains
        .as_deref()
        .map(str::to_ascii_lowercase);
    let limit = options.effective_limit();

    let mut matching: Vec<T> = items
        .into_iter()
        .filter(|item| after.as_deref().map_or(true, |a| sort_key(item).as_str() > a))
        .filter(|item| {
            needle
                .as_deref()
                .map_or(true, |n| name(item).to_ascii_lowercase().contains(n))
        })
        .collect();
    matching.sort_by_key(|item| sort_key(item));
    matching.truncate(limit + 1);
    Ok(Page::from_overshot(matching, limit, sort_key))
}
