//! Offset/page pagination over a known item count.
//!
//! A [`PageQuery`] is parsed from the raw `page`, `per_page` and `offset`
//! request parameters and resolved against the total number of items into a
//! [`PageWindow`], which carries everything a list response needs: the
//! zero-based start index, the number of items to return, the totals for the
//! `X-Total`/`X-Total-Pages` headers and the neighbouring page numbers for the
//! `Link` header.
//!
//! Rules:
//!
//! - Without `per_page` every item is returned and `page`/`offset` are ignored.
//! - With `per_page`, `offset` (when given) wins over `page`.
//! - With `per_page` and items present, `offset >= total` is
//!   [`CoreError::InvalidOffsetNumber`], and `page > total_pages` without an
//!   offset is [`CoreError::InvalidPageNumber`].

use crate::error::CoreError;

/// Largest `per_page` accepted from a request.
pub const MAX_PER_PAGE: u64 = 100;

/// Numeric sentinel meaning "no page size, return everything".
pub const PER_PAGE_ALL: i64 = -1;

/// Page size of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerPage {
    All,
    Limit(u64),
}

impl PerPage {
    /// Interpret a numeric page size where [`PER_PAGE_ALL`] selects every item.
    ///
    /// Zero and negative values other than the sentinel are rejected.
    pub fn from_raw(value: i64) -> Result<Self, CoreError> {
        match value {
            PER_PAGE_ALL => Ok(PerPage::All),
            n if n >= 1 => Ok(PerPage::Limit(n as u64)),
            n => Err(CoreError::invalid_param(
                "per_page",
                format!("{n} is not a positive integer"),
            )),
        }
    }
}

/// Raw, unparsed pagination parameters as they arrive on the query string.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawPageQuery<'a> {
    pub page: Option<&'a str>,
    pub per_page: Option<&'a str>,
    pub offset: Option<&'a str>,
}

/// Validated pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page number (defaults to 1).
    pub page: u64,
    pub per_page: PerPage,
    /// 0-based start index; overrides `page` when present.
    pub offset: Option<u64>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::all()
    }
}

impl PageQuery {
    /// A query returning every item.
    pub fn all() -> Self {
        Self {
            page: 1,
            per_page: PerPage::All,
            offset: None,
        }
    }

    /// Validate request parameters.
    ///
    /// `per_page` on the wire must be within `1..=MAX_PER_PAGE`; leaving it
    /// out selects [`PerPage::All`].
    pub fn parse(raw: RawPageQuery<'_>) -> Result<Self, CoreError> {
        let page = match raw.page {
            None => 1,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(CoreError::invalid_param(
                        "page",
                        format!("'{value}' is not an integer greater than or equal to 1"),
                    ))
                }
            },
        };

        let per_page = match raw.per_page {
            None => PerPage::All,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(n) if (1..=MAX_PER_PAGE).contains(&n) => PerPage::Limit(n),
                _ => {
                    return Err(CoreError::invalid_param(
                        "per_page",
                        format!("'{value}' must be between 1 and {MAX_PER_PAGE}"),
                    ))
                }
            },
        };

        let offset = match raw.offset {
            None => None,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(n) => Some(n),
                Err(_) => {
                    return Err(CoreError::invalid_param(
                        "offset",
                        format!("'{value}' is not a non-negative integer"),
                    ))
                }
            },
        };

        Ok(Self {
            page,
            per_page,
            offset,
        })
    }

    /// Resolve this query against `total` items.
    pub fn resolve(&self, total: u64) -> Result<PageWindow, CoreError> {
        let size = match self.per_page {
            PerPage::All => {
                return Ok(PageWindow {
                    start: 0,
                    len: total,
                    total,
                    total_pages: u64::from(total > 0),
                    page: 1,
                });
            }
            PerPage::Limit(n) => n,
        };

        let total_pages = total.div_ceil(size);

        if total > 0 {
            match self.offset {
                Some(offset) if offset >= total => return Err(CoreError::InvalidOffsetNumber),
                None if self.page > total_pages => return Err(CoreError::InvalidPageNumber),
                _ => {}
            }
        }

        let start = self
            .offset
            .unwrap_or_else(|| (self.page - 1).saturating_mul(size));
        let len = size.min(total.saturating_sub(start));

        Ok(PageWindow {
            start,
            len,
            total,
            total_pages,
            page: self.page,
        })
    }
}

/// The resolved slice of a listing plus the metadata for response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Zero-based index of the first item returned.
    pub start: u64,
    /// Number of items returned.
    pub len: u64,
    pub total: u64,
    pub total_pages: u64,
    /// The requested page number (1 when an offset drove the window).
    pub page: u64,
}

impl PageWindow {
    /// SQL `LIMIT` for this window.
    pub fn sql_limit(&self) -> i64 {
        i64::try_from(self.len).unwrap_or(i64::MAX)
    }

    /// SQL `OFFSET` for this window.
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.start).unwrap_or(i64::MAX)
    }

    /// Apply the window to an already ordered, complete item list.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.start).unwrap_or(usize::MAX).min(items.len());
        let len = usize::try_from(self.len).unwrap_or(usize::MAX);
        let end = start.saturating_add(len).min(items.len());
        &items[start..end]
    }

    /// Page number for `rel="prev"`, clamped to the last page.
    pub fn prev_page(&self) -> Option<u64> {
        if self.page > 1 {
            Some((self.page - 1).min(self.total_pages.max(1)))
        } else {
            None
        }
    }

    /// Page number for `rel="next"`.
    pub fn next_page(&self) -> Option<u64> {
        if self.total_pages > self.page {
            Some(self.page + 1)
        } else {
            None
        }
    }

    /// Build the `Link` header value for this window.
    ///
    /// `query` holds the request's own query parameters in arrival order;
    /// `page` is replaced in place (or appended) for each link. Returns
    /// `None` when there is neither a previous nor a next page.
    pub fn link_header(&self, base_url: &str, query: &[(String, String)]) -> Option<String> {
        let mut links = Vec::with_capacity(2);
        if let Some(prev) = self.prev_page() {
            links.push(format!(
                "<{}>; rel=\"prev\"",
                page_url(base_url, query, prev)
            ));
        }
        if let Some(next) = self.next_page() {
            links.push(format!(
                "<{}>; rel=\"next\"",
                page_url(base_url, query, next)
            ));
        }
        if links.is_empty() {
            None
        } else {
            Some(links.join(", "))
        }
    }
}

/// `base_url` with `query` re-encoded and `page` set to `page`.
fn page_url(base_url: &str, query: &[(String, String)], page: u64) -> String {
    let page = page.to_string();
    let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(query.len() + 1);
    let mut replaced = false;
    for (key, value) in query {
        if key == "page" {
            if !replaced {
                pairs.push(("page", &page));
                replaced = true;
            }
        } else {
            pairs.push((key, value));
        }
    }
    if !replaced {
        pairs.push(("page", &page));
    }

    let encoded: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    format!("{base_url}?{}", encoded.join("&"))
}
