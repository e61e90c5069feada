//! Page-number pagination primitives for listing endpoints.
//!
//! A [`Paginator`] splits an already-ordered result set into fixed-size
//! pages. Requested page numbers outside the valid range clamp to the
//! nearest bound rather than failing: callers always receive a renderable
//! window, which is what a listing page wants when a visitor edits the
//! query string by hand.

use std::num::NonZeroUsize;

use serde::Serialize;

/// Errors raised when constructing a [`Paginator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The page size must be at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// A requested page, parsed from untrusted query-string input.
///
/// Anything that does not parse as a positive integer collapses to
/// [`PageRequest::First`]; numeric values are clamped later by
/// [`Paginator::paginate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageRequest {
    /// No usable page number was supplied; serve the first page.
    #[default]
    First,
    /// An explicit page number, still subject to range clamping.
    Number(usize),
}

impl PageRequest {
    /// Parse a raw query-string value into a page request.
    ///
    /// Missing, blank, and non-numeric values all map to
    /// [`PageRequest::First`].
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// assert_eq!(PageRequest::from_raw(None), PageRequest::First);
    /// assert_eq!(PageRequest::from_raw(Some("two")), PageRequest::First);
    /// assert_eq!(PageRequest::from_raw(Some("2")), PageRequest::Number(2));
    /// ```
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .filter(|value| !value.is_empty())
            .and_then(|value| value.parse::<usize>().ok())
            .map_or(Self::First, Self::Number)
    }
}

/// One window of an ordered result set plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items belonging to this window, preserving input order.
    pub items: Vec<T>,
    /// One-based page number after clamping.
    pub number: usize,
    /// Configured window size.
    pub per_page: usize,
    /// Total number of pages; at least one even for an empty set.
    pub total_pages: usize,
    /// Total number of items across all pages.
    pub count: usize,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_previous: bool,
}

/// Splits ordered result sets into fixed-size pages.
///
/// ## Invariants
/// - `total_pages` is `max(1, ceil(count / per_page))`; an empty result set
///   yields a single empty first page rather than an error.
/// - The effective page number is always within `[1, total_pages]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: NonZeroUsize,
}

impl Paginator {
    /// Create a paginator with the given window size.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroPageSize`] when `per_page` is zero.
    pub fn new(per_page: usize) -> Result<Self, PaginationError> {
        NonZeroUsize::new(per_page)
            .map(|per_page| Self { per_page })
            .ok_or(PaginationError::ZeroPageSize)
    }

    /// Configured window size.
    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page.get()
    }

    /// Slice `items` into the requested window.
    ///
    /// Out-of-range requests clamp to the nearest valid page: below-range
    /// values serve the first page, beyond-range values the last.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, Paginator};
    ///
    /// let paginator = Paginator::new(6).expect("non-zero page size");
    /// let page = paginator.paginate((1..=13).collect::<Vec<_>>(), PageRequest::Number(99));
    /// assert_eq!(page.number, 3);
    /// assert_eq!(page.items, vec![13]);
    /// ```
    #[must_use]
    pub fn paginate<T>(&self, items: Vec<T>, request: PageRequest) -> Page<T> {
        let per_page = self.per_page.get();
        let count = items.len();
        let total_pages = count.div_ceil(per_page).max(1);
        let requested = match request {
            PageRequest::First => 1,
            PageRequest::Number(number) => number,
        };
        let number = requested.clamp(1, total_pages);
        let window = items
            .into_iter()
            .skip((number - 1) * per_page)
            .take(per_page)
            .collect();

        Page {
            items: window,
            number,
            per_page,
            total_pages,
            count,
            has_next: number < total_pages,
            has_previous: number > 1,
        }
    }
}
