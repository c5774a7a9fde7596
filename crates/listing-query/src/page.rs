//! Pagination normalization.

use serde::Serialize;

use crate::config::ListingConfig;

/// Resolved pagination window.
///
/// `offset` and `limit` drive fetching; `page` is for reporting only and is
/// not reconciled with `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSpec {
    /// Absolute position of the first result.
    pub offset: usize,
    /// Page size; `0` means unbounded.
    pub limit: usize,
    /// One-based page number.
    pub page: usize,
}

impl PageSpec {
    /// Reconciles raw `index`, `page` and `limit` values.
    ///
    /// - `limit` falls back to the configured default; negative means `0`.
    /// - The offset is `index` when it is non-negative, else `(page - 1) *
    ///   limit` when `page >= 1`, else the configured default index.
    /// - The page is `page` when it is `>= 1`, else `ceil(index / limit)` when
    ///   both were given and are positive, else the configured default page.
    ///   A defaulted limit never derives the page.
    ///
    /// An explicit `index` wins over `page` for the offset even when the two
    /// disagree.
    ///
    /// # Example
    ///
    /// ```
    /// use listing_query_rs::config::ListingConfig;
    /// use listing_query_rs::page::PageSpec;
    ///
    /// let config = ListingConfig::default();
    /// let spec = PageSpec::normalize(None, Some(3), Some(20), &config);
    /// assert_eq!((spec.offset, spec.limit, spec.page), (40, 20, 3));
    /// ```
    pub fn normalize(
        index: Option<i64>,
        page: Option<i64>,
        limit: Option<i64>,
        config: &ListingConfig,
    ) -> Self {
        let given_limit = limit.map(|l| usize::try_from(l).unwrap_or(0));
        let limit = given_limit.unwrap_or(config.default_limit);
        let index = index.and_then(|i| usize::try_from(i).ok());
        let page = page
            .and_then(|p| usize::try_from(p).ok())
            .filter(|p| *p >= 1);

        let offset = match (index, page) {
            (Some(index), _) => index,
            (None, Some(page)) => (page - 1).saturating_mul(limit),
            (None, None) => config.default_index,
        };

        let page = match (page, index, given_limit) {
            (Some(page), _, _) => page,
            (None, Some(index), Some(limit)) if index > 0 && limit > 0 => index.div_ceil(limit),
            _ => config.default_page,
        };

        Self {
            offset,
            limit,
            page,
        }
    }

    /// Returns true if every result fits on one page.
    pub fn is_unbounded(&self) -> bool {
        self.limit == 0
    }
}
