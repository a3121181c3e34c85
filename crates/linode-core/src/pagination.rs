//! Paged list envelopes and listing options.

use serde::{Deserialize, Serialize};

use crate::query::QueryParams;

/// Header carrying the API's JSON filter expression.
pub const FILTER_HEADER: &str = "X-Filter";

/// One page of a list call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    /// Records on this page, in server order.
    pub data: Vec<T>,
    /// 1-based page number.
    #[serde(default = "first_page")]
    pub page: u32,
    /// Total page count.
    #[serde(default = "first_page")]
    pub pages: u32,
    /// Total record count across all pages.
    #[serde(default)]
    pub results: u32,
}

const fn first_page() -> u32 {
    1
}

impl<T> PagedResponse<T> {
    /// Whether the server reports pages after this one.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.page < self.pages
    }

    /// Append a later page, adopting its cursor state.
    pub fn append(&mut self, next: Self) {
        self.data.extend(next.data);
        self.page = next.page;
        self.pages = next.pages;
        self.results = next.results;
    }
}

/// Options for list calls.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Fetch only this page instead of walking all pages.
    pub page: Option<u32>,
    /// Records per page; the server default applies when unset.
    pub page_size: Option<u32>,
    /// Raw JSON filter passed through in the `X-Filter` header.
    pub filter: Option<String>,
}

impl ListOptions {
    /// Options that walk every page with the server's default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch only the given page.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Set the filter expression.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Query pairs for the given page.
    #[must_use]
    pub fn to_pairs(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push("page", page);
        params.push_opt("page_size", self.page_size);
        params.into_pairs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_options_to_pairs() {
        let opts = ListOptions::new().with_page_size(50).with_filter(r#"{"region":"us-east"}"#);
        let pairs = opts.to_pairs(3);
        assert_eq!(
            pairs,
            vec![("page", "3".to_string()), ("page_size", "50".to_string())]
        );
        assert_eq!(ListOptions::new().to_pairs(1), vec![("page", "1".to_string())]);
    }

    #[test]
    fn envelope_defaults_and_append() {
        let mut first: PagedResponse<u32> =
            serde_json::from_str(r#"{"data":[1,2],"page":1,"pages":2,"results":3}"#).unwrap();
        assert!(first.has_more());

        let second: PagedResponse<u32> =
            serde_json::from_str(r#"{"data":[3],"page":2,"pages":2,"results":3}"#).unwrap();
        first.append(second);
        assert_eq!(first.data, vec![1, 2, 3]);
        assert!(!first.has_more());

        let bare: PagedResponse<u32> = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert_eq!((bare.page, bare.pages, bare.results), (1, 1, 0));
    }
}
