//! List responses.
//!
//! List endpoints answer either with a bare JSON array or with a paginated
//! envelope carrying the items under `results`. Both shapes parse into
//! [`ListEnvelope`] and flatten to the same `Vec<T>`.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Paginated {
        results: Vec<T>,
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
    },
}

impl<T> ListEnvelope<T> {
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Paginated { results: items, .. } => items,
        }
    }

    /// URL of the next page, when the server paginates.
    #[must_use]
    pub fn next_page(&self) -> Option<&str> {
        match self {
            Self::Bare(_) => None,
            Self::Paginated { next, .. } => next.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use super::ListEnvelope;

    #[derive(Debug, PartialEq, Eq, Deserialize)]
    struct Item {
        id: u64,
    }

    #[test]
    fn bare_and_paginated_yield_same_items() {
        let bare: ListEnvelope<Item> = serde_json::from_str(r#"[{"id":1},{"id":2}]"#).unwrap();
        let paged: ListEnvelope<Item> = serde_json::from_str(
            r#"{"count":2,"next":null,"previous":null,"results":[{"id":1},{"id":2}]}"#,
        )
        .unwrap();

        assert_eq!(bare.into_items(), paged.into_items());
    }

    #[test]
    fn envelope_without_pagination_fields_parses() {
        let paged: ListEnvelope<Item> = serde_json::from_str(r#"{"results":[{"id":7}]}"#).unwrap();
        assert_eq!(paged.next_page(), None);
        assert_eq!(paged.into_items(), vec![Item { id: 7 }]);
    }

    #[test]
    fn next_page_is_exposed() {
        let paged: ListEnvelope<Item> = serde_json::from_str(
            r#"{"count":30,"next":"http://h/api/queries/?page=2","results":[]}"#,
        )
        .unwrap();
        assert_eq!(paged.next_page(), Some("http://h/api/queries/?page=2"));
        assert!(paged.into_items().is_empty());
    }

    #[test]
    fn empty_bare_array_parses() {
        let bare: ListEnvelope<Item> = serde_json::from_str("[]").unwrap();
        assert!(bare.into_items().is_empty());
    }

    #[test]
    fn object_without_results_is_rejected() {
        let parsed = serde_json::from_str::<ListEnvelope<Item>>(r#"{"detail":"nope"}"#);
        assert!(parsed.is_err());
    }
}
