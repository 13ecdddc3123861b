//! Page slicing over an already-ordered listing.
//!
//! # Design
//! The store has no secondary index, so every list request loads the full
//! collection and slices it here. Out-of-range pages are not errors: they
//! come back empty with the requested metadata echoed.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Raw `page` / `limit` query parameters. Kept as strings so that
/// non-numeric values fall back to the defaults instead of rejecting the
/// request.
#[derive(Debug, Default)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    /// Pick `page` and `limit` out of decoded query pairs. A repeated key
    /// keeps its first value; other keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// Resolve to `(page, limit)`. Absent, non-numeric, zero, and negative
    /// values all resolve to the default.
    pub fn resolve(&self) -> (u64, u64) {
        (
            positive_or(self.page.as_deref(), DEFAULT_PAGE),
            positive_or(self.limit.as_deref(), DEFAULT_LIMIT),
        )
    }
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    match raw.and_then(|s| s.parse::<i64>().ok()) {
        Some(n) if n > 0 => n as u64,
        _ => default,
    }
}

/// Response envelope for a page of items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total_items: u64,
}

/// Slice `items` to the requested page. A zero `page` or `limit` is treated
/// as the default.
pub fn paginate<T>(items: Vec<T>, page: u64, limit: u64) -> Page<T> {
    let page = if page == 0 { DEFAULT_PAGE } else { page };
    let limit = if limit == 0 { DEFAULT_LIMIT } else { limit };
    let total_items = items.len();

    let start = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
    let end = usize::try_from(limit)
        .map_or(usize::MAX, |limit| start.saturating_add(limit))
        .min(total_items);

    // start >= total_items leaves end - start at zero.
    let items = items
        .into_iter()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect();

    Page {
        items,
        page,
        limit,
        total_items: total_items as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn from_pairs_keeps_first_of_repeated_keys() {
        let query = PageQuery::from_pairs(pairs(&[
            ("page", "1"),
            ("sort", "asc"),
            ("page", "2"),
            ("limit", "5"),
            ("limit", "abc"),
        ]));
        assert_eq!(query.page.as_deref(), Some("1"));
        assert_eq!(query.limit.as_deref(), Some("5"));
        assert_eq!(query.resolve(), (1, 5));
    }

    #[test]
    fn from_pairs_without_paging_keys() {
        let query = PageQuery::from_pairs(pairs(&[("q", "milk")]));
        assert_eq!(query.resolve(), (1, 10));
    }

    #[test]
    fn resolve_defaults_when_absent() {
        assert_eq!(query(None, None).resolve(), (1, 10));
    }

    #[test]
    fn resolve_defaults_invalid_values() {
        for bad in ["", "abc", "0", "-3", "1.5", " 2"] {
            assert_eq!(query(Some(bad), Some(bad)).resolve(), (1, 10), "{bad:?}");
        }
    }

    #[test]
    fn resolve_accepts_positive_values() {
        assert_eq!(query(Some("2"), Some("25")).resolve(), (2, 25));
        assert_eq!(query(Some("+3"), None).resolve(), (3, 10));
    }

    #[test]
    fn second_page_of_three() {
        let page = paginate(vec![1, 2, 3], 2, 2);
        assert_eq!(
            page,
            Page {
                items: vec![3],
                page: 2,
                limit: 2,
                total_items: 3
            }
        );
    }

    #[test]
    fn default_page_returns_everything_under_limit() {
        let page = paginate(vec!["a", "b", "c"], DEFAULT_PAGE, DEFAULT_LIMIT);
        assert_eq!(page.items, vec!["a", "b", "c"]);
        assert_eq!(page.total_items, 3);
    }

    #[test]
    fn out_of_range_page_is_empty_with_metadata() {
        let page = paginate(vec![1, 2, 3], 5, 2);
        assert!(page.items.is_empty());
        assert_eq!((page.page, page.limit, page.total_items), (5, 2, 3));
    }

    #[test]
    fn empty_listing() {
        let page = paginate(Vec::<u8>::new(), 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn zero_inputs_fall_back_to_defaults() {
        let page = paginate((0..15).collect::<Vec<_>>(), 0, 0);
        assert_eq!((page.page, page.limit), (1, 10));
        assert_eq!(page.items, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let page = paginate(vec![1, 2, 3], u64::MAX, u64::MAX);
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 3);
    }

    #[test]
    fn pages_are_contiguous_ordered_slices() {
        for len in 0..8usize {
            let items: Vec<usize> = (0..len).collect();
            for limit in 1..=4u64 {
                for page in 1..=5u64 {
                    let result = paginate(items.clone(), page, limit);
                    let start = ((page - 1) * limit) as usize;
                    let expected: Vec<usize> =
                        items.iter().copied().skip(start).take(limit as usize).collect();
                    assert!(result.items.len() as u64 <= limit);
                    assert_eq!(result.items, expected, "len={len} page={page} limit={limit}");
                    assert_eq!(result.total_items, len as u64);
                }
            }
        }
    }

    #[test]
    fn envelope_uses_camel_case_total() {
        let json = serde_json::to_value(paginate(vec![1], 1, 10)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"items": [1], "page": 1, "limit": 10, "totalItems": 1})
        );
    }
}
