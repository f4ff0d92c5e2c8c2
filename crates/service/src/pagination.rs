//! Pagination utilities for service layer
//!
//! Turns the `size` / `page` / `sortBy` / `sortDirection` entries of a
//! criteria map into a [`PageRequest`], and carries query results back as a
//! [`Page`].

use common::types::Criteria;
use serde::Serialize;

use crate::errors::ServiceError;

pub const SIZE_KEY: &str = "size";
pub const PAGE_KEY: &str = "page";
pub const SORT_BY_KEY: &str = "sortBy";
pub const SORT_DIRECTION_KEY: &str = "sortDirection";

pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// True for criteria keys consumed by [`parse_page_request`]; query builders skip them.
pub fn is_pagination_key(key: &str) -> bool {
    matches!(key, SIZE_KEY | PAGE_KEY | SORT_BY_KEY | SORT_DIRECTION_KEY)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

/// Page parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index
    pub page: u64,
    /// items per page, at least 1
    pub size: u64,
    pub sort: Option<Sort>,
}

impl PageRequest {
    pub fn of_size(size: u64) -> Self { Self { page: 0, size, sort: None } }

    pub fn of(page: u64, size: u64) -> Self { Self { page, size, sort: None } }

    pub fn sorted(mut self, property: impl Into<String>, direction: Direction) -> Self {
        self.sort = Some(Sort { property: property.into(), direction });
        self
    }

    pub fn offset(&self) -> u64 { self.page.saturating_mul(self.size) }
}

impl Default for PageRequest {
    fn default() -> Self { Self::of_size(DEFAULT_PAGE_SIZE) }
}

fn non_empty<'a>(criteria: &'a Criteria, key: &str) -> Option<&'a str> {
    criteria.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// Page numbers and sizes are 32-bit signed, so `page * size` always fits
/// the 64-bit offset handed to the database.
fn parse_number(key: &str, raw: &str) -> Result<u64, ServiceError> {
    let n = raw
        .parse::<i32>()
        .map_err(|e| ServiceError::InvalidArgument(format!("criteria [{key}] is not a valid page number [{raw}]: {e}")))?;
    u64::try_from(n).map_err(|_| ServiceError::InvalidArgument(format!("criteria [{key}] must not be negative [{raw}]")))
}

fn parse_size(raw: &str) -> Result<u64, ServiceError> {
    let size = parse_number(SIZE_KEY, raw)?;
    if size == 0 {
        return Err(ServiceError::InvalidArgument("page size must not be less than one".into()));
    }
    Ok(size)
}

/// Build a page request from criteria.
///
/// - no `size`: default size, first page, unsorted
/// - `size` without `page`: first page of that size, unsorted
/// - `size` and `page` without both sort keys: that page, unsorted
/// - everything present: sorted ascending only for `sortDirection == "ASC"`
pub fn parse_page_request(criteria: &Criteria) -> Result<PageRequest, ServiceError> {
    let Some(size) = non_empty(criteria, SIZE_KEY) else {
        return Ok(PageRequest::default());
    };
    let size = parse_size(size)?;

    let Some(page) = non_empty(criteria, PAGE_KEY) else {
        return Ok(PageRequest::of_size(size));
    };
    let request = PageRequest::of(parse_number(PAGE_KEY, page)?, size);

    match (non_empty(criteria, SORT_BY_KEY), non_empty(criteria, SORT_DIRECTION_KEY)) {
        (Some(sort_by), Some(direction)) => {
            let direction = if direction == "ASC" { Direction::Asc } else { Direction::Desc };
            Ok(request.sorted(sort_by, direction))
        }
        _ => Ok(request),
    }
}

/// One page of results plus the metadata of the query that produced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self { content, page: request.page, size: request.size, total_elements }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 { 0 } else { self.total_elements.div_ceil(self.size) }
    }

    pub fn is_empty(&self) -> bool { self.content.is_empty() }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::criteria;

    #[test]
    fn empty_criteria_uses_defaults() {
        let req = parse_page_request(&Criteria::new()).unwrap();
        assert_eq!(req, PageRequest { page: 0, size: 50, sort: None });
    }

    #[test]
    fn empty_size_counts_as_absent() {
        let req = parse_page_request(&criteria([("size", ""), ("page", "3")])).unwrap();
        assert_eq!(req, PageRequest::default());
    }

    #[test]
    fn size_without_page_starts_at_zero() {
        let req = parse_page_request(&criteria([("size", "10"), ("sortBy", "name"), ("sortDirection", "ASC")])).unwrap();
        assert_eq!(req, PageRequest { page: 0, size: 10, sort: None });
    }

    #[test]
    fn sort_needs_both_keys() {
        let req = parse_page_request(&criteria([("size", "10"), ("page", "2"), ("sortBy", "name")])).unwrap();
        assert_eq!(req, PageRequest::of(2, 10));

        let req = parse_page_request(&criteria([("size", "10"), ("page", "2"), ("sortBy", ""), ("sortDirection", "ASC")])).unwrap();
        assert!(req.sort.is_none());
    }

    #[test]
    fn full_criteria_sorts_ascending_on_exact_asc() {
        let req = parse_page_request(&criteria([("size", "10"), ("page", "2"), ("sortBy", "name"), ("sortDirection", "ASC")])).unwrap();
        assert_eq!(req.page, 2);
        assert_eq!(req.size, 10);
        assert_eq!(req.sort, Some(Sort { property: "name".into(), direction: Direction::Asc }));
    }

    #[test]
    fn any_other_direction_sorts_descending() {
        for dir in ["DESC", "asc", "Asc", "up", " ASC"] {
            let req = parse_page_request(&criteria([("size", "10"), ("page", "2"), ("sortBy", "name"), ("sortDirection", dir)])).unwrap();
            assert_eq!(req.sort.unwrap().direction, Direction::Desc, "direction {dir:?}");
        }
    }

    #[test]
    fn malformed_numbers_are_invalid_arguments() {
        for c in [
            criteria([("size", "ten")]),
            criteria([("size", "-1")]),
            criteria([("size", "0")]),
            criteria([("size", "10"), ("page", "two")]),
            criteria([("size", "10"), ("page", "-2")]),
        ] {
            assert!(matches!(parse_page_request(&c), Err(ServiceError::InvalidArgument(_))), "{c:?}");
        }
    }

    #[test]
    fn numbers_beyond_i32_are_invalid_arguments() {
        for c in [
            criteria([("size", "18446744073709551615")]),
            criteria([("size", "2147483648")]),
            criteria([("size", "10"), ("page", "18446744073709551615")]),
            criteria([("size", "10"), ("page", "2147483648")]),
        ] {
            assert!(matches!(parse_page_request(&c), Err(ServiceError::InvalidArgument(_))), "{c:?}");
        }

        let req = parse_page_request(&criteria([("size", "2147483647"), ("page", "2147483647")])).unwrap();
        assert_eq!(req.offset(), 2_147_483_647u64 * 2_147_483_647);
    }

    #[test]
    fn pagination_keys_are_recognised() {
        assert!(is_pagination_key("size"));
        assert!(is_pagination_key("sortDirection"));
        assert!(!is_pagination_key("name"));
    }

    #[test]
    fn page_metadata_survives_map() {
        let page = Page::new(vec![1, 2, 3], &PageRequest::of(1, 3), 7);
        assert_eq!(page.total_pages(), 3);
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.content, vec!["1", "2", "3"]);
        assert_eq!((mapped.page, mapped.size, mapped.total_elements), (1, 3, 7));
        assert_eq!(PageRequest::of(2, 10).offset(), 20);
    }
}
