//! Query vocabulary shared by every repository
//!
//! Filters are entity specific (see [`crate::inputs`]); ordering, paging and
//! group-by rows are the same everywhere.

use serde::{Deserialize, Serialize};

/// Direction of an ORDER BY
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Offset pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub take: i64,
    pub skip: i64,
}

impl Page {
    pub const DEFAULT_TAKE: i64 = 100;
    pub const MAX_TAKE: i64 = 1000;

    /// `take` is clamped to 1..=1000 and `skip` to >= 0
    pub fn new(take: i64, skip: i64) -> Self {
        Self {
            take: take.clamp(1, Self::MAX_TAKE),
            skip: skip.max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TAKE, 0)
    }
}

/// Arguments of a `find_many` call
#[derive(Debug, Clone, Default)]
pub struct FindMany<F, O> {
    pub filter: F,
    pub order_by: O,
    pub order: SortOrder,
    /// `None` returns every matching row
    pub page: Option<Page>,
}

impl<F, O: Default> FindMany<F, O> {
    pub fn new(filter: F) -> Self {
        Self {
            filter,
            order_by: O::default(),
            order: SortOrder::Asc,
            page: Some(Page::default()),
        }
    }

    pub fn order_by(mut self, order_by: O, order: SortOrder) -> Self {
        self.order_by = order_by;
        self.order = order;
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    /// Drop the LIMIT; for lists that are bounded by their filter
    pub fn unpaged(mut self) -> Self {
        self.page = None;
        self
    }
}

/// One row of a `group_by` result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount<K> {
    pub key: K,
    pub count: i64,
}

/// Patch field for a nullable column: `None` keeps, `Some(None)` clears
pub type Nullable<T> = Option<Option<T>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_clamped() {
        assert_eq!(Page::new(0, -5), Page { take: 1, skip: 0 });
        assert_eq!(Page::new(5000, 10).take, Page::MAX_TAKE);
        assert_eq!(Page::default().take, 100);
    }

    #[test]
    fn test_find_many_builder() {
        #[derive(Debug, Default, PartialEq)]
        enum Col {
            #[default]
            Id,
            Name,
        }

        let q: FindMany<(), Col> = FindMany::new(())
            .order_by(Col::Name, SortOrder::Desc)
            .page(Page::new(10, 20));
        assert_eq!(q.order_by, Col::Name);
        assert_eq!(q.order.as_sql(), "DESC");
        assert_eq!(q.page.map(|p| p.skip), Some(20));

        let all: FindMany<(), Col> = FindMany::new(()).unpaged();
        assert_eq!(all.page, None);
    }
}
