use serde::{Deserialize, Serialize};

use crate::errors::{ScheduleError, ScheduleResult};

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Rejects page numbers and sizes that are not positive, sizes above
/// [`MAX_PAGE_LIMIT`], and pages whose row offset does not fit in an `i64`.
pub fn check_page(page: i64, limit: i64) -> ScheduleResult<()> {
    if page < 1 {
        return Err(ScheduleError::InvalidInput(
            "Page must be at least 1".to_string(),
        ));
    }
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(ScheduleError::InvalidInput(format!(
            "Limit must be between 1 and {}",
            MAX_PAGE_LIMIT
        )));
    }
    if (page - 1).checked_mul(limit).is_none() {
        return Err(ScheduleError::InvalidInput(format!(
            "Page {} is out of range",
            page
        )));
    }
    Ok(())
}

/// Row offset of a page, saturating instead of overflowing.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit)
}

/// One page of results plus the bookkeeping a list view needs to navigate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationResult<T> {
    pub count: i64,
    pub total_page: i64,
    pub current_page: i64,
    pub per_page: i64,
    pub next_page: Option<i64>,
    pub previous_page: Option<i64>,
    pub data: Vec<T>,
}

impl<T> PaginationResult<T> {
    /// Builds a page from the slice that was fetched and the total row count.
    ///
    /// `page` and `limit` are expected to have been validated as positive.
    pub fn new(data: Vec<T>, count: i64, page: i64, limit: i64) -> Self {
        let total_page = if count <= 0 || limit <= 0 {
            0
        } else {
            (count - 1) / limit + 1
        };
        let next_page = (page < total_page).then_some(page + 1);
        let previous_page = (page > 1).then_some(page - 1);

        Self {
            count,
            total_page,
            current_page: page,
            per_page: limit,
            next_page,
            previous_page,
            data,
        }
    }
}
