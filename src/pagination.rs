use serde::Deserialize;

/// `pageNo` query parameter used by every paginated listing. Missing or
/// non-positive values mean "no pagination requested".
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(rename = "pageNo", default)]
    pub page_no: i64,
}

/// The skip/limit window for one page, plus the page count for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    /// `None` means the caller returns the full, unpaginated result set.
    pub limit: Option<i64>,
    pub total_pages: u64,
}

/// Computes the window for `page_no` over `total_count` records.
///
/// `total_pages` is always `ceil(total_count / page_size)`. A `page_no` of
/// zero or less requests the whole set. A `page_no` past the last page is not
/// clamped: the window lands beyond the data and the caller returns an empty
/// page alongside the true `total_pages`.
pub fn paginate(total_count: u64, page_size: u64, page_no: i64) -> Page {
    let total_pages = total_count.div_ceil(page_size);

    if page_no <= 0 {
        return Page {
            skip: 0,
            limit: None,
            total_pages,
        };
    }

    Page {
        skip: page_size.saturating_mul(page_no as u64 - 1),
        limit: Some(page_size as i64),
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_means_no_pagination() {
        let page = paginate(100, 12, 0);
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, None);
        assert_eq!(page.total_pages, 9);
    }

    #[test]
    fn first_page() {
        let page = paginate(100, 12, 1);
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, Some(12));
        assert_eq!(page.total_pages, 9);
    }

    #[test]
    fn final_partial_page() {
        // 100 records at 12 per page: page 9 holds the last 4.
        let page = paginate(100, 12, 9);
        assert_eq!(page.skip, 96);
        assert_eq!(page.limit, Some(12));
        assert_eq!(page.total_pages, 9);
    }

    #[test]
    fn page_past_the_end_is_not_clamped() {
        let page = paginate(100, 12, 10);
        assert_eq!(page.skip, 108);
        assert_eq!(page.limit, Some(12));
        assert_eq!(page.total_pages, 9);
    }

    #[test]
    fn item_listing_second_page() {
        // 25 items at the main listing size of 18: page 2 holds 7.
        let page = paginate(25, 18, 2);
        assert_eq!(page.skip, 18);
        assert_eq!(page.limit, Some(18));
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn empty_collection() {
        let page = paginate(0, 12, 1);
        assert_eq!(page.skip, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn negative_page_means_no_pagination() {
        let page = paginate(40, 12, -3);
        assert_eq!(page.limit, None);
        assert_eq!(page.total_pages, 4);
    }
}
