/// Zero-based offset of a 1-based page. Pages below 1 have no window.
pub fn page_offset(page: i64, per_page: u64) -> Option<u64> {
    if page < 1 {
        return None;
    }
    (page as u64 - 1).checked_mul(per_page)
}

pub fn total_pages(total_docs: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total_docs.div_ceil(per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_one_based_pages() {
        assert_eq!(page_offset(1, 100), Some(0));
        assert_eq!(page_offset(3, 100), Some(200));
        assert_eq!(page_offset(0, 100), None);
        assert_eq!(page_offset(-4, 100), None);
        assert_eq!(page_offset(i64::MAX, u64::MAX), None);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 100), 0);
        assert_eq!(total_pages(1, 100), 1);
        assert_eq!(total_pages(100, 100), 1);
        assert_eq!(total_pages(101, 100), 2);
        assert_eq!(total_pages(5, 0), 0);
    }
}
