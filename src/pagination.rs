use serde::Deserialize;

/// 列表页查询参数；page 保持为字符串，非法值按第一页处理
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// 分页状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// 当前页，从1开始
    pub page: u32,
    pub per_page: u32,
    pub offset: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: Option<&str>, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let page = page
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        Self {
            page,
            per_page,
            offset: (page - 1).saturating_mul(per_page),
            total_items: 0,
            total_pages: 1,
        }
    }

    /// 根据总数计算页数，至少一页
    pub fn calculate_pages(&mut self, total_items: i64) {
        let total_items = total_items.max(0);
        let per_page = i64::from(self.per_page);
        self.total_items = total_items;
        self.total_pages = (((total_items + per_page - 1) / per_page).max(1)) as u32;
    }

    pub fn prev_page(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.total_pages).then(|| self.page + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_and_offset() {
        let p = Pagination::new(Some("3"), 10);
        assert_eq!(p.page, 3);
        assert_eq!(p.offset, 20);

        for junk in [None, Some(""), Some("0"), Some("-2"), Some("abc")] {
            let p = Pagination::new(junk, 10);
            assert_eq!(p.page, 1, "input {:?}", junk);
            assert_eq!(p.offset, 0);
        }
    }

    #[test]
    fn test_calculate_pages() {
        let mut p = Pagination::new(Some("1"), 10);
        p.calculate_pages(0);
        assert_eq!(p.total_pages, 1);

        p.calculate_pages(10);
        assert_eq!(p.total_pages, 1);

        p.calculate_pages(11);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.total_items, 11);
    }

    #[test]
    fn test_prev_next() {
        let mut p = Pagination::new(Some("2"), 10);
        p.calculate_pages(25);
        assert_eq!(p.prev_page(), Some(1));
        assert_eq!(p.next_page(), Some(3));

        let mut last = Pagination::new(Some("3"), 10);
        last.calculate_pages(25);
        assert_eq!(last.next_page(), None);

        let first = Pagination::new(None, 10);
        assert_eq!(first.prev_page(), None);
    }
}
