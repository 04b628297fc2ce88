//! Fixed-size paging over ordered sequences.
//!
//! Listings and search results are paged the same way. The page position
//! is a [`PaginationState`] value: callers pass it in and get the updated
//! value back instead of mutating shared state.

pub const PAGE_SIZE: usize = 9;

/// Number of pages needed for `total_items`; never less than one.
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

/// The 1-based `page` of `items`. Pages outside the range are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page: usize,
    pub pages: usize,
}

impl PaginationState {
    /// First page of a collection holding `total_items`.
    pub fn new(total_items: usize) -> Self {
        Self {
            page: 1,
            pages: page_count(total_items, PAGE_SIZE),
        }
    }

    /// Recomputes the page count, keeping the current page when it still
    /// exists and moving to the last page otherwise.
    pub fn with_total(self, total_items: usize) -> Self {
        let pages = page_count(total_items, PAGE_SIZE);
        Self {
            page: self.page.clamp(1, pages),
            pages,
        }
    }

    /// Jumps to `page`, staying put if it does not exist.
    pub fn goto(self, page: usize) -> Self {
        if (1..=self.pages).contains(&page) {
            Self { page, ..self }
        } else {
            self
        }
    }

    pub fn next(self) -> Self {
        self.goto(self.page + 1)
    }

    pub fn prev(self) -> Self {
        self.goto(self.page.saturating_sub(1))
    }

    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.pages
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page, PAGE_SIZE)
    }
}

impl std::fmt::Display for PaginationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.page, self.pages)
    }
}
