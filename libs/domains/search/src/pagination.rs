/// First page is 1
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Offset of the first item on `page`; page 0 is read as page 1
pub fn offset(page: u32, limit: u32) -> usize {
    (page.max(1) as usize - 1).saturating_mul(limit as usize)
}

/// Slice `[offset, offset + limit)` out of `items`
pub fn paginate<T>(items: Vec<T>, page: u32, limit: u32) -> Vec<T> {
    items
        .into_iter()
        .skip(offset(page, limit))
        .take(limit as usize)
        .collect()
}
