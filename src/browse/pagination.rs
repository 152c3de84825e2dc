#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageIntent {
    Next,
    Prev,
    Page(usize),
}

/// Number of pages needed for `total` items; never less than 1.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    total.div_ceil(per_page).max(1)
}

/// Map a navigation intent to a page inside `[1, max_page]`.
pub fn resolve_intent(intent: PageIntent, current_page: usize, max_page: usize) -> usize {
    let max_page = max_page.max(1);
    let target = match intent {
        PageIntent::Next => current_page.saturating_add(1),
        PageIntent::Prev => current_page.saturating_sub(1),
        PageIntent::Page(n) => n,
    };
    target.clamp(1, max_page)
}
