// Growable prefix over a filtered result list.

pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationStrategy {
    /// Each "show more" reveals another page.
    #[default]
    Incremental,
    /// The first "show more" reveals everything.
    RevealAll,
}

/// Tracks how many filtered results are exposed.
///
/// Invariant: `visible_count <= total` and the exposed items are always
/// `filtered[..visible_count]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationWindow {
    page_size: usize,
    strategy: PaginationStrategy,
    visible_count: usize,
    total: usize,
    revealed_all: bool,
}

impl PaginationWindow {
    pub fn new(page_size: usize, strategy: PaginationStrategy) -> Self {
        Self {
            page_size: page_size.max(1),
            strategy,
            visible_count: 0,
            total: 0,
            revealed_all: false,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn strategy(&self) -> PaginationStrategy {
        self.strategy
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Exposes the first page of a freshly filtered list of `total` items.
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.visible_count = total.min(self.page_size);
        self.revealed_all = false;
    }

    pub fn show_more(&mut self) {
        self.visible_count = (self.visible_count + self.page_size).min(self.total);
    }

    pub fn show_all(&mut self) {
        self.visible_count = self.total;
        self.revealed_all = true;
    }

    /// The page's "show more" action, per its strategy.
    pub fn advance(&mut self) {
        match self.strategy {
            PaginationStrategy::Incremental => self.show_more(),
            PaginationStrategy::RevealAll => self.show_all(),
        }
    }

    /// Whether a "show more" affordance should be offered.
    pub fn has_more(&self) -> bool {
        match self.strategy {
            PaginationStrategy::Incremental => self.visible_count < self.total,
            PaginationStrategy::RevealAll => !self.revealed_all && self.total > self.page_size,
        }
    }

    pub fn slice<'a, T>(&self, filtered: &'a [T]) -> &'a [T] {
        &filtered[..self.visible_count.min(filtered.len())]
    }
}

impl Default for PaginationWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, PaginationStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incremental_growth_clamps() {
        let mut w = PaginationWindow::new(12, PaginationStrategy::Incremental);
        w.reset(30);
        assert_eq!(w.visible_count(), 12);
        w.advance();
        assert_eq!(w.visible_count(), 24);
        assert!(w.has_more());
        w.advance();
        assert_eq!(w.visible_count(), 30);
        assert!(!w.has_more());
        w.advance();
        assert_eq!(w.visible_count(), 30);
    }

    #[test]
    fn test_reveal_all() {
        let mut w = PaginationWindow::new(12, PaginationStrategy::RevealAll);
        w.reset(13);
        assert!(w.has_more());
        w.advance();
        assert_eq!(w.visible_count(), 13);
        assert!(!w.has_more());

        w.reset(5);
        assert_eq!(w.visible_count(), 5);
        assert!(!w.has_more());
    }

    #[test]
    fn test_slice_is_prefix() {
        let items = [1, 2, 3, 4, 5];
        let mut w = PaginationWindow::new(2, PaginationStrategy::Incremental);
        w.reset(items.len());
        assert_eq!(w.slice(&items), &[1, 2]);
        w.show_more();
        assert_eq!(w.slice(&items), &[1, 2, 3, 4]);
    }
}
