//! Cursor and scroll bookkeeping for a list of rows.

pub struct ScrollableList<T> {
    pub items: Vec<T>,
    pub selected: usize,
    pub scroll_offset: usize,
}

impl<T> ScrollableList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            scroll_offset: 0,
        }
    }

    /// Replace the rows, keeping the cursor on the row `same` picks out when
    /// it is still present.
    pub fn set_items_keep(&mut self, items: Vec<T>, same: impl Fn(&T, &T) -> bool) {
        let keep = self
            .items
            .get(self.selected)
            .and_then(|old| items.iter().position(|new| same(old, new)));
        self.items = items;
        match keep {
            Some(pos) => self.selected = pos,
            None => self.clamp(),
        }
    }

    fn clamp(&mut self) {
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
        if self.scroll_offset > self.selected {
            self.scroll_offset = self.selected;
        }
    }

    pub fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + n).min(self.items.len() - 1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    /// Rows visible in `height` lines. Call `ensure_visible` first.
    pub fn visible_items(&self, height: usize) -> &[T] {
        if height == 0 || self.items.is_empty() {
            return &[];
        }
        let start = self.scroll_offset.min(self.items.len());
        let end = (start + height).min(self.items.len());
        &self.items[start..end]
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
    }

    /// Index of the cursor within the visible window.
    pub fn selected_in_view(&self) -> usize {
        self.selected.saturating_sub(self.scroll_offset)
    }

}

impl<T> Default for ScrollableList<T> {
    fn default() -> Self {
        Self::new()
    }
}
