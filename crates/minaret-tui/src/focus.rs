//! FocusRing — manages keyboard focus cycling between components.

use crate::action::ComponentId;

pub struct FocusRing {
    items: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<ComponentId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.items.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = if self.current == 0 {
            self.items.len() - 1
        } else {
            self.current - 1
        };
        self.current()
    }

    pub fn set(&mut self, id: ComponentId) {
        if let Some(pos) = self.items.iter().position(|&x| x == id) {
            self.current = pos;
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current() == Some(id)
    }

    /// Replace the ring contents (drawer opened/closed).
    /// Keeps the same focused id when it is still present.
    pub fn set_items(&mut self, items: Vec<ComponentId>) {
        let old = self.current();
        self.items = items;
        if let Some(id) = old {
            if let Some(pos) = self.items.iter().position(|&x| x == id) {
                self.current = pos;
                return;
            }
        }
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        let mut ring = FocusRing::new(vec![ComponentId::FeatureCards, ComponentId::StationList]);
        assert_eq!(ring.next(), Some(ComponentId::StationList));
        assert_eq!(ring.next(), Some(ComponentId::FeatureCards));
        assert_eq!(ring.prev(), Some(ComponentId::StationList));
    }

    #[test]
    fn test_set_items_keeps_focus() {
        let mut ring = FocusRing::new(vec![ComponentId::FeatureCards, ComponentId::StationList]);
        ring.set(ComponentId::StationList);
        ring.set_items(vec![
            ComponentId::Drawer,
            ComponentId::FeatureCards,
            ComponentId::StationList,
        ]);
        assert!(ring.is_focused(ComponentId::StationList));

        ring.set_items(vec![ComponentId::Drawer]);
        assert!(ring.is_focused(ComponentId::Drawer));
    }
}
