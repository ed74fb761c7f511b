//! Selected / highlighted object state.

/// Which object receives recorded waypoints and which one is outlined.
///
/// Picks set both together, so at most one object is ever selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<usize>,
    highlighted: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[inline]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    #[inline]
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted == Some(index)
    }

    /// Apply a pick hit. Hitting the selected object again deselects it;
    /// any other hit selects and highlights only that object.
    ///
    /// Returns the new selection.
    pub fn toggle(&mut self, hit: usize) -> Option<usize> {
        if self.selected == Some(hit) {
            self.clear();
        } else {
            self.selected = Some(hit);
            self.highlighted = Some(hit);
        }
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.highlighted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unset() {
        let s = Selection::new();
        assert_eq!(s.selected(), None);
        assert_eq!(s.highlighted(), None);
    }

    #[test]
    fn test_toggle_same_clears() {
        let mut s = Selection::new();
        assert_eq!(s.toggle(1), Some(1));
        assert!(s.is_highlighted(1));
        assert_eq!(s.toggle(1), None);
        assert_eq!(s.highlighted(), None);
    }

    #[test]
    fn test_toggle_other_replaces() {
        let mut s = Selection::new();
        s.toggle(0);
        assert_eq!(s.toggle(1), Some(1));
        assert!(!s.is_highlighted(0));
        assert!(s.is_highlighted(1));
    }
}
