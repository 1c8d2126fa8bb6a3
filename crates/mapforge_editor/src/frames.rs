//! Frame list editing for animated tiles

/// Ordered frame entries plus the asset selector they are edited through.
///
/// While an entry is active the selector writes through to it. Without an
/// active entry the selector only holds the value the next added frame starts
/// with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameListEditor {
    entries: Vec<String>,
    active: Option<usize>,
    selector: String,
}

impl FrameListEditor {
    pub fn new(frames: Vec<String>) -> Self {
        Self {
            entries: frames,
            active: None,
            selector: String::new(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_entry(&self) -> Option<&str> {
        self.active
            .and_then(|index| self.entries.get(index))
            .map(String::as_str)
    }

    /// Current value of the asset selector
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Change the selector value, updating the active entry if there is one
    pub fn set_selector(&mut self, value: impl Into<String>) {
        self.selector = value.into();
        if let Some(entry) = self.active.and_then(|index| self.entries.get_mut(index)) {
            entry.clone_from(&self.selector);
        }
    }

    /// Insert a frame after the active one (or first) holding the selector
    /// value, and make it active. Returns its position.
    pub fn add_frame(&mut self) -> usize {
        let index = self.active.map_or(0, |active| active + 1);
        self.entries.insert(index, self.selector.clone());
        self.active = Some(index);
        index
    }

    /// Remove the active frame and clear the selector.
    ///
    /// Returns the removed value, or `None` when no frame was active.
    pub fn remove_active(&mut self) -> Option<String> {
        let index = self.active.take()?;
        self.selector.clear();
        Some(self.entries.remove(index))
    }

    /// Make the frame at `index` active and show it in the selector
    pub fn select(&mut self, index: usize) -> bool {
        let Some(entry) = self.entries.get(index) else {
            return false;
        };
        self.selector.clone_from(entry);
        self.active = Some(index);
        true
    }

    pub fn deselect(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_without_active_inserts_at_start() {
        let mut editor = FrameListEditor::new(frames(&["b.png", "c.png"]));
        editor.set_selector("a.png");

        assert_eq!(editor.add_frame(), 0);
        assert_eq!(editor.entries(), frames(&["a.png", "b.png", "c.png"]));
        assert_eq!(editor.active(), Some(0));
    }

    #[test]
    fn test_add_inserts_after_active_with_selector_content() {
        let mut editor = FrameListEditor::new(frames(&["a.png", "c.png"]));
        assert!(editor.select(0));
        assert_eq!(editor.selector(), "a.png");

        assert_eq!(editor.add_frame(), 1);
        assert_eq!(editor.entries(), frames(&["a.png", "a.png", "c.png"]));

        // The new entry is active, so the selector now edits it
        editor.set_selector("b.png");
        assert_eq!(editor.entries(), frames(&["a.png", "b.png", "c.png"]));
    }

    #[test]
    fn test_selector_writes_through_only_to_active_entry() {
        let mut editor = FrameListEditor::new(frames(&["a.png", "b.png"]));
        editor.set_selector("ignored.png");
        assert_eq!(editor.entries(), frames(&["a.png", "b.png"]));

        editor.select(1);
        editor.set_selector("z.png");
        assert_eq!(editor.entries(), frames(&["a.png", "z.png"]));

        editor.select(0);
        editor.set_selector("y.png");
        assert_eq!(editor.entries(), frames(&["y.png", "z.png"]));
    }

    #[test]
    fn test_remove_active_clears_selector() {
        let mut editor = FrameListEditor::new(frames(&["a.png", "b.png"]));
        editor.select(0);

        assert_eq!(editor.remove_active(), Some("a.png".to_string()));
        assert_eq!(editor.entries(), frames(&["b.png"]));
        assert_eq!(editor.active(), None);
        assert_eq!(editor.selector(), "");

        // Nothing active any more
        assert_eq!(editor.remove_active(), None);
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut editor = FrameListEditor::new(frames(&["a.png"]));
        assert!(!editor.select(3));
        assert_eq!(editor.active(), None);
    }
}
