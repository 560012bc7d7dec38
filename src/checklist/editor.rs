//! Checklist Editor State
//!
//! Working list of the active version's items plus the unsaved-order flag.
//! Every reorder is a permutation of the loaded list; membership only changes on load.

use leptos_dragdrop::Placement;

use crate::models::{sort_items, ChecklistItem, ChecklistSnapshot};

/// Keyboard reorder commands on a row handle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Up,
    Down,
    Home,
    End,
}

impl KeyCommand {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(KeyCommand::Up),
            "ArrowDown" => Some(KeyCommand::Down),
            "Home" => Some(KeyCommand::Home),
            "End" => Some(KeyCommand::End),
            _ => None,
        }
    }
}

/// In-progress drag: the row being dragged and the order before the drag began
#[derive(Clone, Debug, PartialEq)]
struct DragSession {
    code: String,
    origin: Vec<String>,
}

/// Editable checklist of the active version
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChecklistEditor {
    items: Vec<ChecklistItem>,
    dirty: bool,
    can_edit: bool,
    loaded: bool,
    version_id: Option<i64>,
    version_name: Option<String>,
    drag: Option<DragSession>,
}

impl ChecklistEditor {
    pub fn new(can_edit: bool) -> Self {
        Self {
            can_edit,
            ..Default::default()
        }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    pub fn set_can_edit(&mut self, can_edit: bool) {
        self.can_edit = can_edit;
    }

    /// Whether at least one load has succeeded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn version_id(&self) -> Option<i64> {
        self.version_id
    }

    pub fn version_name(&self) -> Option<&str> {
        self.version_name.as_deref()
    }

    pub fn can_save(&self) -> bool {
        self.can_edit && self.dirty
    }

    /// Codes in current working order
    pub fn codes(&self) -> Vec<String> {
        self.items.iter().map(|i| i.code.clone()).collect()
    }

    pub fn position_of(&self, code: &str) -> Option<usize> {
        self.items.iter().position(|i| i.code == code)
    }

    pub fn find(&self, code: &str) -> Option<&ChecklistItem> {
        self.items.iter().find(|i| i.code == code)
    }

    /// Replace the working list with a fresh server snapshot
    pub fn replace(&mut self, snapshot: ChecklistSnapshot) {
        self.items = sort_items(snapshot.items);
        if snapshot.version_id.is_some() {
            self.version_id = snapshot.version_id;
        }
        self.version_name = snapshot.version_name;
        self.loaded = true;
        self.dirty = false;
        self.drag = None;
    }

    /// A failed load only clears the list when nothing was ever loaded
    pub fn load_failed(&mut self) {
        if !self.loaded {
            self.items.clear();
        }
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Move an item from one index to another.
    /// Returns the moved item's new index, or None when nothing changed.
    pub fn move_item(&mut self, from: usize, to: usize) -> Option<usize> {
        if !self.can_edit || from >= self.items.len() || to >= self.items.len() || from == to {
            return None;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.dirty = true;
        Some(to)
    }

    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        let to = index.checked_sub(1)?;
        self.move_item(index, to)
    }

    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        self.move_item(index, index + 1)
    }

    pub fn move_to_start(&mut self, index: usize) -> Option<usize> {
        self.move_item(index, 0)
    }

    pub fn move_to_end(&mut self, index: usize) -> Option<usize> {
        let last = self.items.len().checked_sub(1)?;
        self.move_item(index, last)
    }

    pub fn apply_key(&mut self, index: usize, command: KeyCommand) -> Option<usize> {
        match command {
            KeyCommand::Up => self.move_up(index),
            KeyCommand::Down => self.move_down(index),
            KeyCommand::Home => self.move_to_start(index),
            KeyCommand::End => self.move_to_end(index),
        }
    }

    // ========================
    // Drag and drop
    // ========================

    pub fn dragging(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.code.as_str())
    }

    /// Start dragging a row. Returns false for read-only lists or unknown codes.
    pub fn begin_drag(&mut self, code: &str) -> bool {
        if !self.can_edit || self.position_of(code).is_none() {
            return false;
        }
        self.drag = Some(DragSession {
            code: code.to_string(),
            origin: self.codes(),
        });
        true
    }

    /// Live reorder while hovering `target`. Does not touch the dirty flag.
    pub fn drag_over(&mut self, target: &str, placement: Placement) -> bool {
        let Some(code) = self.drag.as_ref().map(|d| d.code.clone()) else { return false };
        if code == target {
            return false;
        }
        let (Some(from), Some(_)) = (self.position_of(&code), self.position_of(target)) else {
            return false;
        };
        let item = self.items.remove(from);
        // Target index is taken after removal so neighbours resolve correctly
        let anchor = self.position_of(target).unwrap_or(self.items.len());
        let at = match placement {
            Placement::Before => anchor,
            Placement::After => anchor + 1,
        };
        let at = at.min(self.items.len());
        self.items.insert(at, item);
        at != from
    }

    /// Commit the drag. Sets the dirty flag when the order differs from before the drag.
    pub fn finish_drag(&mut self) -> bool {
        let Some(session) = self.drag.take() else { return false };
        let changed = self.codes() != session.origin;
        if changed {
            self.dirty = true;
        }
        changed
    }

    /// Abort the drag and restore the order from before it began
    pub fn cancel_drag(&mut self) {
        let Some(session) = self.drag.take() else { return };
        let mut restored = Vec::with_capacity(self.items.len());
        for code in &session.origin {
            if let Some(pos) = self.items.iter().position(|i| &i.code == code) {
                restored.push(self.items.remove(pos));
            }
        }
        restored.append(&mut self.items);
        self.items = restored;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(codes: &[&str]) -> ChecklistEditor {
        let mut ed = ChecklistEditor::new(true);
        ed.replace(ChecklistSnapshot {
            version_id: Some(1),
            version_name: Some("2025".into()),
            items: codes
                .iter()
                .enumerate()
                .map(|(i, c)| ChecklistItem::new(c, &c.to_uppercase(), i as i64 + 1))
                .collect(),
            is_active: None,
        });
        ed
    }

    fn sorted(mut codes: Vec<String>) -> Vec<String> {
        codes.sort();
        codes
    }

    #[test]
    fn test_move_down_first() {
        let mut ed = editor(&["a", "b", "c"]);
        assert_eq!(ed.move_down(0), Some(1));
        assert_eq!(ed.codes(), ["b", "a", "c"]);
        assert!(ed.is_dirty());
        assert!(ed.can_save());
    }

    #[test]
    fn test_boundary_moves_are_noops() {
        let mut ed = editor(&["a", "b", "c"]);
        assert_eq!(ed.move_up(0), None);
        assert_eq!(ed.move_down(2), None);
        assert_eq!(ed.move_to_start(0), None);
        assert_eq!(ed.move_to_end(2), None);
        assert_eq!(ed.codes(), ["a", "b", "c"]);
        assert!(!ed.is_dirty());
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut ed = editor(&["a", "b"]);
        assert_eq!(ed.move_down(5), None);
        assert_eq!(ed.move_up(5), None);
        let mut empty = editor(&[]);
        assert_eq!(empty.move_to_end(0), None);
    }

    #[test]
    fn test_home_end_extract_and_reinsert() {
        let mut ed = editor(&["a", "b", "c", "d"]);
        assert_eq!(ed.apply_key(2, KeyCommand::Home), Some(0));
        assert_eq!(ed.codes(), ["c", "a", "b", "d"]);
        assert_eq!(ed.apply_key(1, KeyCommand::End), Some(3));
        assert_eq!(ed.codes(), ["c", "b", "d", "a"]);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyCommand::from_key("ArrowUp"), Some(KeyCommand::Up));
        assert_eq!(KeyCommand::from_key("ArrowDown"), Some(KeyCommand::Down));
        assert_eq!(KeyCommand::from_key("Home"), Some(KeyCommand::Home));
        assert_eq!(KeyCommand::from_key("End"), Some(KeyCommand::End));
        assert_eq!(KeyCommand::from_key("Enter"), None);
    }

    #[test]
    fn test_dirty_stays_after_noop() {
        let mut ed = editor(&["a", "b", "c"]);
        ed.move_down(0);
        assert_eq!(ed.move_up(0), None);
        assert!(ed.is_dirty());
    }

    #[test]
    fn test_read_only_refuses_moves_and_drags() {
        let mut ed = editor(&["a", "b"]);
        ed.set_can_edit(false);
        assert_eq!(ed.move_down(0), None);
        assert!(!ed.begin_drag("a"));
        assert_eq!(ed.codes(), ["a", "b"]);
        assert!(!ed.is_dirty());
    }

    #[test]
    fn test_save_requires_dirty_and_rights() {
        let mut ed = editor(&["a", "b"]);
        assert!(!ed.can_save());
        ed.move_down(0);
        ed.set_can_edit(false);
        assert!(!ed.can_save());
    }

    #[test]
    fn test_drag_before_and_after() {
        let mut ed = editor(&["a", "b", "c", "d"]);
        assert!(ed.begin_drag("a"));
        assert!(ed.drag_over("c", Placement::After));
        assert_eq!(ed.codes(), ["b", "c", "a", "d"]);
        assert!(!ed.is_dirty());
        assert!(ed.drag_over("b", Placement::Before));
        assert_eq!(ed.codes(), ["a", "b", "c", "d"]);
        assert!(ed.drag_over("d", Placement::After));
        assert_eq!(ed.codes(), ["b", "c", "d", "a"]);
        assert!(ed.finish_drag());
        assert!(ed.is_dirty());
        assert_eq!(ed.dragging(), None);
    }

    #[test]
    fn test_drag_back_to_origin_is_clean() {
        let mut ed = editor(&["a", "b", "c"]);
        ed.begin_drag("b");
        ed.drag_over("a", Placement::Before);
        ed.drag_over("c", Placement::Before);
        assert_eq!(ed.codes(), ["a", "b", "c"]);
        assert!(!ed.finish_drag());
        assert!(!ed.is_dirty());
    }

    #[test]
    fn test_cancel_restores_order() {
        let mut ed = editor(&["a", "b", "c", "d"]);
        ed.begin_drag("d");
        ed.drag_over("a", Placement::Before);
        ed.drag_over("b", Placement::After);
        assert_eq!(ed.codes(), ["a", "b", "d", "c"]);
        ed.cancel_drag();
        assert_eq!(ed.codes(), ["a", "b", "c", "d"]);
        assert!(!ed.is_dirty());
    }

    #[test]
    fn test_drag_over_self_or_unknown() {
        let mut ed = editor(&["a", "b"]);
        assert!(!ed.drag_over("a", Placement::After));
        ed.begin_drag("a");
        assert!(!ed.drag_over("a", Placement::After));
        assert!(!ed.drag_over("zz", Placement::After));
        assert!(!ed.begin_drag("zz"));
        assert_eq!(ed.dragging(), Some("a"));
    }

    #[test]
    fn test_any_move_sequence_is_permutation() {
        let mut ed = editor(&["a", "b", "c", "d", "e"]);
        let original = sorted(ed.codes());
        let steps: [(u8, usize); 12] = [
            (0, 4), (1, 0), (2, 3), (3, 2), (0, 1), (1, 4),
            (2, 0), (3, 4), (0, 9), (4, 2), (4, 0), (5, 1),
        ];
        for (op, i) in steps {
            match op {
                0 => { ed.move_up(i); }
                1 => { ed.move_down(i); }
                2 => { ed.move_to_start(i); }
                3 => { ed.move_to_end(i); }
                4 => {
                    let codes = ed.codes();
                    ed.begin_drag(&codes[i % codes.len()]);
                    ed.drag_over(&codes[(i + 2) % codes.len()], Placement::After);
                    ed.finish_drag();
                }
                _ => {
                    let codes = ed.codes();
                    ed.begin_drag(&codes[i]);
                    ed.drag_over(&codes[0], Placement::Before);
                    ed.cancel_drag();
                }
            }
            assert_eq!(sorted(ed.codes()), original);
            assert_eq!(ed.len(), 5);
        }
    }

    #[test]
    fn test_replace_clears_dirty_and_sorts() {
        let mut ed = editor(&["a", "b"]);
        ed.move_down(0);
        ed.replace(ChecklistSnapshot {
            version_id: None,
            version_name: Some("2026".into()),
            items: vec![ChecklistItem::new("y", "Y", 2), ChecklistItem::new("x", "X", 1)],
            is_active: None,
        });
        assert_eq!(ed.codes(), ["x", "y"]);
        assert!(!ed.is_dirty());
        // Missing id keeps the previous one
        assert_eq!(ed.version_id(), Some(1));
        assert_eq!(ed.version_name(), Some("2026"));
    }

    #[test]
    fn test_load_failure_keeps_previous_list() {
        let mut ed = editor(&["a", "b"]);
        ed.load_failed();
        assert_eq!(ed.codes(), ["a", "b"]);

        let mut fresh = ChecklistEditor::new(true);
        fresh.load_failed();
        assert!(fresh.is_empty());
        assert!(!fresh.is_loaded());
    }
}
