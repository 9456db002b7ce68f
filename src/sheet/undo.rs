use crate::model::outline::{ModelState, OutlineModel};
use crate::model::row::RowArena;
use crate::model::Category;

use super::collected::CollectedOutlines;

/// Title of the records produced by a paste or drag
pub const ADD_ROWS: &str = "Add Rows";

/// Default cap on the undo stack
pub const UNDO_STACK_LIMIT: usize = 500;

/// A snapshot edit of one outline's model.
///
/// The record captures the model when it is begun and again when it is
/// ended; undo puts back the first snapshot and redo the second.
#[derive(Debug, Clone)]
pub struct UndoRecord {
    title: String,
    category: Category,
    before: ModelState,
    after: Option<ModelState>,
}

impl UndoRecord {
    pub fn begin(title: impl Into<String>, model: &OutlineModel, arena: &RowArena) -> Self {
        UndoRecord {
            title: title.into(),
            category: model.category(),
            before: model.capture(arena),
            after: None,
        }
    }

    /// Capture the final state. Ending twice keeps the first capture.
    pub fn end(&mut self, model: &OutlineModel, arena: &RowArena) {
        if self.after.is_none() {
            self.after = Some(model.capture(arena));
        }
    }

    pub fn is_committed(&self) -> bool {
        self.after.is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn before(&self) -> &ModelState {
        &self.before
    }

    pub fn after(&self) -> Option<&ModelState> {
        self.after.as_ref()
    }

    pub fn undo(&self, model: &mut OutlineModel, arena: &mut RowArena) {
        model.restore(arena, &self.before);
    }

    pub fn redo(&self, model: &mut OutlineModel, arena: &mut RowArena) {
        if let Some(after) = &self.after {
            model.restore(arena, after);
        }
    }
}

/// Document-wide undo history for top-level outlines.
#[derive(Debug)]
pub struct UndoManager {
    undo: Vec<UndoRecord>,
    redo: Vec<UndoRecord>,
    limit: usize,
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new(UNDO_STACK_LIMIT)
    }
}

impl UndoManager {
    pub fn new(limit: usize) -> Self {
        UndoManager {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Register a committed record. Clears the redo stack. Records that
    /// were never ended are ignored.
    pub fn add_edit(&mut self, record: UndoRecord) {
        if !record.is_committed() {
            tracing::debug!(title = record.title(), "ignoring uncommitted undo record");
            return;
        }
        self.undo.push(record);
        if self.undo.len() > self.limit {
            self.undo.drain(..self.undo.len() - self.limit);
        }
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_title(&self) -> Option<&str> {
        self.undo.last().map(UndoRecord::title)
    }

    pub fn redo_title(&self) -> Option<&str> {
        self.redo.last().map(UndoRecord::title)
    }

    /// Records waiting to be undone, oldest first
    pub fn records(&self) -> &[UndoRecord] {
        &self.undo
    }

    /// Undo the last record. Returns the outline it touched.
    pub fn undo(&mut self, outlines: &mut CollectedOutlines) -> Option<Category> {
        let record = self.undo.pop()?;
        let category = record.category();
        let (arena, outline) = outlines.parts_mut(category);
        record.undo(outline.model_mut(), arena);
        outline.content_size_may_have_changed();
        self.redo.push(record);
        Some(category)
    }

    /// Redo the last undone record. Returns the outline it touched.
    pub fn redo(&mut self, outlines: &mut CollectedOutlines) -> Option<Category> {
        let record = self.redo.pop()?;
        let category = record.category();
        let (arena, outline) = outlines.parts_mut(category);
        record.redo(outline.model_mut(), arena);
        outline.content_size_may_have_changed();
        self.undo.push(record);
        Some(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::{RowData, RowKind};

    fn note_record(outlines: &mut CollectedOutlines, name: &str) -> UndoRecord {
        let (arena, outline) = outlines.parts_mut(Category::Notes);
        let mut record = UndoRecord::begin(ADD_ROWS, outline.model(), arena);
        let id = arena.insert(RowData::new(RowKind::Note, name));
        outline.model_mut().add_row(arena, id);
        record.end(outline.model(), arena);
        record
    }

    #[test]
    fn uncommitted_records_are_not_registered() {
        let outlines = CollectedOutlines::new();
        let record = UndoRecord::begin(
            ADD_ROWS,
            outlines.outline(Category::Notes).model(),
            outlines.arena(),
        );
        let mut manager = UndoManager::default();
        manager.add_edit(record);
        assert!(!manager.can_undo());
    }

    #[test]
    fn undo_and_redo_restore_model() {
        let mut outlines = CollectedOutlines::new();
        let mut manager = UndoManager::default();
        let record = note_record(&mut outlines, "Backstory");
        manager.add_edit(record);
        assert_eq!(manager.undo_title(), Some(ADD_ROWS));
        assert_eq!(outlines.outline(Category::Notes).model().roots().len(), 1);

        assert_eq!(manager.undo(&mut outlines), Some(Category::Notes));
        assert!(outlines.outline(Category::Notes).model().roots().is_empty());
        assert!(manager.can_redo());

        assert_eq!(manager.redo(&mut outlines), Some(Category::Notes));
        assert_eq!(outlines.outline(Category::Notes).model().roots().len(), 1);
        assert!(!manager.can_redo());
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut outlines = CollectedOutlines::new();
        let mut manager = UndoManager::default();
        let first = note_record(&mut outlines, "One");
        manager.add_edit(first);
        manager.undo(&mut outlines);
        let second = note_record(&mut outlines, "Two");
        manager.add_edit(second);
        assert!(!manager.can_redo());
    }

    #[test]
    fn stack_is_bounded() {
        let mut outlines = CollectedOutlines::new();
        let mut manager = UndoManager::new(3);
        for i in 0..5 {
            let record = note_record(&mut outlines, &format!("Note {i}"));
            manager.add_edit(record);
        }
        assert_eq!(manager.records().len(), 3);
    }

    #[test]
    fn end_is_idempotent() {
        let mut outlines = CollectedOutlines::new();
        let mut record = note_record(&mut outlines, "One");
        let captured = record.after().cloned();
        let (arena, outline) = outlines.parts_mut(Category::Notes);
        let extra = arena.insert(RowData::new(RowKind::Note, "Two"));
        outline.model_mut().add_row(arena, extra);
        record.end(outline.model(), arena);
        assert_eq!(record.after().cloned(), captured);
    }
}
