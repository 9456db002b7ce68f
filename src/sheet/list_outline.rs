use crate::model::outline::OutlineModel;
use crate::model::row::{RowArena, RowId};
use crate::model::Category;

use super::undo::UndoRecord;

/// Where an outline lives, which decides where its undo records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutlineHost {
    /// Directly on the sheet; records go to the document's undo manager
    #[default]
    TopLevel,
    /// Embedded in another outline (e.g. an editor dialog's container
    /// list); records are posted to that parent
    Nested,
}

/// The view of one [`OutlineModel`]: scroll position, size invalidation and
/// the undo records handed to a parent outline.
#[derive(Debug, Clone)]
pub struct ListOutline {
    model: OutlineModel,
    host: OutlineHost,
    /// Visible row the view last scrolled to, with its index among the
    /// visible rows
    scrolled_to: Option<(RowId, usize)>,
    content_size_changed: bool,
    posted: Vec<UndoRecord>,
}

impl ListOutline {
    pub fn new(category: Category) -> Self {
        ListOutline {
            model: OutlineModel::new(category),
            host: OutlineHost::TopLevel,
            scrolled_to: None,
            content_size_changed: false,
            posted: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.model.category()
    }

    pub fn model(&self) -> &OutlineModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut OutlineModel {
        &mut self.model
    }

    pub fn host(&self) -> OutlineHost {
        self.host
    }

    pub fn set_host(&mut self, host: OutlineHost) {
        self.host = host;
    }

    pub fn is_top_level(&self) -> bool {
        self.host == OutlineHost::TopLevel
    }

    /// Rows were added, removed, expanded or collapsed; row heights and the
    /// scrollable extent need recomputing.
    pub fn content_size_may_have_changed(&mut self) {
        self.content_size_changed = true;
    }

    /// Returns and clears the pending size invalidation.
    pub fn take_content_size_changed(&mut self) -> bool {
        std::mem::take(&mut self.content_size_changed)
    }

    /// Scroll so the first selected row (in traversal order) is in view.
    /// A selected row hidden under a closed parent leaves the scroll
    /// position alone.
    pub fn scroll_selection_into_view(&mut self, arena: &RowArena) {
        let Some(first) = self.model.first_selected(arena) else {
            return;
        };
        let visible = self.model.visible_rows(arena);
        match visible.iter().position(|r| *r == first) {
            Some(index) => self.scrolled_to = Some((first, index)),
            None => tracing::debug!(
                outline = %self.category(),
                "selected row is collapsed, not scrolling"
            ),
        }
    }

    pub fn scrolled_to(&self) -> Option<(RowId, usize)> {
        self.scrolled_to
    }

    /// Hand a finished record to the parent outline.
    pub fn post_undo(&mut self, record: UndoRecord) {
        self.posted.push(record);
    }

    /// Records posted to the parent, oldest first
    pub fn posted_undo(&self) -> &[UndoRecord] {
        &self.posted
    }

    /// Drain the records posted to the parent.
    pub fn take_posted_undo(&mut self) -> Vec<UndoRecord> {
        std::mem::take(&mut self.posted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::{RowData, RowKind};

    #[test]
    fn scroll_uses_index_among_visible_rows() {
        let mut arena = RowArena::new();
        let mut outline = ListOutline::new(Category::Skills);
        let a = arena.insert(RowData::new(RowKind::Skill, "A"));
        let a1 = arena.insert(RowData::new(RowKind::Skill, "A1"));
        let b = arena.insert(RowData::new(RowKind::Skill, "B"));
        outline.model_mut().add_row(&mut arena, a);
        outline.model_mut().add_child(&mut arena, a, a1);
        outline.model_mut().add_row(&mut arena, b);

        arena.get_mut(a).unwrap().open = false;
        outline.model_mut().select(&arena, &[b], true);
        outline.scroll_selection_into_view(&arena);
        assert_eq!(outline.scrolled_to(), Some((b, 1)));

        arena.get_mut(a).unwrap().open = true;
        outline.scroll_selection_into_view(&arena);
        assert_eq!(outline.scrolled_to(), Some((b, 2)));
    }

    #[test]
    fn collapsed_selection_does_not_scroll() {
        let mut arena = RowArena::new();
        let mut outline = ListOutline::new(Category::Skills);
        let a = arena.insert(RowData::new(RowKind::Skill, "A"));
        let a1 = arena.insert(RowData::new(RowKind::Skill, "A1"));
        outline.model_mut().add_row(&mut arena, a);
        outline.model_mut().add_child(&mut arena, a, a1);
        arena.get_mut(a).unwrap().open = false;
        outline.model_mut().select(&arena, &[a1], true);
        outline.scroll_selection_into_view(&arena);
        assert_eq!(outline.scrolled_to(), None);
    }

    #[test]
    fn content_size_flag_is_taken_once() {
        let mut outline = ListOutline::new(Category::Notes);
        assert!(!outline.take_content_size_changed());
        outline.content_size_may_have_changed();
        assert!(outline.take_content_size_changed());
        assert!(!outline.take_content_size_changed());
    }
}
