use crate::model::row::{RowArena, RowId};
use crate::model::snapshot::SheetFile;
use crate::model::Category;

use super::list_outline::ListOutline;

/// The six outlines of one character sheet and the rows they share.
#[derive(Debug, Clone)]
pub struct CollectedOutlines {
    arena: RowArena,
    outlines: [ListOutline; 6],
    focus: Option<Category>,
}

impl Default for CollectedOutlines {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectedOutlines {
    pub fn new() -> Self {
        CollectedOutlines {
            arena: RowArena::new(),
            outlines: Category::ALL.map(ListOutline::new),
            focus: None,
        }
    }

    /// Build the outlines from a loaded sheet. Loaded rows are not new.
    pub fn from_sheet(sheet: &SheetFile) -> Self {
        let mut outlines = Self::new();
        for category in Category::ALL {
            for snapshot in sheet.rows(category) {
                let (arena, outline) = outlines.parts_mut(category);
                let id = arena.insert_snapshot(snapshot, false);
                outline.model_mut().add_row(arena, id);
            }
        }
        outlines
    }

    /// Capture every outline back into its on-disk form.
    pub fn to_sheet(&self) -> SheetFile {
        let mut sheet = SheetFile::default();
        for outline in &self.outlines {
            // The section name already records which root the rows belong to
            let rows = sheet.rows_mut(outline.category());
            rows.extend(
                outline
                    .model()
                    .roots()
                    .iter()
                    .filter_map(|root| self.arena.snapshot(*root, false)),
            );
        }
        sheet
    }

    pub fn arena(&self) -> &RowArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut RowArena {
        &mut self.arena
    }

    pub fn outline(&self, category: Category) -> &ListOutline {
        &self.outlines[category.index()]
    }

    pub fn outline_mut(&mut self, category: Category) -> &mut ListOutline {
        &mut self.outlines[category.index()]
    }

    /// Borrow the rows and one outline at the same time.
    pub fn parts_mut(&mut self, category: Category) -> (&mut RowArena, &mut ListOutline) {
        (&mut self.arena, &mut self.outlines[category.index()])
    }

    /// Outlines in declared category order
    pub fn iter(&self) -> impl Iterator<Item = &ListOutline> {
        self.outlines.iter()
    }

    /// The outline whose model can reach `id`, if any.
    pub fn owning_category(&self, id: RowId) -> Option<Category> {
        let owner = self.arena.get(id)?.owner()?;
        self.outline(owner)
            .model()
            .contains(&self.arena, id)
            .then_some(owner)
    }

    pub fn focused(&self) -> Option<Category> {
        self.focus
    }

    pub fn request_focus(&mut self, category: Category) {
        self.focus = Some(category);
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }
}
