use std::collections::HashMap;

use indexmap::IndexSet;

use super::category::Category;
use super::row::{RowArena, RowId};

/// Model property marking the other-equipment outline. Equipment copied out
/// of a model carrying it is routed back to other equipment on paste.
pub const KEY_OTHER_ROOT: &str = "other_root";

/// The data and selection behind one outline.
///
/// The model owns the ordered list of top-level rows; descendants hang off
/// those rows in the [`RowArena`]. Every reachable row has this model's
/// category as its owner.
#[derive(Debug, Clone)]
pub struct OutlineModel {
    category: Category,
    roots: Vec<RowId>,
    selection: IndexSet<RowId>,
    properties: HashMap<String, String>,
}

/// Structural state of a model, as captured by an undo record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelState {
    roots: Vec<RowId>,
    selection: Vec<RowId>,
    rows: Vec<RowState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RowState {
    id: RowId,
    parent: Option<RowId>,
    children: Vec<RowId>,
    open: bool,
}

impl ModelState {
    pub fn roots(&self) -> &[RowId] {
        &self.roots
    }

    pub fn selection(&self) -> &[RowId] {
        &self.selection
    }
}

impl OutlineModel {
    pub fn new(category: Category) -> Self {
        let mut properties = HashMap::new();
        if category == Category::OtherEquipment {
            properties.insert(KEY_OTHER_ROOT.to_string(), "true".to_string());
        }
        OutlineModel {
            category,
            roots: Vec::new(),
            selection: IndexSet::new(),
            properties,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn roots(&self) -> &[RowId] {
        &self.roots
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn is_other_root(&self) -> bool {
        self.property(KEY_OTHER_ROOT).is_some()
    }

    /// Append a row (with its whole subtree) to the top level.
    pub fn add_row(&mut self, arena: &mut RowArena, id: RowId) {
        if arena.get(id).is_none() || self.roots.contains(&id) {
            return;
        }
        arena.detach(id);
        self.roots.push(id);
        arena.set_owner(id, Some(self.category));
    }

    /// Attach `child` under `parent`, which must already be in this model.
    pub fn add_child(&mut self, arena: &mut RowArena, parent: RowId, child: RowId) {
        if !self.contains(arena, parent) {
            return;
        }
        self.roots.retain(|r| *r != child);
        arena.append_child(parent, child);
    }

    /// Remove a row and its subtree from the model. The rows stay in the
    /// arena so an undo record can bring them back.
    pub fn remove_row(&mut self, arena: &mut RowArena, id: RowId) -> bool {
        if !self.contains(arena, id) {
            return false;
        }
        let gone = arena.descendants(id);
        self.selection.retain(|r| !gone.contains(r));
        if self.roots.contains(&id) {
            self.roots.retain(|r| *r != id);
        } else {
            arena.detach(id);
        }
        arena.set_owner(id, None);
        true
    }

    /// Whether `id` is reachable from this model's top-level rows.
    pub fn contains(&self, arena: &RowArena, id: RowId) -> bool {
        match arena.get(id) {
            Some(row) if row.owner() == Some(self.category) => {
                self.roots.contains(&arena.top_level(id))
            }
            _ => false,
        }
    }

    /// Every row in the model, depth-first, including rows under closed
    /// parents.
    pub fn iter<'a>(&'a self, arena: &'a RowArena) -> impl Iterator<Item = RowId> + 'a {
        self.roots.iter().flat_map(move |r| arena.descendants(*r))
    }

    /// Rows that would be drawn: those whose ancestors are all open.
    pub fn visible_rows(&self, arena: &RowArena) -> Vec<RowId> {
        fn walk(arena: &RowArena, id: RowId, out: &mut Vec<RowId>) {
            out.push(id);
            if let Some(row) = arena.get(id)
                && row.open
            {
                for child in row.children() {
                    walk(arena, *child, out);
                }
            }
        }
        let mut out = Vec::new();
        for root in &self.roots {
            walk(arena, *root, &mut out);
        }
        out
    }

    pub fn row_count(&self, arena: &RowArena) -> usize {
        self.iter(arena).count()
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn selection(&self) -> &IndexSet<RowId> {
        &self.selection
    }

    pub fn is_selected(&self, id: RowId) -> bool {
        self.selection.contains(&id)
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn deselect(&mut self) {
        self.selection.clear();
    }

    /// Select rows. With `exclusive` the previous selection is replaced,
    /// otherwise the rows are added to it. Rows not in this model are ignored.
    pub fn select(&mut self, arena: &RowArena, rows: &[RowId], exclusive: bool) {
        if exclusive {
            self.selection.clear();
        }
        for row in rows {
            if self.contains(arena, *row) {
                self.selection.insert(*row);
            }
        }
    }

    /// The first selected row in traversal order.
    pub fn first_selected(&self, arena: &RowArena) -> Option<RowId> {
        self.iter(arena).find(|r| self.selection.contains(r))
    }

    // -----------------------------------------------------------------------
    // Undo snapshots
    // -----------------------------------------------------------------------

    pub fn capture(&self, arena: &RowArena) -> ModelState {
        let rows = self
            .iter(arena)
            .filter_map(|id| {
                arena.get(id).map(|row| RowState {
                    id,
                    parent: row.parent(),
                    children: row.children().to_vec(),
                    open: row.open,
                })
            })
            .collect();
        ModelState {
            roots: self.roots.clone(),
            selection: self.selection.iter().copied().collect(),
            rows,
        }
    }

    /// Put the model back exactly as captured. Rows reachable now but not in
    /// the captured state lose their owner.
    pub fn restore(&mut self, arena: &mut RowArena, state: &ModelState) {
        let current: Vec<RowId> = self.iter(arena).collect();
        for id in current {
            if let Some(row) = arena.get_mut(id) {
                row.owner = None;
            }
        }
        for saved in &state.rows {
            if let Some(row) = arena.get_mut(saved.id) {
                row.parent = saved.parent;
                row.children = saved.children.clone();
                row.open = saved.open;
                row.owner = Some(self.category);
            }
        }
        self.roots = state
            .roots
            .iter()
            .copied()
            .filter(|r| arena.get(*r).is_some())
            .collect();
        self.selection.clear();
        for id in &state.selection {
            if self.contains(arena, *id) {
                self.selection.insert(*id);
            }
        }
    }
}
