use std::collections::BTreeMap;

use regex::RegexBuilder;

use crate::model::row::RowId;
use crate::model::snapshot::RowSnapshot;
use crate::model::{Category, SheetConfig};

use super::collected::CollectedOutlines;
use super::list_outline::OutlineHost;
use super::postprocess::{PlaceholderSubstitution, RowPostProcessor};
use super::queue::{EventQueue, UiTask};
use super::undo::{ADD_ROWS, UndoManager, UndoRecord};

/// One search match with the byte ranges to highlight in its primary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub row: RowId,
    pub category: Category,
    pub spans: Vec<(usize, usize)>,
}

/// What an [`SheetDockable::add_rows`] call inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddRowsReport {
    /// New top-level rows per destination outline, in source order
    pub inserted: BTreeMap<Category, Vec<RowId>>,
    /// Source rows whose kind has no outline on the sheet
    pub dropped: usize,
}

impl AddRowsReport {
    pub fn inserted_count(&self) -> usize {
        self.inserted.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty()
    }
}

/// The character sheet as a whole: its six outlines plus the undo history
/// and deferred UI work shared between them.
pub struct SheetDockable {
    outlines: CollectedOutlines,
    undo: UndoManager,
    queue: EventQueue,
    post_processor: Box<dyn RowPostProcessor>,
}

impl std::fmt::Debug for SheetDockable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetDockable")
            .field("outlines", &self.outlines)
            .field("undo", &self.undo)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

impl SheetDockable {
    pub fn new(outlines: CollectedOutlines) -> Self {
        SheetDockable {
            outlines,
            undo: UndoManager::default(),
            queue: EventQueue::new(),
            post_processor: Box::new(PlaceholderSubstitution::default()),
        }
    }

    pub fn from_config(outlines: CollectedOutlines, config: &SheetConfig) -> Self {
        SheetDockable {
            outlines,
            undo: UndoManager::new(config.undo.limit),
            queue: EventQueue::new(),
            post_processor: Box::new(PlaceholderSubstitution::new(
                config.postprocess.placeholders.clone(),
            )),
        }
    }

    pub fn with_post_processor(mut self, processor: Box<dyn RowPostProcessor>) -> Self {
        self.post_processor = processor;
        self
    }

    pub fn outlines(&self) -> &CollectedOutlines {
        &self.outlines
    }

    pub fn outlines_mut(&mut self) -> &mut CollectedOutlines {
        &mut self.outlines
    }

    pub fn undo_manager(&self) -> &UndoManager {
        &self.undo
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    pub fn set_host(&mut self, category: Category, host: OutlineHost) {
        self.outlines.outline_mut(category).set_host(host);
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Rows whose name, notes or tooltip contain `filter`, ignoring case.
    /// Outlines are visited in category order and each one depth-first.
    pub fn search(&self, filter: &str) -> Vec<RowId> {
        let lowered = filter.to_lowercase();
        if lowered.is_empty() {
            return Vec::new();
        }
        let arena = self.outlines.arena();
        let mut found = Vec::new();
        for outline in self.outlines.iter() {
            found.extend(outline.model().iter(arena).filter(|id| {
                arena
                    .get(*id)
                    .is_some_and(|row| row.data.contains(&lowered))
            }));
        }
        found
    }

    /// Like [`search`](Self::search), with match ranges in each row's name.
    /// A row matched only through its notes or tooltip has no spans.
    pub fn search_hits(&self, filter: &str) -> Vec<SearchHit> {
        let rows = self.search(filter);
        if rows.is_empty() {
            return Vec::new();
        }
        let re = match RegexBuilder::new(&regex::escape(filter))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re,
            Err(e) => {
                tracing::debug!(error = %e, "search pattern rejected, no highlights");
                return Vec::new();
            }
        };
        let arena = self.outlines.arena();
        rows.into_iter()
            .filter_map(|id| {
                let row = arena.get(id)?;
                Some(SearchHit {
                    row: id,
                    category: row.owner()?,
                    spans: re
                        .find_iter(&row.data.name)
                        .map(|m| (m.start(), m.end()))
                        .collect(),
                })
            })
            .collect()
    }

    /// Select exactly `selection` across all outlines, expanding every
    /// ancestor so the rows are visible. The first outline (in category
    /// order) holding a selected row is scrolled and focused once the queue
    /// runs.
    pub fn search_select(&mut self, selection: &[RowId]) {
        for category in Category::ALL {
            self.outlines.outline_mut(category).model_mut().deselect();
        }

        let mut groups: BTreeMap<Category, Vec<RowId>> = BTreeMap::new();
        for id in selection {
            let arena = self.outlines.arena_mut();
            for ancestor in arena.ancestors(*id) {
                if let Some(row) = arena.get_mut(ancestor) {
                    row.open = true;
                }
            }
            match self.outlines.owning_category(*id) {
                Some(category) => groups.entry(category).or_default().push(*id),
                None => tracing::debug!(row = ?id, "row is not on any outline, not selecting"),
            }
        }

        for (category, rows) in &groups {
            let (arena, outline) = self.outlines.parts_mut(*category);
            outline.model_mut().select(arena, rows, false);
            outline.content_size_may_have_changed();
        }

        if let Some(primary) = groups.keys().next().copied() {
            self.queue
                .invoke_later(UiTask::ScrollSelectionIntoView(primary));
            self.queue.invoke_later(UiTask::RequestFocus(primary));
        }
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Insert deep copies of `rows` into the outlines their kinds belong
    /// in. Each affected outline gets one "Add Rows" undo record and has
    /// the new top-level rows added to its selection. Rows of a kind no
    /// outline accepts are dropped.
    pub fn add_rows(&mut self, rows: &[RowSnapshot]) -> AddRowsReport {
        let mut records: BTreeMap<Category, UndoRecord> = BTreeMap::new();
        let mut selections: BTreeMap<Category, Vec<RowId>> = BTreeMap::new();
        let mut post: BTreeMap<Category, Vec<RowId>> = BTreeMap::new();
        let mut dropped = 0;

        for snapshot in rows {
            let Some(category) = snapshot.data.kind.category(snapshot.other_root) else {
                tracing::debug!(kind = %snapshot.data.kind, name = %snapshot.data.name, "no outline for row, dropping");
                dropped += 1;
                continue;
            };
            let (arena, outline) = self.outlines.parts_mut(category);
            if !records.contains_key(&category) {
                records.insert(category, UndoRecord::begin(ADD_ROWS, outline.model(), arena));
            }
            let id = arena.insert_snapshot(snapshot, true);
            outline.model_mut().add_row(arena, id);
            outline.content_size_may_have_changed();
            selections.entry(category).or_default().push(id);
            post.entry(category).or_default().extend(arena.descendants(id));
        }

        for (category, mut record) in records {
            let rows = selections.get(&category).map(Vec::as_slice).unwrap_or(&[]);
            let (arena, outline) = self.outlines.parts_mut(category);
            outline.model_mut().select(arena, rows, false);
            record.end(outline.model(), arena);
            if outline.is_top_level() {
                tracing::info!(outline = %category, rows = rows.len(), "added rows");
                self.undo.add_edit(record);
                self.queue
                    .invoke_later(UiTask::ScrollSelectionIntoView(category));
                self.queue.invoke_later(UiTask::RequestFocus(category));
            } else {
                outline.post_undo(record);
                outline.scroll_selection_into_view(arena);
                self.outlines.request_focus(category);
            }
        }

        if !post.is_empty() {
            self.queue
                .invoke_later(UiTask::PostProcess(post.into_iter().collect()));
        }

        AddRowsReport {
            inserted: selections,
            dropped,
        }
    }

    /// Snapshots of `ids` (with their subtrees) suitable for a later
    /// [`add_rows`](Self::add_rows). Equipment remembers whether it came
    /// from the other-equipment outline.
    pub fn copy_rows(&self, ids: &[RowId]) -> Vec<RowSnapshot> {
        let arena = self.outlines.arena();
        ids.iter()
            .filter_map(|id| {
                let other_root = self
                    .outlines
                    .owning_category(*id)
                    .is_some_and(|c| self.outlines.outline(c).model().is_other_root());
                arena.snapshot(*id, other_root)
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Deferred work and history
    // -----------------------------------------------------------------------

    /// Drain the UI queue, including tasks scheduled while draining.
    /// Returns how many tasks ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.queue.pop() {
            tracing::debug!(?task, "running deferred task");
            match task {
                UiTask::ScrollSelectionIntoView(category) => {
                    let (arena, outline) = self.outlines.parts_mut(category);
                    outline.scroll_selection_into_view(arena);
                }
                UiTask::RequestFocus(category) => self.outlines.request_focus(category),
                UiTask::PostProcess(groups) => {
                    for (category, rows) in groups {
                        self.post_processor
                            .process(self.outlines.arena_mut(), category, &rows);
                    }
                }
            }
            ran += 1;
        }
        ran
    }

    pub fn undo(&mut self) -> Option<Category> {
        let category = self.undo.undo(&mut self.outlines)?;
        tracing::info!(outline = %category, "undo");
        Some(category)
    }

    pub fn redo(&mut self) -> Option<Category> {
        let category = self.undo.redo(&mut self.outlines)?;
        tracing::info!(outline = %category, "redo");
        Some(category)
    }
}
