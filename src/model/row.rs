use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use super::category::Category;
use super::snapshot::RowSnapshot;

slotmap::new_key_type! {
    /// Stable handle to a row in a [`RowArena`]
    pub struct RowId;
}

/// The concrete kind of a row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RowKind {
    Advantage,
    Technique,
    Skill,
    RitualMagicSpell,
    Spell,
    Equipment,
    Note,
    /// Any kind that has no outline on a character sheet (e.g. a weapon
    /// or a template row dragged in from another document)
    Other(String),
}

impl RowKind {
    /// The outline a row of this kind belongs in. Equipment goes to the
    /// other-equipment outline when its source owner carried the
    /// other-root marker.
    pub fn category(&self, other_root: bool) -> Option<Category> {
        match self {
            RowKind::Advantage => Some(Category::Advantages),
            RowKind::Technique | RowKind::Skill => Some(Category::Skills),
            RowKind::RitualMagicSpell | RowKind::Spell => Some(Category::Spells),
            RowKind::Equipment if other_root => Some(Category::OtherEquipment),
            RowKind::Equipment => Some(Category::Equipment),
            RowKind::Note => Some(Category::Notes),
            RowKind::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RowKind::Advantage => "advantage",
            RowKind::Technique => "technique",
            RowKind::Skill => "skill",
            RowKind::RitualMagicSpell => "ritual_magic_spell",
            RowKind::Spell => "spell",
            RowKind::Equipment => "equipment",
            RowKind::Note => "note",
            RowKind::Other(name) => name,
        }
    }
}

impl From<String> for RowKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "advantage" => RowKind::Advantage,
            "technique" => RowKind::Technique,
            "skill" => RowKind::Skill,
            "ritual_magic_spell" => RowKind::RitualMagicSpell,
            "spell" => RowKind::Spell,
            "equipment" => RowKind::Equipment,
            "note" => RowKind::Note,
            _ => RowKind::Other(s),
        }
    }
}

impl From<RowKind> for String {
    fn from(kind: RowKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user-editable content of a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowData {
    pub kind: RowKind,
    /// Primary display text
    pub name: String,
    /// Secondary display text, shown under the primary line
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    /// `Some` only for rows that can be switched on and off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Why the row's prerequisites are not met; `None` when satisfied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsatisfied: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl RowData {
    pub fn new(kind: RowKind, name: impl Into<String>) -> Self {
        RowData {
            kind,
            name: name.into(),
            notes: String::new(),
            enabled: None,
            unsatisfied: None,
            tooltip: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn is_satisfied(&self) -> bool {
        self.unsatisfied.is_none()
    }

    /// True for a switchable row that is currently turned off
    pub fn is_switched_off(&self) -> bool {
        self.enabled == Some(false)
    }

    /// Case-insensitive containment over the row's searchable text.
    /// `lowered` must already be lowercase.
    pub fn contains(&self, lowered: &str) -> bool {
        if lowered.is_empty() {
            return false;
        }
        self.name.to_lowercase().contains(lowered)
            || self.notes.to_lowercase().contains(lowered)
            || self
                .tooltip
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(lowered))
    }
}

/// A node in an outline tree
#[derive(Debug, Clone)]
pub struct Row {
    pub data: RowData,
    /// Expanded (children visible) or collapsed
    pub open: bool,
    /// Set on rows created by a paste or drag
    pub is_new: bool,
    pub(crate) parent: Option<RowId>,
    pub(crate) children: Vec<RowId>,
    pub(crate) owner: Option<Category>,
}

impl Row {
    fn detached(data: RowData) -> Self {
        Row {
            data,
            open: true,
            is_new: false,
            parent: None,
            children: Vec::new(),
            owner: None,
        }
    }

    pub fn parent(&self) -> Option<RowId> {
        self.parent
    }

    pub fn children(&self) -> &[RowId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The outline holding this row's top-level ancestor, if any
    pub fn owner(&self) -> Option<Category> {
        self.owner
    }
}

/// Storage for every row of one document. Tree links are [`RowId`]s, so a
/// row's parent is a plain back-reference rather than ownership.
#[derive(Debug, Default, Clone)]
pub struct RowArena {
    rows: SlotMap<RowId, Row>,
}

impl RowArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached row with no parent and no owner.
    pub fn insert(&mut self, data: RowData) -> RowId {
        self.rows.insert(Row::detached(data))
    }

    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id)
    }

    pub fn get_mut(&mut self, id: RowId) -> Option<&mut Row> {
        self.rows.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn children(&self, id: RowId) -> &[RowId] {
        self.rows.get(id).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    /// Attach `child` as the last child of `parent`. The child's subtree
    /// takes on the parent's owner.
    pub fn append_child(&mut self, parent: RowId, child: RowId) {
        if parent == child || !self.rows.contains_key(parent) || !self.rows.contains_key(child) {
            return;
        }
        if self.ancestors(parent).contains(&child) {
            return;
        }
        self.detach(child);
        let owner = self.rows[parent].owner;
        self.rows[parent].children.push(child);
        self.rows[child].parent = Some(parent);
        self.set_owner(child, owner);
    }

    /// Unlink a row from its parent's child list. Top-level membership in a
    /// model is not touched here.
    pub(crate) fn detach(&mut self, id: RowId) {
        if let Some(parent) = self.rows.get(id).and_then(|r| r.parent) {
            if let Some(p) = self.rows.get_mut(parent) {
                p.children.retain(|c| *c != id);
            }
            self.rows[id].parent = None;
        }
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors(&self, id: RowId) -> Vec<RowId> {
        let mut out = Vec::new();
        let mut current = self.rows.get(id).and_then(|r| r.parent);
        while let Some(p) = current {
            out.push(p);
            current = self.rows.get(p).and_then(|r| r.parent);
        }
        out
    }

    /// The top-level ancestor of `id` (itself when it has no parent)
    pub fn top_level(&self, id: RowId) -> RowId {
        self.ancestors(id).last().copied().unwrap_or(id)
    }

    /// Nesting depth (0 = top-level)
    pub fn depth(&self, id: RowId) -> usize {
        self.ancestors(id).len()
    }

    /// `id` followed by all of its descendants, depth-first
    pub fn descendants(&self, id: RowId) -> Vec<RowId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(row) = self.rows.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(row.children.iter().rev());
        }
        out
    }

    /// Set the owner of a whole subtree.
    pub(crate) fn set_owner(&mut self, id: RowId, owner: Option<Category>) {
        for row in self.descendants(id) {
            self.rows[row].owner = owner;
        }
    }

    /// Deep-copy a snapshot into this arena as a detached subtree.
    pub fn insert_snapshot(&mut self, snapshot: &RowSnapshot, mark_new: bool) -> RowId {
        let id = self.insert(snapshot.data.clone());
        {
            let row = &mut self.rows[id];
            row.open = snapshot.open;
            row.is_new = mark_new;
        }
        for child in &snapshot.children {
            let child_id = self.insert_snapshot(child, mark_new);
            self.rows[child_id].parent = Some(id);
            self.rows[id].children.push(child_id);
        }
        id
    }

    /// Capture a row and its subtree as a transferable snapshot.
    pub fn snapshot(&self, id: RowId, other_root: bool) -> Option<RowSnapshot> {
        let row = self.rows.get(id)?;
        Some(RowSnapshot {
            data: row.data.clone(),
            open: row.open,
            other_root,
            children: row
                .children
                .iter()
                .filter_map(|c| self.snapshot(*c, other_root))
                .collect(),
        })
    }
}
