use serde::{Deserialize, Serialize};

use super::row::{RowData, RowKind};

/// A detached row subtree, as carried by a paste or drag.
///
/// Snapshots are what crosses document boundaries: copying rows produces
/// them, and inserting rows consumes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSnapshot {
    #[serde(flatten)]
    pub data: RowData,
    #[serde(default = "default_open")]
    pub open: bool,
    /// Whether the row came from a model carrying the other-root marker
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub other_root: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RowSnapshot>,
}

fn default_open() -> bool {
    true
}

impl RowSnapshot {
    pub fn new(kind: RowKind, name: impl Into<String>) -> Self {
        RowSnapshot {
            data: RowData::new(kind, name),
            open: true,
            other_root: false,
            children: Vec::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.data.notes = notes.into();
        self
    }

    pub fn with_child(mut self, child: RowSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn closed(mut self) -> Self {
        self.open = false;
        self
    }

    pub fn from_other_root(mut self) -> Self {
        self.other_root = true;
        self
    }

    /// Number of rows in this subtree, including itself
    pub fn row_count(&self) -> usize {
        1 + self.children.iter().map(RowSnapshot::row_count).sum::<usize>()
    }
}

/// The on-disk form of a character sheet: one list of top-level rows per
/// outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetFile {
    #[serde(default)]
    pub advantages: Vec<RowSnapshot>,
    #[serde(default)]
    pub skills: Vec<RowSnapshot>,
    #[serde(default)]
    pub spells: Vec<RowSnapshot>,
    #[serde(default)]
    pub equipment: Vec<RowSnapshot>,
    #[serde(default)]
    pub other_equipment: Vec<RowSnapshot>,
    #[serde(default)]
    pub notes: Vec<RowSnapshot>,
}

impl SheetFile {
    pub fn rows(&self, category: super::Category) -> &[RowSnapshot] {
        use super::Category::*;
        match category {
            Advantages => &self.advantages,
            Skills => &self.skills,
            Spells => &self.spells,
            Equipment => &self.equipment,
            OtherEquipment => &self.other_equipment,
            Notes => &self.notes,
        }
    }

    pub fn rows_mut(&mut self, category: super::Category) -> &mut Vec<RowSnapshot> {
        use super::Category::*;
        match category {
            Advantages => &mut self.advantages,
            Skills => &mut self.skills,
            Spells => &mut self.spells,
            Equipment => &mut self.equipment,
            OtherEquipment => &mut self.other_equipment,
            Notes => &mut self.notes,
        }
    }
}
