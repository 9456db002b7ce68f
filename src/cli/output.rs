use serde::Serialize;

use crate::model::Category;
use crate::model::row::{RowArena, RowId};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SearchJson {
    pub filter: String,
    pub hits: Vec<HitJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<Category>,
}

#[derive(Serialize)]
pub struct HitJson {
    pub category: Category,
    pub name: String,
    /// Names of the row's ancestors, outermost first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    pub spans: Vec<(usize, usize)>,
}

#[derive(Serialize)]
pub struct OutlineJson {
    pub category: Category,
    pub rows: Vec<RowJson>,
}

#[derive(Serialize)]
pub struct RowJson {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub depth: usize,
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    pub preferred_width: u32,
    pub preferred_height: u32,
}

#[derive(Serialize)]
pub struct PasteJson {
    pub inserted: Vec<InsertedJson>,
    pub dropped: usize,
    pub saved: bool,
}

#[derive(Serialize)]
pub struct InsertedJson {
    pub category: Category,
    pub names: Vec<String>,
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Ancestor names of `id`, outermost first.
pub fn ancestor_names(arena: &RowArena, id: RowId) -> Vec<String> {
    let mut names: Vec<String> = arena
        .ancestors(id)
        .into_iter()
        .filter_map(|a| arena.get(a).map(|r| r.data.name.clone()))
        .collect();
    names.reverse();
    names
}

/// `[Skills] Melee > Sword > Riposte`
pub fn format_hit_line(category: Category, path: &[String], name: &str) -> String {
    let mut line = format!("[{}] ", category);
    for part in path {
        line.push_str(part);
        line.push_str(" > ");
    }
    line.push_str(name);
    line
}

pub fn format_paste_summary(inserted: &[InsertedJson], dropped: usize) -> Vec<String> {
    let mut lines: Vec<String> = inserted
        .iter()
        .map(|i| {
            let noun = if i.names.len() == 1 { "row" } else { "rows" };
            format!("added {} {} to {}", i.names.len(), noun, i.category)
        })
        .collect();
    if dropped > 0 {
        let noun = if dropped == 1 { "row" } else { "rows" };
        lines.push(format!("dropped {} {} with no outline", dropped, noun));
    }
    if lines.is_empty() {
        lines.push("nothing to add".to_string());
    }
    lines
}
