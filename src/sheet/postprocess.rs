use std::collections::HashMap;

use crate::model::row::{RowArena, RowId};
use crate::model::Category;

/// Work applied to freshly inserted rows once the insertion has settled.
pub trait RowPostProcessor {
    /// `rows` holds every inserted row of one outline, descendants included.
    fn process(&mut self, arena: &mut RowArena, category: Category, rows: &[RowId]);
}

/// Replaces `@name@` placeholders in a row's name and notes with values
/// configured for the sheet. Unknown placeholders are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderSubstitution {
    values: HashMap<String, String>,
}

impl PlaceholderSubstitution {
    pub fn new(values: HashMap<String, String>) -> Self {
        PlaceholderSubstitution { values }
    }

    pub fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find('@') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('@') {
                Some(end) => {
                    let key = &after[..end];
                    match self.values.get(key) {
                        Some(value) if !key.is_empty() => {
                            out.push_str(value);
                            rest = &after[end + 1..];
                        }
                        _ => {
                            // Keep the first '@' and retry from the second,
                            // which may open a real placeholder
                            out.push('@');
                            rest = after;
                        }
                    }
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl RowPostProcessor for PlaceholderSubstitution {
    fn process(&mut self, arena: &mut RowArena, category: Category, rows: &[RowId]) {
        if self.values.is_empty() {
            return;
        }
        let mut changed = 0;
        for id in rows {
            let Some(row) = arena.get_mut(*id) else {
                continue;
            };
            let name = self.substitute(&row.data.name);
            let notes = self.substitute(&row.data.notes);
            if name != row.data.name || notes != row.data.notes {
                row.data.name = name;
                row.data.notes = notes;
                changed += 1;
            }
        }
        tracing::debug!(outline = %category, rows = rows.len(), changed, "post-processed rows");
    }
}
