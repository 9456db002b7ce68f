use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::snapshot::{RowSnapshot, SheetFile};
use crate::model::row::RowKind;
use crate::sheet::{CollectedOutlines, SheetDockable};

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A small sheet: one advantage with notes, a skill tree and a note.
pub fn sample_dockable() -> SheetDockable {
    let sheet = SheetFile {
        advantages: vec![RowSnapshot::new(RowKind::Advantage, "Wealth").with_notes("Comfortable")],
        skills: vec![
            RowSnapshot::new(RowKind::Skill, "Melee")
                .with_child(RowSnapshot::new(RowKind::Skill, "Sword"))
                .with_child(
                    RowSnapshot::new(RowKind::Skill, "Axe")
                        .closed()
                        .with_child(RowSnapshot::new(RowKind::Technique, "Hook")),
                ),
        ],
        notes: vec![RowSnapshot::new(RowKind::Note, "Born in Megalos")],
        ..Default::default()
    };
    SheetDockable::new(CollectedOutlines::from_sheet(&sheet))
}
