use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use regex::Regex;

use super::push_highlighted_spans;
use crate::cell::{CellPalette, CellState, Column, MultiCell, Scale, ThemeFont};
use crate::model::config::DisplayConfig;
use crate::model::row::RowArena;
use crate::model::Category;
use crate::sheet::{CollectedOutlines, ListOutline};

/// Terminal cells per nesting level
const INDENT: u32 = 2;
/// Terminal cells for the disclosure marker
const DISCLOSURE: u32 = 2;

const OPEN_MARKER: &str = "▾ ";
const CLOSED_MARKER: &str = "▸ ";
const LEAF_MARKER: &str = "  ";

/// Draws outlines into terminal lines, one [`MultiCell`] per row.
#[derive(Debug)]
pub struct OutlineView<'a> {
    cell: MultiCell,
    palette: CellPalette,
    search_re: Option<&'a Regex>,
}

impl Default for OutlineView<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> OutlineView<'a> {
    /// A view measuring in terminal cells: one unit per cell, one per line.
    pub fn new() -> Self {
        let font = ThemeFont::new("terminal", 1, 1);
        let display = DisplayConfig {
            scale: 1.0,
            max_preferred_width: 0,
            h_margin: 0,
            indent_width: INDENT,
            disclosure_width: DISCLOSURE,
            primary_font: font.clone(),
            secondary_font: font,
        };
        OutlineView {
            cell: MultiCell::from_config(&display),
            palette: CellPalette::default(),
            search_re: None,
        }
    }

    pub fn with_palette(mut self, palette: CellPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Highlight matches of `re` in the drawn text.
    pub fn with_search(mut self, re: &'a Regex) -> Self {
        self.search_re = Some(re);
        self
    }

    /// Lines for the visible rows of one outline, wrapped to `width`.
    pub fn outline_lines(
        &self,
        arena: &RowArena,
        outline: &ListOutline,
        width: u16,
        focused: bool,
    ) -> Vec<Line<'static>> {
        let model = outline.model();
        let highlight = Style::default().fg(Color::Black).bg(Color::Yellow);
        let mut lines = Vec::new();
        for id in model.visible_rows(arena) {
            let Some(row) = arena.get(id) else {
                continue;
            };
            let marker = match (row.has_children(), row.open) {
                (false, _) => LEAF_MARKER,
                (true, true) => OPEN_MARKER,
                (true, false) => CLOSED_MARKER,
            };
            let indent = " ".repeat(arena.depth(id) * INDENT as usize);
            let state = CellState {
                selected: model.is_selected(id),
                active: focused,
            };
            let text = self.cell.draw(
                arena,
                id,
                Column::fixed(u32::from(width)),
                state,
                Scale::default(),
                &self.palette,
            );
            for (i, cell_line) in text.lines.into_iter().enumerate() {
                let lead = if i == 0 { marker } else { LEAF_MARKER };
                let mut spans = vec![Span::raw(format!("{indent}{lead}"))];
                for span in cell_line.spans {
                    push_highlighted_spans(
                        &mut spans,
                        &span.content,
                        span.style,
                        highlight,
                        self.search_re,
                    );
                }
                let mut line = Line::from(spans);
                if state.selected {
                    line = line.style(Style::default().bg(Color::DarkGray));
                }
                lines.push(line);
            }
        }
        lines
    }
}

/// Lines for the whole sheet: a titled section per outline, blank line
/// between sections. Without `only`, empty outlines are skipped.
pub fn sheet_lines(
    view: &OutlineView<'_>,
    outlines: &CollectedOutlines,
    width: u16,
    only: Option<Category>,
) -> Vec<Line<'static>> {
    let header = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let mut lines = Vec::new();
    for outline in outlines.iter() {
        let category = outline.category();
        match only {
            Some(wanted) if wanted != category => continue,
            None if outline.model().roots().is_empty() => continue,
            _ => {}
        }
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(category.title(), header)));
        lines.extend(view.outline_lines(
            outlines.arena(),
            outline,
            width,
            outlines.focused() == Some(category),
        ));
    }
    lines
}

pub fn render_sheet(
    frame: &mut Frame,
    area: Rect,
    view: &OutlineView<'_>,
    outlines: &CollectedOutlines,
    only: Option<Category>,
) {
    let lines = sheet_lines(view, outlines, area.width, only);
    frame.render_widget(Paragraph::new(lines), area);
}
