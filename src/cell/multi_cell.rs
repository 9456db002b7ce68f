use std::cmp::Ordering;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::collate::SortCollator;
use super::font::{Scale, ThemeFont};
use super::wrap::wrap_text;
use crate::model::config::DisplayConfig;
use crate::model::row::{RowArena, RowData, RowId};

/// Horizontal margin on each side of the cell, before scaling
pub const H_MARGIN: u32 = 2;

/// Preferred width cap used unless configured otherwise
pub const DEFAULT_MAX_PREFERRED_WIDTH: i32 = 250;

/// A column as the cell sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Current width; `None` while the column sizes itself to its content
    pub width: Option<u32>,
    /// The first column carries the tree indentation and disclosure triangle
    pub first: bool,
}

impl Column {
    pub fn fixed(width: u32) -> Self {
        Column {
            width: Some(width),
            first: true,
        }
    }

    pub fn auto() -> Self {
        Column {
            width: None,
            first: true,
        }
    }

    pub fn not_first(mut self) -> Self {
        self.first = false;
        self
    }
}

/// Foreground colors a cell can be drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPalette {
    pub foreground: Color,
    pub on_selection: Color,
    pub on_inactive_selection: Color,
    pub warning: Color,
}

impl Default for CellPalette {
    fn default() -> Self {
        CellPalette {
            foreground: Color::Reset,
            on_selection: Color::White,
            on_inactive_selection: Color::Gray,
            warning: Color::Red,
        }
    }
}

/// Selection state of the row being drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellState {
    pub selected: bool,
    /// Whether the outline holding the row has focus
    pub active: bool,
}

/// A cell showing a row's primary text with its notes underneath.
#[derive(Debug)]
pub struct MultiCell {
    max_preferred_width: i32,
    h_margin: u32,
    indent_width: u32,
    disclosure_width: u32,
    primary_font: ThemeFont,
    secondary_font: ThemeFont,
    collator: SortCollator,
}

impl Default for MultiCell {
    fn default() -> Self {
        MultiCell::new()
    }
}

impl MultiCell {
    /// A sheet cell with the default maximum preferred width.
    pub fn new() -> Self {
        MultiCell::with_max_preferred_width(DEFAULT_MAX_PREFERRED_WIDTH, false)
    }

    /// A cell for an editor dialog, which uses the field fonts.
    pub fn for_editor() -> Self {
        MultiCell::with_max_preferred_width(DEFAULT_MAX_PREFERRED_WIDTH, true)
    }

    /// `max_preferred_width` of zero or less means no cap.
    pub fn with_max_preferred_width(max_preferred_width: i32, for_editor: bool) -> Self {
        let defaults = DisplayConfig::default();
        let (primary_font, secondary_font) = if for_editor {
            (ThemeFont::field_primary(), ThemeFont::field_secondary())
        } else {
            (ThemeFont::page_primary(), ThemeFont::page_secondary())
        };
        MultiCell {
            max_preferred_width,
            h_margin: H_MARGIN,
            indent_width: defaults.indent_width,
            disclosure_width: defaults.disclosure_width,
            primary_font,
            secondary_font,
            collator: SortCollator::default(),
        }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        MultiCell {
            max_preferred_width: config.max_preferred_width,
            h_margin: config.h_margin,
            indent_width: config.indent_width,
            disclosure_width: config.disclosure_width,
            primary_font: config.primary_font.clone(),
            secondary_font: config.secondary_font.clone(),
            collator: SortCollator::default(),
        }
    }

    pub fn with_collator(mut self, collator: SortCollator) -> Self {
        self.collator = collator;
        self
    }

    pub fn primary_font(&self) -> &ThemeFont {
        &self.primary_font
    }

    pub fn secondary_font(&self) -> &ThemeFont {
        &self.secondary_font
    }

    pub fn primary_text<'a>(&self, row: &'a RowData) -> &'a str {
        &row.name
    }

    pub fn secondary_text<'a>(&self, row: &'a RowData) -> &'a str {
        &row.notes
    }

    /// Text used for sorting: primary, then secondary on its own line.
    pub fn sort_text(&self, row: &RowData) -> String {
        let mut text = self.primary_text(row).to_string();
        let secondary = self.secondary_text(row);
        if !secondary.is_empty() {
            text.push('\n');
            text.push_str(secondary);
        }
        text
    }

    pub fn compare(&self, one: &RowData, two: &RowData) -> Ordering {
        self.collator
            .compare(&self.sort_text(one), &self.sort_text(two))
    }

    /// Unsatisfied rows are always drawn in the warning color, even when
    /// selected.
    pub fn foreground(&self, row: &RowData, state: CellState, palette: &CellPalette) -> Color {
        if !row.is_satisfied() {
            return palette.warning;
        }
        if state.selected {
            if state.active {
                palette.on_selection
            } else {
                palette.on_inactive_selection
            }
        } else {
            palette.foreground
        }
    }

    /// The reason a row is unsatisfied, or else its own non-blank tooltip.
    pub fn tooltip(&self, row: &RowData) -> Option<String> {
        if let Some(reason) = &row.unsatisfied {
            return Some(reason.clone());
        }
        row.tooltip
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
    }

    pub fn preferred_width(&self, row: &RowData, scale: Scale) -> u32 {
        let font = scale.scale_font(&self.primary_font);
        let mut width = font.text_width(self.primary_text(row));
        if self.max_preferred_width > 0 {
            width = width.min(scale.scale(self.max_preferred_width as u32));
        }
        width + scale.scale(self.h_margin) * 2
    }

    pub fn preferred_height(&self, arena: &RowArena, id: RowId, column: Column, scale: Scale) -> u32 {
        let Some(row) = arena.get(id) else {
            return 0;
        };
        let indent = self.indent(arena, id, column, scale);
        let font = scale.scale_font(&self.primary_font);
        let primary = self.wrap(self.primary_text(&row.data), &font, column, indent, scale);
        let mut height = font.text_height(&primary.join("\n"));
        let notes = self.secondary_text(&row.data);
        if !notes.trim().is_empty() {
            let font = scale.scale_font(&self.secondary_font);
            let secondary = self.wrap(notes, &font, column, indent, scale);
            height += font.text_height(&secondary.join("\n"));
        }
        height
    }

    /// Draw the cell as styled lines. Switched-off rows get a struck-through
    /// primary line; notes follow in the secondary style when not blank.
    pub fn draw(
        &self,
        arena: &RowArena,
        id: RowId,
        column: Column,
        state: CellState,
        scale: Scale,
        palette: &CellPalette,
    ) -> Text<'static> {
        let Some(row) = arena.get(id) else {
            return Text::default();
        };
        let indent = self.indent(arena, id, column, scale);
        let fg = self.foreground(&row.data, state, palette);

        let mut primary_style = Style::default().fg(fg).add_modifier(Modifier::BOLD);
        if row.data.is_switched_off() {
            primary_style = primary_style.add_modifier(Modifier::CROSSED_OUT);
        }
        let font = scale.scale_font(&self.primary_font);
        let mut lines: Vec<Line<'static>> = self
            .wrap(self.primary_text(&row.data), &font, column, indent, scale)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, primary_style)))
            .collect();

        let notes = self.secondary_text(&row.data);
        if !notes.trim().is_empty() {
            let secondary_style = Style::default().fg(fg).add_modifier(Modifier::ITALIC);
            let font = scale.scale_font(&self.secondary_font);
            lines.extend(
                self.wrap(notes, &font, column, indent, scale)
                    .into_iter()
                    .map(|l| Line::from(Span::styled(l, secondary_style))),
            );
        }
        Text::from(lines)
    }

    /// Space taken by tree indentation in the first column.
    fn indent(&self, arena: &RowArena, id: RowId, column: Column, scale: Scale) -> u32 {
        let owned = arena.get(id).is_some_and(|r| r.owner().is_some());
        if !column.first || !owned {
            return 0;
        }
        let depth = arena.depth(id) as u32;
        scale.scale(self.indent_width * depth + self.disclosure_width)
    }

    fn wrap(&self, text: &str, font: &ThemeFont, column: Column, indent: u32, scale: Scale) -> Vec<String> {
        let width = match column.width {
            Some(w) => w,
            None if self.max_preferred_width < 1 => {
                return text.split('\n').map(str::to_string).collect();
            }
            None => scale.scale(self.max_preferred_width as u32),
        };
        let available = width.saturating_sub(indent + scale.scale(self.h_margin) * 2);
        wrap_text(text, font.cells_in(available))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::outline::OutlineModel;
    use crate::model::row::RowKind;
    use crate::model::Category;

    fn advantage(name: &str) -> RowData {
        RowData::new(RowKind::Advantage, name)
    }

    fn single(data: RowData) -> (RowArena, RowId) {
        let mut arena = RowArena::new();
        let id = arena.insert(data);
        (arena, id)
    }

    #[test]
    fn preferred_width_is_text_plus_margins() {
        let cell = MultiCell::new();
        assert_eq!(cell.preferred_width(&advantage("Wealth"), Scale::default()), 6 * 6 + 4);
    }

    #[test]
    fn preferred_width_is_capped() {
        let cell = MultiCell::new();
        let long = advantage(&"x".repeat(60));
        assert_eq!(cell.preferred_width(&long, Scale::default()), 250 + 4);
        assert_eq!(cell.preferred_width(&long, Scale::new(2.0)), 500 + 8);
    }

    #[test]
    fn preferred_width_without_cap() {
        let cell = MultiCell::with_max_preferred_width(-1, false);
        let long = advantage(&"x".repeat(60));
        assert_eq!(cell.preferred_width(&long, Scale::default()), 360 + 4);
    }

    #[test]
    fn preferred_height_sums_both_lines() {
        let cell = MultiCell::new();
        let column = Column::fixed(100).not_first();
        let (arena, id) = single(advantage("Wealth"));
        assert_eq!(cell.preferred_height(&arena, id, column, Scale::default()), 12);

        let (arena, id) = single(advantage("Wealth").with_notes("Comfortable"));
        assert_eq!(cell.preferred_height(&arena, id, column, Scale::default()), 12 + 10);
    }

    #[test]
    fn blank_notes_add_no_height() {
        let cell = MultiCell::new();
        let (arena, id) = single(advantage("Wealth").with_notes("   "));
        let h = cell.preferred_height(&arena, id, Column::fixed(100).not_first(), Scale::default());
        assert_eq!(h, 12);
    }

    #[test]
    fn preferred_height_wraps_to_column() {
        let cell = MultiCell::new();
        // 100 wide minus 4 of margin leaves 16 cells of 6 units
        let (arena, id) = single(advantage("Combat Reflexes and more"));
        let h = cell.preferred_height(&arena, id, Column::fixed(100).not_first(), Scale::default());
        assert_eq!(h, 24);
    }

    #[test]
    fn auto_column_wraps_at_max_preferred_width() {
        let cell = MultiCell::new();
        let (arena, id) = single(advantage("Combat Reflexes and more"));
        assert_eq!(cell.preferred_height(&arena, id, Column::auto(), Scale::default()), 12);

        let (arena, id) = single(advantage(&"word ".repeat(20)));
        // 246 units of room hold 41 cells, so 100 cells take three lines
        assert_eq!(cell.preferred_height(&arena, id, Column::auto(), Scale::default()), 36);

        let uncapped = MultiCell::with_max_preferred_width(0, false);
        assert_eq!(uncapped.preferred_height(&arena, id, Column::auto(), Scale::default()), 12);
    }

    #[test]
    fn first_column_indents_nested_rows() {
        let cell = MultiCell::new();
        let mut arena = RowArena::new();
        let mut model = OutlineModel::new(Category::Advantages);
        let parent = arena.insert(advantage("Parent"));
        let child = arena.insert(advantage("Abcdefghij Klmno"));
        model.add_row(&mut arena, parent);
        model.add_child(&mut arena, parent, child);

        // Not indented: 96 units -> 16 cells, fits on one line
        let flat = cell.preferred_height(&arena, child, Column::fixed(100).not_first(), Scale::default());
        assert_eq!(flat, 12);
        // Indented by 16 + 12: 68 units -> 11 cells, wraps
        let nested = cell.preferred_height(&arena, child, Column::fixed(100), Scale::default());
        assert_eq!(nested, 24);
    }

    #[test]
    fn foreground_follows_selection_and_satisfaction() {
        let cell = MultiCell::new();
        let palette = CellPalette::default();
        let ok = advantage("Luck");
        let mut bad = advantage("Magery");
        bad.unsatisfied = Some("Requires Magery 0".into());

        let plain = CellState::default();
        let active = CellState { selected: true, active: true };
        let inactive = CellState { selected: true, active: false };

        assert_eq!(cell.foreground(&ok, plain, &palette), palette.foreground);
        assert_eq!(cell.foreground(&ok, active, &palette), palette.on_selection);
        assert_eq!(cell.foreground(&ok, inactive, &palette), palette.on_inactive_selection);
        assert_eq!(cell.foreground(&bad, active, &palette), palette.warning);
        assert_eq!(cell.foreground(&bad, plain, &palette), palette.warning);
    }

    #[test]
    fn tooltip_prefers_unsatisfied_reason() {
        let cell = MultiCell::new();
        let mut row = advantage("Magery");
        assert_eq!(cell.tooltip(&row), None);
        row.tooltip = Some("  ".into());
        assert_eq!(cell.tooltip(&row), None);
        row.tooltip = Some("Costs 15 points".into());
        assert_eq!(cell.tooltip(&row).as_deref(), Some("Costs 15 points"));
        row.unsatisfied = Some("Requires IQ 12+".into());
        assert_eq!(cell.tooltip(&row).as_deref(), Some("Requires IQ 12+"));
    }

    #[test]
    fn compare_is_case_insensitive_and_includes_notes() {
        let cell = MultiCell::new();
        assert_eq!(cell.compare(&advantage("Axe"), &advantage("axe")), Ordering::Equal);
        assert_eq!(
            cell.compare(&advantage("Skill").with_notes("b"), &advantage("skill").with_notes("a")),
            Ordering::Greater
        );
        assert_eq!(
            cell.compare(&advantage("Aa").with_notes("zzz"), &advantage("Ab")),
            Ordering::Less
        );
    }

    #[test]
    fn sort_text_joins_lines() {
        let cell = MultiCell::new();
        assert_eq!(cell.sort_text(&advantage("Wealth")), "Wealth");
        assert_eq!(
            cell.sort_text(&advantage("Wealth").with_notes("Comfortable")),
            "Wealth\nComfortable"
        );
    }

    #[test]
    fn draw_strikes_through_switched_off_rows() {
        let cell = MultiCell::new();
        let mut data = advantage("Berserk").with_notes("Self-control 12");
        data.enabled = Some(false);
        let (arena, id) = single(data);
        let text = cell.draw(
            &arena,
            id,
            Column::fixed(200),
            CellState::default(),
            Scale::default(),
            &CellPalette::default(),
        );
        assert_eq!(text.lines.len(), 2);
        let primary = &text.lines[0].spans[0];
        assert_eq!(primary.content, "Berserk");
        assert!(primary.style.add_modifier.contains(Modifier::CROSSED_OUT));
        let secondary = &text.lines[1].spans[0];
        assert_eq!(secondary.content, "Self-control 12");
        assert!(!secondary.style.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn draw_enabled_switchable_row_is_not_struck() {
        let cell = MultiCell::for_editor();
        let mut data = advantage("Berserk");
        data.enabled = Some(true);
        let (arena, id) = single(data);
        let text = cell.draw(
            &arena,
            id,
            Column::fixed(200),
            CellState::default(),
            Scale::default(),
            &CellPalette::default(),
        );
        assert_eq!(text.lines.len(), 1);
        assert!(!text.lines[0].spans[0].style.add_modifier.contains(Modifier::CROSSED_OUT));
    }
}
