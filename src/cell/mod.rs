pub mod collate;
pub mod font;
pub mod multi_cell;
pub mod wrap;

pub use font::{Scale, ThemeFont};
pub use multi_cell::{CellPalette, CellState, Column, MultiCell};
