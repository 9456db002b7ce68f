pub mod collected;
pub mod dockable;
pub mod list_outline;
pub mod postprocess;
pub mod queue;
pub mod undo;

pub use collected::CollectedOutlines;
pub use dockable::{AddRowsReport, SearchHit, SheetDockable};
pub use list_outline::{ListOutline, OutlineHost};
pub use postprocess::{PlaceholderSubstitution, RowPostProcessor};
pub use queue::{EventQueue, UiTask};
pub use undo::{UndoManager, UndoRecord};
