pub mod category;
pub mod config;
pub mod outline;
pub mod row;
pub mod snapshot;

pub use category::*;
pub use config::*;
pub use outline::*;
pub use row::*;
pub use snapshot::*;
