pub mod cell;
pub mod cli;
pub mod io;
pub mod model;
pub mod render;
pub mod sheet;
pub mod util;
