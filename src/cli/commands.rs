use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "charsheet", about = concat!("charsheet v", env!("CARGO_PKG_VERSION"), " - character sheet outlines"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to charsheet.toml next to the sheet)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find rows across every outline of a sheet
    Search(SearchArgs),
    /// Render a sheet's outlines
    Show(ShowArgs),
    /// Insert clipboard rows into a sheet
    Paste(PasteArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    /// Sheet file (JSON)
    pub sheet: String,
    /// Text to look for (case-insensitive)
    pub filter: String,
    /// Also select the hits and report which outline takes focus
    #[arg(long)]
    pub select: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Sheet file (JSON)
    pub sheet: String,
    /// Show a single outline (e.g. skills, other-equipment)
    #[arg(long)]
    pub category: Option<String>,
    /// Wrap width in terminal columns
    #[arg(long, default_value_t = 80)]
    pub width: u16,
}

#[derive(Args)]
pub struct PasteArgs {
    /// Sheet file (JSON)
    pub sheet: String,
    /// Rows to insert: a JSON row or array of rows
    pub rows: String,
    /// Save the result back to the sheet file
    #[arg(long)]
    pub write: bool,
}
