use std::path::Path;

use crate::cli::commands::PasteArgs;
use crate::cli::output::{InsertedJson, PasteJson, format_paste_summary};
use crate::io::sheet_io;

use super::load_sheet_with_config;

/// Insert clipboard rows into a sheet, optionally saving the result.
pub fn cmd_paste(
    args: PasteArgs,
    config: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut dock) = load_sheet_with_config(&args.sheet, config)?;
    let rows = sheet_io::load_rows(Path::new(&args.rows))?;

    let report = dock.add_rows(&rows);
    dock.run_pending();

    let arena = dock.outlines().arena();
    let inserted: Vec<InsertedJson> = report
        .inserted
        .iter()
        .map(|(category, ids)| InsertedJson {
            category: *category,
            names: ids
                .iter()
                .filter_map(|id| arena.get(*id).map(|r| r.data.name.clone()))
                .collect(),
        })
        .collect();

    let saved = args.write && !report.is_empty();
    if saved {
        sheet_io::save_sheet(Path::new(&args.sheet), &dock.outlines().to_sheet())?;
    }

    if json {
        let out = PasteJson {
            inserted,
            dropped: report.dropped,
            saved,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_paste_summary(&inserted, report.dropped) {
            println!("{}", line);
        }
        if saved {
            println!("saved {}", args.sheet);
        }
    }
    Ok(())
}
