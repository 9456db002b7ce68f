mod paste;
pub use paste::cmd_paste;

use std::path::Path;

use crate::cell::{Column, MultiCell, Scale};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{config_io, sheet_io};
use crate::model::Category;
use crate::model::config::SheetConfig;
use crate::render::{OutlineView, plain_text, sheet_lines};
use crate::sheet::{CollectedOutlines, SheetDockable};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Search(args) => cmd_search(args, config, json),
        Commands::Show(args) => cmd_show(args, config, json),
        Commands::Paste(args) => cmd_paste(args, config, json),
    }
}

/// Load a sheet along with the config that applies to it.
pub(super) fn load_sheet_with_config(
    sheet: &str,
    config: Option<&str>,
) -> Result<(SheetConfig, SheetDockable), Box<dyn std::error::Error>> {
    let sheet_path = Path::new(sheet);
    let config_path = config_io::config_path_for(sheet_path, config.map(Path::new));
    let config = config_io::read_config(&config_path)?;
    let file = sheet_io::load_sheet(sheet_path)?;
    let dock = SheetDockable::from_config(CollectedOutlines::from_sheet(&file), &config);
    Ok((config, dock))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_search(
    args: SearchArgs,
    config: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut dock) = load_sheet_with_config(&args.sheet, config)?;
    let hits = dock.search_hits(&args.filter);

    let focus = if args.select {
        let rows: Vec<_> = hits.iter().map(|h| h.row).collect();
        dock.search_select(&rows);
        dock.run_pending();
        dock.outlines().focused()
    } else {
        None
    };

    let arena = dock.outlines().arena();
    let hits: Vec<HitJson> = hits
        .into_iter()
        .filter_map(|hit| {
            Some(HitJson {
                category: hit.category,
                name: arena.get(hit.row)?.data.name.clone(),
                path: ancestor_names(arena, hit.row),
                spans: hit.spans,
            })
        })
        .collect();

    if json {
        let out = SearchJson {
            filter: args.filter,
            hits,
            focus,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for hit in &hits {
            println!("{}", format_hit_line(hit.category, &hit.path, &hit.name));
        }
        if let Some(category) = focus {
            println!("focus: {}", category);
        }
    }
    Ok(())
}

fn cmd_show(
    args: ShowArgs,
    config: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let only = match args.category.as_deref() {
        Some(name) => Some(
            Category::from_name(name).ok_or_else(|| format!("unknown category: {}", name))?,
        ),
        None => None,
    };
    let (config, dock) = load_sheet_with_config(&args.sheet, config)?;

    if json {
        let cell = MultiCell::from_config(&config.display);
        let scale = Scale::new(config.display.scale);
        let arena = dock.outlines().arena();
        let outlines: Vec<OutlineJson> = dock
            .outlines()
            .iter()
            .filter(|o| only.is_none_or(|c| c == o.category()))
            .map(|outline| OutlineJson {
                category: outline.category(),
                rows: outline
                    .model()
                    .iter(arena)
                    .filter_map(|id| {
                        let row = arena.get(id)?;
                        Some(RowJson {
                            name: row.data.name.clone(),
                            notes: row.data.notes.clone(),
                            depth: arena.depth(id),
                            open: row.open,
                            enabled: row.data.enabled,
                            tooltip: cell.tooltip(&row.data),
                            preferred_width: cell.preferred_width(&row.data, scale),
                            preferred_height: cell.preferred_height(
                                arena,
                                id,
                                Column::auto(),
                                scale,
                            ),
                        })
                    })
                    .collect(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&outlines)?);
    } else {
        let view = OutlineView::new();
        for line in sheet_lines(&view, dock.outlines(), args.width, only) {
            println!("{}", plain_text(&line).trim_end());
        }
    }
    Ok(())
}
