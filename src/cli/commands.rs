use crate::app::App;
use crate::models::{Color, ExportOptions, JsonFileBackend, Palette, write_export};
use colored::Colorize;
use std::error::Error;
use std::path::Path;
use tokio::runtime::Runtime;

type CliApp = App<JsonFileBackend>;

/// Lists saved colors, optionally filtered by a query and favorites
pub fn list_colors(app: &mut CliApp, query: Option<&str>, favorites_only: bool) {
    app.set_search_query(query.unwrap_or_default());
    app.show_favorites_only = favorites_only;

    let visible = app.visible_colors();
    if visible.is_empty() {
        println!("{}  No colors found", "┃".bright_magenta());
        return;
    }

    println!(
        "{}  {} ({} of {})",
        "┃".bright_magenta(),
        "COLORS".bright_green().bold(),
        visible.len(),
        app.colors().len()
    );
    println!("{}", "─".repeat(60).bright_magenta());

    for color in visible {
        print_color_row(color);
    }
}

fn print_color_row(color: &Color) {
    let star = if color.is_favorite { "★" } else { " " };
    let swatch = "  ".on_truecolor(color.rgb.r, color.rgb.g, color.rgb.b);

    println!(
        "{}  {} {} {} {:<24} {}",
        "┃".bright_magenta(),
        star.bright_yellow(),
        swatch,
        color.hex.bright_white(),
        color.name,
        color.id.dimmed()
    );
}

pub fn add_color(app: &mut CliApp, name: &str, hex: &str) -> Result<(), Box<dyn Error>> {
    app.on_picker_change(hex);
    match app.create_color(name)? {
        Some(color) => {
            println!("{}  Saved {}", "┃".bright_magenta(), color.name.bold());
            print_color_row(&color);
        }
        None => println!("{}  Error: Color name cannot be empty", "┃".bright_magenta()),
    }
    Ok(())
}

pub fn toggle_favorite(app: &mut CliApp, id: &str) -> Result<(), Box<dyn Error>> {
    if app.on_toggle_favorite(id)? {
        let marked = app.store.get(id).is_some_and(|c| c.is_favorite);
        println!(
            "{}  Color {} as favorite",
            "┃".bright_magenta(),
            if marked { "marked" } else { "unmarked" }
        );
    } else {
        not_found(id);
    }
    Ok(())
}

pub fn rename_color(app: &mut CliApp, id: &str, name: &str) -> Result<(), Box<dyn Error>> {
    if app.on_rename(id, name)? {
        println!("{}  Renamed to {}", "┃".bright_magenta(), name.bold());
    } else {
        not_found(id);
    }
    Ok(())
}

pub fn delete_color(app: &mut CliApp, id: &str) -> Result<(), Box<dyn Error>> {
    if app.on_delete(id)? {
        println!("{}  Deleted {}", "┃".bright_magenta(), id);
    } else {
        not_found(id);
    }
    Ok(())
}

pub fn clear_colors(app: &mut CliApp, confirmed: bool) -> Result<(), Box<dyn Error>> {
    if !confirmed {
        println!(
            "{}  This deletes all {} saved colors. Re-run with --yes to confirm.",
            "┃".bright_magenta(),
            app.colors().len()
        );
        return Ok(());
    }
    app.clear_all()?;
    println!(
        "{}  All colors cleared from {}",
        "┃".bright_magenta(),
        app.store.backend().dir().display()
    );
    Ok(())
}

/// Blends two colors and optionally saves the result under `name`
pub fn combine_colors(
    app: &mut CliApp,
    hex_a: &str,
    hex_b: &str,
    name: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let result = app.combine(hex_a, hex_b)?;
    println!(
        "{}  {} + {} = {}",
        "┃".bright_magenta(),
        hex_a,
        hex_b,
        result.bright_white().bold()
    );

    if let Some(name) = name {
        app.on_save_name(0, name)?;
        add_color(app, name, &result)?;
    }
    Ok(())
}

pub fn export_colors(
    app: &CliApp,
    path: &Path,
    favorites_only: bool,
    pretty: bool,
) -> Result<(), Box<dyn Error>> {
    let options = ExportOptions {
        favorites_only,
        pretty,
    };
    let document = app.export_document(&options);
    write_export(path, &document, &options)?;

    println!(
        "{}  Exported {} colors and {} palettes from {} to {}",
        "┃".bright_magenta(),
        document.colors.len(),
        document.palettes.len(),
        app.store.backend().dir().display(),
        path.display()
    );
    print_palette_names(&app.palettes);
    Ok(())
}

pub fn import_colors(app: &mut CliApp, path: &Path) -> Result<(), Box<dyn Error>> {
    let runtime = Runtime::new()?;
    let summary = runtime.block_on(app.import_file(path))?;

    let describe = |count: Option<usize>| match count {
        Some(n) => n.to_string(),
        None => "unchanged".to_string(),
    };
    println!(
        "{}  Imported colors: {}, palettes: {} into {}",
        "┃".bright_magenta(),
        describe(summary.colors),
        describe(summary.palettes),
        app.store.backend().dir().display()
    );
    if summary.palettes.is_some() {
        print_palette_names(&app.palettes);
    }
    Ok(())
}

fn print_palette_names(palettes: &[Palette]) {
    for (idx, palette) in palettes.iter().enumerate() {
        println!(
            "{}  {}. {}",
            "┃".bright_magenta(),
            (idx + 1).to_string().yellow(),
            palette.name().unwrap_or("(unnamed palette)").bright_white()
        );
    }
}

fn not_found(id: &str) {
    println!("{}  No color found with ID: {}", "┃".bright_magenta(), id);
}
