//! CLI Module for swatchbook
//! Command-line front end over the swatch engine. Colors persist in the
//! configured data directory between invocations; combination history only
//! lasts for a single invocation.

pub mod commands;

use crate::app::App;
use crate::config::Settings;
use crate::models::JsonFileBackend;
use colored::Colorize;
use std::error::Error;
use std::path::Path;

/// Executes CLI commands based on the provided arguments
pub fn execute_cli(args: &[String], settings: &Settings) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        print_help();
        return Ok(());
    }

    let flag = |name: &str| args.iter().skip(1).any(|a| a == name);
    let positional: Vec<&str> = args
        .iter()
        .skip(1)
        .map(String::as_str)
        .filter(|a| !a.starts_with("--"))
        .collect();

    let command = args[0].as_str();
    if command == "help" {
        print_help();
        return Ok(());
    }

    let backend = JsonFileBackend::new(settings.resolved_data_dir())?;
    let mut app = App::new(backend)?;

    match command {
        "list" | "ls" => {
            commands::list_colors(&mut app, positional.first().copied(), flag("--fav"));
        }
        "add" | "new" => match positional.as_slice() {
            [name, hex, ..] => commands::add_color(&mut app, name, hex)?,
            _ => usage("add <NAME> <HEX>"),
        },
        "favorite" | "fav" => match positional.as_slice() {
            [id, ..] => commands::toggle_favorite(&mut app, id)?,
            _ => usage("fav <ID>"),
        },
        "rename" => match positional.as_slice() {
            [id, name, ..] => commands::rename_color(&mut app, id, name)?,
            // Empty names are allowed when renaming
            [id] => commands::rename_color(&mut app, id, "")?,
            _ => usage("rename <ID> <NAME>"),
        },
        "delete" | "rm" => match positional.as_slice() {
            [id, ..] => commands::delete_color(&mut app, id)?,
            _ => usage("rm <ID>"),
        },
        "clear" => commands::clear_colors(&mut app, flag("--yes"))?,
        "combine" | "mix" => match positional.as_slice() {
            [a, b, rest @ ..] => commands::combine_colors(&mut app, a, b, rest.first().copied())?,
            _ => usage("combine <HEX> <HEX> [NAME]"),
        },
        "export" => match positional.as_slice() {
            [path, ..] => commands::export_colors(
                &app,
                Path::new(path),
                flag("--fav"),
                settings.pretty_exports,
            )?,
            _ => usage("export <PATH> [--fav]"),
        },
        "import" => match positional.as_slice() {
            [path, ..] => commands::import_colors(&mut app, Path::new(path))?,
            _ => usage("import <PATH>"),
        },
        _ => {
            println!("{}  Unknown command: {}", "┃".bright_magenta(), command);
            print_help();
        }
    }

    Ok(())
}

fn usage(text: &str) {
    println!("{}  Error: Missing arguments", "┃".bright_magenta());
    println!("{}  Usage: swatchbook {}", "┃".bright_magenta(), text);
}

/// Prints the help message with available commands
fn print_help() {
    println!(
        "{}  {}",
        "┃".bright_magenta(),
        "SWATCHBOOK - COLOR SWATCH MANAGER".bold()
    );

    println!("{}  {}", "┃".bright_magenta(), "USAGE:".bright_yellow());
    println!("{}  swatchbook [COMMAND] [ARGS]", "┃".bright_magenta());
    println!("{}  {}", "┃".bright_magenta(), "COMMANDS:".bright_yellow());

    let rows = [
        ("list, ls [QUERY] [--fav]", "List saved colors matching name or hex"),
        ("add <NAME> <HEX>", "Save a new color"),
        ("fav <ID>", "Toggle a color's favorite flag"),
        ("rename <ID> <NAME>", "Rename a color"),
        ("rm <ID>", "Delete a color"),
        ("clear --yes", "Delete every saved color"),
        ("combine <HEX> <HEX> [NAME]", "Blend two colors, optionally saving the result"),
        ("export <PATH> [--fav]", "Export colors and palettes to JSON"),
        ("import <PATH>", "Replace colors and palettes from a JSON export"),
        ("help", "Display this help message"),
    ];
    for (command, description) in rows {
        println!(
            "{}  {:<27} {}",
            "┃".bright_magenta(),
            command.bright_white(),
            description
        );
    }
}
