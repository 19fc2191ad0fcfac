//! CLI Module for recipebox
//! Lets users read, search, export and import their recipes straight from
//! the shell without launching the full TUI application.

pub mod commands;

use crate::config::Config;
use colored::Colorize;
use std::error::Error;
use std::path::Path;

/// Executes CLI commands based on the provided arguments
pub fn execute_cli(args: &[String], config: &Config) -> Result<(), Box<dyn Error>> {
    let Some(command) = args.first() else {
        print_help();
        return Ok(());
    };

    match command.as_str() {
        "list" | "ls" => commands::list_recipes(config)?,
        "show" | "view" | "cat" => match args.get(1) {
            Some(target) => commands::show_recipe(config, target)?,
            None => usage("Missing recipe number or name", "recipebox show <N|NAME>"),
        },
        "search" | "find" => {
            if args.len() < 2 {
                usage("Missing search query", "recipebox search <QUERY>");
            } else {
                commands::search_recipes(config, &args[1..].join(" "))?;
            }
        }
        "export" => match args.get(1) {
            Some(path) => commands::export(config, Path::new(path))?,
            None => usage("Missing output file", "recipebox export <FILE.json|FILE.yaml>"),
        },
        "import" => match args.get(1) {
            Some(path) => commands::import(config, Path::new(path))?,
            None => usage("Missing input file", "recipebox import <FILE>"),
        },
        "backup" => commands::backup(config)?,
        "help" | "-h" | "--help" => print_help(),
        other => {
            println!("{}  Unknown command: {}", "┃".bright_magenta(), other);
            print_help();
        }
    }

    Ok(())
}

fn usage(error: &str, usage: &str) {
    println!("{}  Error: {}", "┃".bright_magenta(), error);
    println!("{}  Usage: {}", "┃".bright_magenta(), usage);
}

/// Prints the help message with available commands
fn print_help() {
    println!(
        "{}  {}",
        "┃".bright_magenta(),
        "RECIPEBOX CLI - RECIPE MANAGER".bold()
    );

    println!("{}  {}", "┃".bright_magenta(), "USAGE:".bright_yellow());
    println!("{}  recipebox [COMMAND] [ARGS]", "┃".bright_magenta());
    println!("{}  {}", "┃".bright_magenta(), "COMMANDS:".bright_yellow());

    let commands = [
        ("list, ls", "List all recipes"),
        ("show <N|NAME>", "Display a recipe by number or name (partial name works)"),
        ("search <QUERY>", "Search names, ingredients and steps"),
        ("export <FILE>", "Export all recipes to JSON or YAML"),
        ("import <FILE>", "Append recipes from an export or a recipe list"),
        ("backup", "Copy the data file into the backups folder"),
        ("help", "Display this help message"),
    ];
    for (usage, description) in commands {
        println!(
            "{}  {:<27} {}",
            "┃".bright_magenta(),
            usage.bright_white(),
            description
        );
    }

    println!("{}  {}", "┃".bright_magenta(), "TIP:".bright_green());
    println!(
        "{}  Run with no arguments to launch the full TUI (Terminal User Interface) mode",
        "┃".bright_magenta()
    );
}
