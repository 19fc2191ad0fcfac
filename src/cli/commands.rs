use crate::config::Config;
use crate::models::{
    RECIPES_KEY, Recipe, RecipeStore, StorageManager, export_recipes, merge_import, read_import,
    read_recipes,
};
use crate::search::SearchFilter;
use colored::Colorize;
use std::error::Error;
use std::path::Path;
use tracing::info;

fn open_storage(config: &Config) -> Result<StorageManager, Box<dyn Error>> {
    Ok(StorageManager::new(&config.data_dir)?)
}

fn load_recipes(config: &Config) -> Result<Vec<Recipe>, Box<dyn Error>> {
    let storage = open_storage(config)?;
    Ok(read_recipes(&storage)?)
}

/// Resolves a 1-based number, an exact name or a partial name to a store
/// index, in that order. Names compare case-insensitively.
pub fn find_recipe(recipes: &[Recipe], target: &str) -> Option<usize> {
    if let Ok(number) = target.trim().parse::<usize>() {
        if (1..=recipes.len()).contains(&number) {
            return Some(number - 1);
        }
    }

    let name = target.trim().to_lowercase();
    recipes
        .iter()
        .position(|r| r.name.to_lowercase() == name)
        .or_else(|| {
            recipes
                .iter()
                .position(|r| r.name.to_lowercase().contains(&name))
        })
}

pub fn list_recipes(config: &Config) -> Result<(), Box<dyn Error>> {
    print_list(&load_recipes(config)?);
    Ok(())
}

fn print_list(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("{}  No recipes yet", "┃".bright_magenta());
        return;
    }

    println!(
        "{}  {} ({})",
        "┃".bright_magenta(),
        "RECIPES".bright_green().bold(),
        recipes.len()
    );
    println!("{}", "─".repeat(60).bright_magenta());
    for (index, recipe) in recipes.iter().enumerate() {
        print_summary_line(index, recipe);
    }
}

fn print_summary_line(index: usize, recipe: &Recipe) {
    println!(
        "{}  {}. {} {}",
        "┃".bright_magenta(),
        (index + 1).to_string().yellow(),
        recipe.name.bright_white(),
        format!(
            "({} ingredients, {} steps)",
            recipe.ingredients.len(),
            recipe.steps.len()
        )
        .bright_black()
    );
}

pub fn show_recipe(config: &Config, target: &str) -> Result<(), Box<dyn Error>> {
    let recipes = load_recipes(config)?;

    match find_recipe(&recipes, target) {
        Some(index) => display_recipe(index, &recipes[index]),
        None => {
            println!(
                "{}  No recipe found for: {}",
                "┃".bright_magenta(),
                target
            );
            if !recipes.is_empty() {
                println!("{}  Available recipes:", "┃".bright_magenta());
                println!("{}", "─".repeat(60).bright_magenta());
                for (index, recipe) in recipes.iter().enumerate().take(10) {
                    print_summary_line(index, recipe);
                }
                if recipes.len() > 10 {
                    println!(
                        "{}  ... and {} more",
                        "┃".bright_magenta(),
                        recipes.len() - 10
                    );
                }
            }
        }
    }

    Ok(())
}

/// Helper function to display a full recipe
fn display_recipe(index: usize, recipe: &Recipe) {
    println!(
        "{}  {} {} {}",
        "┃".bright_magenta(),
        "RECIPE".bright_green().bold(),
        format!("#{}", index + 1).yellow(),
        recipe.name.bold()
    );
    println!("{}", "─".repeat(60).bright_magenta());

    println!("{}  {}", "┃".bright_magenta(), "Ingredients".bright_blue());
    for ingredient in &recipe.ingredients {
        if ingredient.quantity.is_empty() {
            println!("{}    • {}", "┃".bright_magenta(), ingredient.name);
        } else {
            println!(
                "{}    • {} {}",
                "┃".bright_magenta(),
                ingredient.quantity.bright_yellow(),
                ingredient.name
            );
        }
    }

    println!("{}  {}", "┃".bright_magenta(), "Steps".bright_cyan());
    for (i, step) in recipe.steps.iter().enumerate() {
        println!("{}    {}. {}", "┃".bright_magenta(), i + 1, step);
    }
}

/// The filter the list view would show for `query`.
pub fn search_results(recipes: &[Recipe], query: &str) -> SearchFilter {
    let mut filter = SearchFilter::default();
    filter.set_query(query, recipes);
    filter
}

/// A blank query is no filter at all and prints the whole list.
pub fn search_recipes(config: &Config, query: &str) -> Result<(), Box<dyn Error>> {
    let recipes = load_recipes(config)?;
    let filter = search_results(&recipes, query);

    let Some(message) = &filter.message else {
        print_list(&recipes);
        return Ok(());
    };

    println!("{}  {}", "┃".bright_magenta(), message.bright_white());
    if !filter.matches.is_empty() {
        println!("{}", "─".repeat(60).bright_magenta());
    }
    for &index in &filter.matches {
        print_summary_line(index, &recipes[index]);
    }

    Ok(())
}

pub fn export(config: &Config, path: &Path) -> Result<(), Box<dyn Error>> {
    let recipes = load_recipes(config)?;
    let count = export_recipes(&recipes, path)?;
    info!(count, path = %path.display(), "exported recipes");

    println!(
        "{}  Exported {} recipes to {}",
        "┃".bright_magenta(),
        count.to_string().bright_green(),
        path.display()
    );
    Ok(())
}

pub fn import(config: &Config, path: &Path) -> Result<(), Box<dyn Error>> {
    let incoming = read_import(path)?;

    // Refuse to write over data that cannot be read.
    let storage = open_storage(config)?;
    read_recipes(&storage)?;

    let (mut store, _) = RecipeStore::load(Box::new(storage));
    let (added, skipped) = merge_import(&mut store, incoming);
    if let Some(error) = store.take_persist_warning() {
        return Err(error.into());
    }
    info!(added, skipped, path = %path.display(), "imported recipes");

    println!(
        "{}  Imported {} recipes ({} skipped as incomplete)",
        "┃".bright_magenta(),
        added.to_string().bright_green(),
        skipped
    );
    Ok(())
}

pub fn backup(config: &Config) -> Result<(), Box<dyn Error>> {
    let storage = open_storage(config)?;
    let path = storage.backup(RECIPES_KEY)?;

    println!(
        "{}  Backup written to {}",
        "┃".bright_magenta(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, KeyValueStore};
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            data_dir: dir.path().join("data"),
            log_level: "info".to_string(),
        }
    }

    fn recipes() -> Vec<Recipe> {
        ["Tea", "Iced Tea", "Toast"]
            .into_iter()
            .map(|name| Recipe::new(name, vec![Ingredient::new("", "x")], vec!["y".to_string()]))
            .collect()
    }

    #[test]
    fn finds_by_number_then_exact_then_partial() {
        let recipes = recipes();
        assert_eq!(find_recipe(&recipes, "3"), Some(2));
        assert_eq!(find_recipe(&recipes, "tea"), Some(0));
        assert_eq!(find_recipe(&recipes, "iced"), Some(1));
        assert_eq!(find_recipe(&recipes, "ToA"), Some(2));
        assert_eq!(find_recipe(&recipes, "pizza"), None);
    }

    #[test]
    fn out_of_range_number_falls_back_to_names() {
        assert_eq!(find_recipe(&recipes(), "0"), None);
        assert_eq!(find_recipe(&recipes(), "9"), None);
    }

    #[test]
    fn blank_search_lists_everything_without_a_message() {
        let filter = search_results(&recipes(), "   ");
        assert!(filter.message.is_none());
        assert_eq!(filter.visible(3), vec![0, 1, 2]);
    }

    #[test]
    fn search_matches_the_list_view() {
        let filter = search_results(&recipes(), " TEA ");
        assert_eq!(filter.visible(3), vec![0, 1]);
        assert_eq!(filter.message.as_deref(), Some("Found 2 recipes matching \"TEA\""));
    }

    #[test]
    fn blank_search_command_succeeds() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        assert!(search_recipes(&config, " ").is_ok());
    }

    #[test]
    fn import_appends_only_complete_recipes() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let incomplete = Recipe::new("Half", vec![], vec!["y".to_string()]);
        let mut incoming = recipes();
        incoming.push(incomplete);
        let file = dir.path().join("incoming.json");
        fs::write(&file, serde_json::to_string(&incoming).unwrap()).unwrap();

        import(&config, &file).unwrap();

        let stored = read_recipes(&StorageManager::new(&config.data_dir).unwrap()).unwrap();
        assert_eq!(stored, recipes());
    }

    #[test]
    fn import_refuses_to_overwrite_unreadable_data() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::create_dir_all(&config.data_dir).unwrap();
        let data_file = config.data_dir.join("recipes.json");
        fs::write(&data_file, "[{\"name\":").unwrap();
        let file = dir.path().join("incoming.json");
        fs::write(&file, serde_json::to_string(&recipes()).unwrap()).unwrap();

        assert!(import(&config, &file).is_err());
        assert_eq!(fs::read_to_string(&data_file).unwrap(), "[{\"name\":");
    }

    #[test]
    fn backup_copies_the_recipe_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        assert!(backup(&config).is_err());

        let mut storage = StorageManager::new(&config.data_dir).unwrap();
        storage.set(RECIPES_KEY, "[]").unwrap();
        backup(&config).unwrap();

        let backups: Vec<_> = fs::read_dir(config.data_dir.join("backups")).unwrap().collect();
        assert_eq!(backups.len(), 1);
    }
}
