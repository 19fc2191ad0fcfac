use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Recipe, RecipeStore};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl ExportFormat {
    /// Picks the format from the file extension, JSON unless it says YAML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => ExportFormat::Yaml,
            _ => ExportFormat::Json,
        }
    }
}

/// Export file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub recipes: Vec<Recipe>,
}

impl ExportData {
    pub fn from_recipes(recipes: &[Recipe]) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: Utc::now(),
            recipes: recipes.to_vec(),
        }
    }
}

// Accepts both the export envelope and a bare recipe list, such as a copy of
// the data file.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Envelope(ExportData),
    Bare(Vec<Recipe>),
}

impl ImportPayload {
    fn into_recipes(self) -> Vec<Recipe> {
        match self {
            ImportPayload::Envelope(data) => data.recipes,
            ImportPayload::Bare(recipes) => recipes,
        }
    }
}

/// Writes all recipes to `path` in the format its extension names.
pub fn export_recipes(recipes: &[Recipe], path: &Path) -> Result<usize> {
    let data = ExportData::from_recipes(recipes);
    let content = match ExportFormat::from_path(path) {
        ExportFormat::Json => {
            serde_json::to_string_pretty(&data).context("Failed to serialize export")?
        }
        ExportFormat::Yaml => serde_yaml::to_string(&data).context("Failed to serialize export")?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create export directory")?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write export file {}", path.display()))?;

    Ok(data.recipes.len())
}

/// Parses an export from text, trying JSON first and then YAML.
pub fn parse_import(content: &str) -> Result<Vec<Recipe>> {
    if let Ok(payload) = serde_json::from_str::<ImportPayload>(content) {
        return Ok(payload.into_recipes());
    }

    serde_yaml::from_str::<ImportPayload>(content)
        .map(ImportPayload::into_recipes)
        .map_err(|_| anyhow::anyhow!("File is neither a recipe export nor a recipe list"))
}

pub fn read_import(path: &Path) -> Result<Vec<Recipe>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file {}", path.display()))?;
    parse_import(&content)
}

/// Appends the valid recipes to the store. Returns `(added, skipped)`.
pub fn merge_import(store: &mut RecipeStore, recipes: Vec<Recipe>) -> (usize, usize) {
    let total = recipes.len();
    let valid: Vec<Recipe> = recipes.into_iter().filter(Recipe::is_valid).collect();
    let added = valid.len();

    store.extend(valid);

    (added, total - added)
}
