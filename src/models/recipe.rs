use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single ingredient line, e.g. `2 cups` of `flour`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub quantity: String,
    pub name: String,
}

impl Ingredient {
    pub fn new(quantity: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            quantity: quantity.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantity.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.quantity, self.name)
        }
    }
}

// Older data stored ingredients as bare strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum IngredientRepr {
    Full {
        #[serde(default)]
        quantity: String,
        name: String,
    },
    Plain(String),
}

impl<'de> Deserialize<'de> for Ingredient {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match IngredientRepr::deserialize(deserializer)? {
            IngredientRepr::Full { quantity, name } => Ingredient { quantity, name },
            IngredientRepr::Plain(name) => Ingredient {
                quantity: String::new(),
                name,
            },
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StepsRepr {
    List(Vec<String>),
    Single(String),
}

fn deserialize_steps<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match StepsRepr::deserialize(deserializer)? {
        StepsRepr::List(steps) => steps,
        StepsRepr::Single(step) if step.trim().is_empty() => Vec::new(),
        StepsRepr::Single(step) => vec![step],
    })
}

/// A recipe has no identity of its own; the store addresses it by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    #[serde(deserialize_with = "deserialize_steps")]
    pub steps: Vec<String>,
}

impl Recipe {
    pub fn new(name: impl Into<String>, ingredients: Vec<Ingredient>, steps: Vec<String>) -> Self {
        Self {
            name: name.into(),
            ingredients,
            steps,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.ingredients.is_empty() && !self.steps.is_empty()
    }

    /// Case-insensitive substring match over name, ingredients and steps.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.ingredients.iter().any(|ingredient| {
                ingredient.name.to_lowercase().contains(needle)
                    || ingredient.quantity.to_lowercase().contains(needle)
            })
            || self
                .steps
                .iter()
                .any(|step| step.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tea() -> Recipe {
        Recipe::new(
            "Tea",
            vec![Ingredient::new("1", "tea bag")],
            vec!["Boil water".to_string(), "Steep 3 min".to_string()],
        )
    }

    #[test]
    fn validity_requires_all_parts() {
        assert!(tea().is_valid());

        let mut blank_name = tea();
        blank_name.name = "   ".to_string();
        assert!(!blank_name.is_valid());

        let mut no_ingredients = tea();
        no_ingredients.ingredients.clear();
        assert!(!no_ingredients.is_valid());

        let mut no_steps = tea();
        no_steps.steps.clear();
        assert!(!no_steps.is_valid());
    }

    #[test]
    fn matches_every_field_case_insensitively() {
        let recipe = tea();
        assert!(recipe.matches("tea"));
        assert!(recipe.matches("bag"));
        assert!(recipe.matches("1"));
        assert!(recipe.matches("steep"));
        assert!(!recipe.matches("coffee"));
    }

    #[test]
    fn reads_flat_ingredient_and_single_step_layout() {
        let json = r#"[{"name":"Toast","ingredients":["bread","butter"],"steps":"Toast the bread"}]"#;
        let recipes: Vec<Recipe> = serde_json::from_str(json).unwrap();

        assert_eq!(recipes[0].ingredients[0], Ingredient::new("", "bread"));
        assert_eq!(recipes[0].ingredients[1].to_string(), "butter");
        assert_eq!(recipes[0].steps, vec!["Toast the bread".to_string()]);
    }

    #[test]
    fn empty_single_step_becomes_no_steps() {
        let json = r#"{"name":"Water","ingredients":["water"],"steps":""}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert!(recipe.steps.is_empty());
        assert!(!recipe.is_valid());
    }

    #[test]
    fn writes_full_layout() {
        let json = serde_json::to_value(tea()).unwrap();
        assert_eq!(json["ingredients"][0]["quantity"], "1");
        assert_eq!(json["ingredients"][0]["name"], "tea bag");
        assert_eq!(json["steps"][1], "Steep 3 min");
    }
}
