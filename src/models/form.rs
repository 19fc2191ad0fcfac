use crate::error::ValidationError;
use crate::models::{Ingredient, Recipe};

/// Transient state of the add and edit forms.
///
/// Ingredients and steps are staged one at a time from the pending fields
/// before the recipe as a whole is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeForm {
    pub name: String,
    pub quantity: String,
    pub ingredient: String,
    pub step: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
}

impl RecipeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a form pre-filled with an existing recipe.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
            steps: recipe.steps.clone(),
            ..Self::default()
        }
    }

    /// Stages the pending quantity/ingredient pair. Returns false when the
    /// pending ingredient name is blank.
    pub fn add_ingredient(&mut self) -> bool {
        let name = self.ingredient.trim();
        if name.is_empty() {
            return false;
        }
        self.ingredients.push(Ingredient::new(self.quantity.trim(), name));
        self.quantity.clear();
        self.ingredient.clear();
        true
    }

    pub fn add_step(&mut self) -> bool {
        let step = self.step.trim();
        if step.is_empty() {
            return false;
        }
        self.steps.push(step.to_string());
        self.step.clear();
        true
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Option<Ingredient> {
        (index < self.ingredients.len()).then(|| self.ingredients.remove(index))
    }

    pub fn remove_step(&mut self, index: usize) -> Option<String> {
        (index < self.steps.len()).then(|| self.steps.remove(index))
    }

    /// Builds the recipe this form describes. Pending, unstaged entries are
    /// not part of it.
    pub fn validate(&self) -> Result<Recipe, ValidationError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("a name");
        }
        if self.ingredients.is_empty() {
            missing.push("at least one ingredient");
        }
        if self.steps.is_empty() {
            missing.push("at least one step");
        }
        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        Ok(Recipe::new(
            self.name.clone(),
            self.ingredients.clone(),
            self.steps.clone(),
        ))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_trims_and_clears_pending_fields() {
        let mut form = RecipeForm::new();
        form.quantity = " 2 cups ".to_string();
        form.ingredient = " flour ".to_string();
        assert!(form.add_ingredient());

        assert_eq!(form.ingredients, vec![Ingredient::new("2 cups", "flour")]);
        assert!(form.quantity.is_empty());
        assert!(form.ingredient.is_empty());
    }

    #[test]
    fn blank_entries_are_not_staged() {
        let mut form = RecipeForm::new();
        form.quantity = "3".to_string();
        form.ingredient = "  ".to_string();
        form.step = "\t".to_string();

        assert!(!form.add_ingredient());
        assert!(!form.add_step());
        assert!(form.ingredients.is_empty());
        assert!(form.steps.is_empty());
        assert_eq!(form.quantity, "3");
    }

    #[test]
    fn duplicates_are_allowed() {
        let mut form = RecipeForm::new();
        for _ in 0..2 {
            form.ingredient = "salt".to_string();
            form.add_ingredient();
        }
        assert_eq!(form.ingredients.len(), 2);
    }

    #[test]
    fn remove_by_index() {
        let mut form = RecipeForm::new();
        for step in ["one", "two", "three"] {
            form.step = step.to_string();
            form.add_step();
        }

        assert_eq!(form.remove_step(1).as_deref(), Some("two"));
        assert_eq!(form.remove_step(5), None);
        assert_eq!(form.steps, vec!["one".to_string(), "three".to_string()]);
        assert_eq!(form.remove_ingredient(0), None);
    }

    #[test]
    fn validation_names_every_missing_part() {
        let error = RecipeForm::new().validate().unwrap_err();
        assert_eq!(
            error.to_string(),
            "Recipe needs a name, at least one ingredient, at least one step"
        );

        let mut form = RecipeForm::new();
        form.name = "Soup".to_string();
        form.step = "Simmer".to_string();
        form.add_step();
        let error = form.validate().unwrap_err();
        assert_eq!(error.missing, vec!["at least one ingredient"]);
    }

    #[test]
    fn round_trips_an_existing_recipe() {
        let recipe = Recipe::new(
            "Tea",
            vec![Ingredient::new("1", "tea bag")],
            vec!["Steep".to_string()],
        );
        let form = RecipeForm::from_recipe(&recipe);
        assert_eq!(form.validate().unwrap(), recipe);
    }
}
