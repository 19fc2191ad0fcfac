use proptest::prelude::*;
use recipebox::app::App;
use recipebox::models::{
    Ingredient, MemoryStorage, Recipe, RecipeStore, StorageManager, read_recipes,
};
use recipebox::search::matching_indices;
use tempfile::TempDir;

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z]{1,8}( [a-zA-Z0-9]{1,6})?"
}

fn ingredient() -> impl Strategy<Value = Ingredient> {
    ("[0-9]{0,2}( g| cups)?", word()).prop_map(|(quantity, name)| Ingredient::new(quantity, name))
}

fn recipe() -> impl Strategy<Value = Recipe> {
    (
        word(),
        prop::collection::vec(ingredient(), 1..4),
        prop::collection::vec(word(), 1..4),
    )
        .prop_map(|(name, ingredients, steps)| Recipe::new(name, ingredients, steps))
}

fn app_with(recipes: &[Recipe]) -> App {
    let (mut store, _) = RecipeStore::load(Box::new(MemoryStorage::new()));
    for recipe in recipes {
        store.append(recipe.clone());
    }
    App::with_store(store)
}

fn submit(app: &mut App, recipe: &Recipe) {
    app.open_add_form();
    let form = app.active_form_mut().unwrap();
    form.name = recipe.name.clone();
    form.ingredients = recipe.ingredients.clone();
    form.steps = recipe.steps.clone();
    app.submit_add().unwrap();
}

proptest! {
    #[test]
    fn submit_appends_exactly_one(existing in prop::collection::vec(recipe(), 0..5), new in recipe()) {
        let mut app = app_with(&existing);
        submit(&mut app, &new);

        let recipes = app.store.recipes();
        prop_assert_eq!(recipes.len(), existing.len() + 1);
        prop_assert_eq!(&recipes[..existing.len()], existing.as_slice());
        prop_assert_eq!(&recipes[existing.len()], &new);
    }

    #[test]
    fn undo_after_add_restores_prior_store(existing in prop::collection::vec(recipe(), 0..5), new in recipe()) {
        let mut app = app_with(&existing);
        submit(&mut app, &new);

        prop_assert!(app.undo().is_ok());
        prop_assert_eq!(app.store.recipes(), existing.as_slice());
        prop_assert!(app.undo().is_err());
        prop_assert_eq!(app.store.recipes(), existing.as_slice());
    }

    #[test]
    fn search_is_an_exact_ordered_subsequence(recipes in prop::collection::vec(recipe(), 0..8), query in "[a-zA-Z0-9]{1,3}") {
        let found = matching_indices(&recipes, &query);

        prop_assert!(found.windows(2).all(|w| w[0] < w[1]));
        let needle = query.to_lowercase();
        for (index, recipe) in recipes.iter().enumerate() {
            let expected = recipe.name.to_lowercase().contains(&needle)
                || recipe.ingredients.iter().any(|i| {
                    i.name.to_lowercase().contains(&needle) || i.quantity.to_lowercase().contains(&needle)
                })
                || recipe.steps.iter().any(|s| s.to_lowercase().contains(&needle));
            prop_assert_eq!(found.contains(&index), expected);
        }

        let mut app = app_with(&recipes);
        app.set_search_query(query);
        prop_assert_eq!(app.visible_indices(), found);
        app.undo_search();
        prop_assert_eq!(app.visible_indices(), (0..recipes.len()).collect::<Vec<_>>());
    }

    #[test]
    fn edit_replaces_only_its_index(
        recipes in prop::collection::vec(recipe(), 1..6),
        replacement in recipe(),
        pick in any::<prop::sample::Index>(),
    ) {
        let index = pick.index(recipes.len());
        let mut app = app_with(&recipes);

        prop_assert!(app.start_edit(index));
        let form = app.active_form_mut().unwrap();
        form.name = replacement.name.clone();
        form.ingredients = replacement.ingredients.clone();
        form.steps = replacement.steps.clone();
        prop_assert!(app.save_edit().is_ok());

        for (i, recipe) in app.store.recipes().iter().enumerate() {
            if i == index {
                prop_assert_eq!(recipe, &replacement);
            } else {
                prop_assert_eq!(recipe, &recipes[i]);
            }
        }

        prop_assert!(app.undo().is_ok());
        prop_assert_eq!(app.store.recipes(), recipes.as_slice());
    }

    #[test]
    fn persist_and_reload_round_trips(recipes in prop::collection::vec(recipe(), 0..6)) {
        let dir = TempDir::new().unwrap();
        let (mut store, _) = RecipeStore::load(Box::new(StorageManager::new(dir.path()).unwrap()));
        store.extend(recipes.clone());
        prop_assert!(store.take_persist_warning().is_none());

        let reloaded = read_recipes(&StorageManager::new(dir.path()).unwrap()).unwrap();
        prop_assert_eq!(reloaded, recipes);
    }
}
