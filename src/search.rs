use crate::models::Recipe;

/// Indices into the store of every recipe matching `query`, in store order.
/// A blank query matches nothing; callers treat it as "filter off".
pub fn matching_indices(recipes: &[Recipe], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    recipes
        .iter()
        .enumerate()
        .filter(|(_, recipe)| recipe.matches(&needle))
        .map(|(index, _)| index)
        .collect()
}

/// Human-readable result count for a non-blank query.
pub fn feedback_message(count: usize, query: &str) -> String {
    let query = query.trim();
    match count {
        0 => format!("No recipes found for \"{}\"", query),
        1 => format!("Found 1 recipe matching \"{}\"", query),
        n => format!("Found {} recipes matching \"{}\"", n, query),
    }
}

/// Derived search view. Never authoritative: [`SearchFilter::refresh`]
/// rebuilds it from scratch whenever the query or the store changes.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub query: String,
    pub matches: Vec<usize>,
    pub message: Option<String>,
}

impl SearchFilter {
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn set_query(&mut self, query: impl Into<String>, recipes: &[Recipe]) {
        self.query = query.into();
        self.refresh(recipes);
    }

    pub fn refresh(&mut self, recipes: &[Recipe]) {
        if !self.is_active() {
            self.matches.clear();
            self.message = None;
            return;
        }

        self.matches = matching_indices(recipes, &self.query);
        self.message = Some(feedback_message(self.matches.len(), &self.query));
    }

    /// Drops the query and shows the full list again.
    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.message = None;
    }

    /// Store indices to show: the matches when active, otherwise everything.
    pub fn visible(&self, len: usize) -> Vec<usize> {
        if self.is_active() {
            self.matches.clone()
        } else {
            (0..len).collect()
        }
    }
}
