use crate::model::Recipe;

/// Append-only, in-memory list of recipes seen during this session.
///
/// Entries are kept in the order they were added; duplicates are allowed.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    recipes: Vec<Recipe>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }

    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(title: &str) -> Recipe {
        Recipe {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut history = HistoryStore::new();
        assert!(history.is_empty());

        history.append(recipe("Lasagne"));
        history.append(recipe("Ramen"));
        history.append(recipe("Tacos"));

        let titles: Vec<_> = history
            .all()
            .iter()
            .map(|r| r.title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, vec!["Lasagne", "Ramen", "Tacos"]);
        assert_eq!(history.get(1), Some(&recipe("Ramen")));
        assert_eq!(history.get(3), None);
    }

    #[test]
    fn test_append_does_not_deduplicate() {
        let mut history = HistoryStore::new();
        history.append(recipe("Lasagne"));
        history.append(recipe("Lasagne"));
        assert_eq!(history.len(), 2);
    }
}
