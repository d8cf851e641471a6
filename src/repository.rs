use crate::client::{RawMeal, RawResponse};
use crate::model::{Ingredient, Recipe, MAX_INGREDIENTS};

/// Turns raw API responses into [`Recipe`] values
pub struct RecipeRepository;

impl RecipeRepository {
    /// Decode the first meal of `raw`, or `None` when the response has no meals.
    ///
    /// Never fails: a field that is missing, null or of the wrong JSON type
    /// simply decodes to `None`.
    pub fn decode(raw: RawResponse) -> Option<Recipe> {
        raw.meals?.into_iter().next().map(|meal| Self::to_recipe(&meal))
    }

    fn to_recipe(meal: &RawMeal) -> Recipe {
        let mut ingredients: Vec<Ingredient> = (1..=MAX_INGREDIENTS)
            .map(|slot| {
                Ingredient::new(
                    meal.text(&format!("strIngredient{}", slot)),
                    meal.text(&format!("strMeasure{}", slot)),
                )
            })
            .collect();

        // Slot positions are kept; only the unused tail is dropped.
        while ingredients
            .last()
            .is_some_and(|i| i.name.is_none() && i.measure.is_none())
        {
            ingredients.pop();
        }

        Recipe {
            title: meal.text("strMeal"),
            image_url: meal.text("strMealThumb"),
            instructions: meal.text("strInstructions"),
            ingredients,
        }
    }
}
