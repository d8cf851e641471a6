pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod repository;
pub mod state_machine;
pub mod uniffi_bindings;

use std::sync::Arc;

pub use crate::client::{HttpRecipeClient, RawMeal, RawResponse, RecipeClient};
pub use crate::config::{load_config, ClientConfig};
pub use crate::error::{AppError, FetchError};
pub use crate::history::HistoryStore;
pub use crate::model::{Ingredient, Recipe, UiState, MAX_INGREDIENTS};
pub use crate::repository::RecipeRepository;
pub use crate::state_machine::{RecipeStateMachine, NO_RECIPE_FOUND};

/// Build a state machine backed by TheMealDB using the given client settings.
pub fn state_machine_from_config(config: &ClientConfig) -> Result<RecipeStateMachine, FetchError> {
    let client = HttpRecipeClient::from_config(config)?;
    Ok(RecipeStateMachine::new(Arc::new(client)))
}

/// Build a state machine from `recipe.toml` and `RANDOM_RECIPE__*` variables.
pub fn state_machine_from_env() -> Result<RecipeStateMachine, AppError> {
    let config = load_config()?;
    Ok(state_machine_from_config(&config)?)
}
