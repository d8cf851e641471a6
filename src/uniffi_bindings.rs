//! UniFFI bindings for random-recipe
//!
//! This module provides FFI-compatible types and a view model object for use
//! with iOS and Android. The view model owns its own tokio runtime so that the
//! host UI thread never blocks on a fetch.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    state_machine_from_config, AppError, ClientConfig, FetchError, Ingredient, Recipe,
    RecipeStateMachine, UiState,
};

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible ingredient slot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredient {
    pub name: Option<String>,
    pub measure: Option<String>,
}

/// FFI-compatible recipe structure
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    /// Recipe title
    pub title: Option<String>,
    /// Thumbnail URL
    pub image_url: Option<String>,
    /// Free-text cooking instructions
    pub instructions: Option<String>,
    /// Up to 20 ingredient slots, in API order
    pub ingredients: Vec<FfiIngredient>,
}

impl From<Recipe> for FfiRecipe {
    fn from(recipe: Recipe) -> Self {
        FfiRecipe {
            title: recipe.title,
            image_url: recipe.image_url,
            instructions: recipe.instructions,
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(|i| FfiIngredient {
                    name: i.name,
                    measure: i.measure,
                })
                .collect(),
        }
    }
}

impl From<FfiRecipe> for Recipe {
    fn from(ffi: FfiRecipe) -> Self {
        Recipe {
            title: ffi.title,
            image_url: ffi.image_url,
            instructions: ffi.instructions,
            ingredients: ffi
                .ingredients
                .into_iter()
                .map(|i| Ingredient::new(i.name, i.measure))
                .collect(),
        }
    }
}

/// FFI-compatible UI state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiUiState {
    Initial,
    Loading,
    Success { recipe: FfiRecipe },
    Error { message: String },
}

impl From<UiState> for FfiUiState {
    fn from(state: UiState) -> Self {
        match state {
            UiState::Initial => FfiUiState::Initial,
            UiState::Loading => FfiUiState::Loading,
            UiState::Success(recipe) => FfiUiState::Success {
                recipe: recipe.into(),
            },
            UiState::Error(message) => FfiUiState::Error { message },
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiRecipeError {
    /// Configuration could not be loaded
    ConfigError { message: String },
    /// HTTP client could not be built
    ClientError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiRecipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiRecipeError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiRecipeError::ClientError { message } => write!(f, "Client error: {}", message),
            FfiRecipeError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiRecipeError {}

impl From<FetchError> for FfiRecipeError {
    fn from(err: FetchError) -> Self {
        FfiRecipeError::ClientError {
            message: err.to_string(),
        }
    }
}

impl From<AppError> for FfiRecipeError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::ConfigError(e) => FfiRecipeError::ConfigError {
                message: e.to_string(),
            },
            AppError::ClientError(e) => e.into(),
            AppError::IoError(e) => FfiRecipeError::RuntimeError {
                message: e.to_string(),
            },
        }
    }
}

fn create_runtime() -> Result<tokio::runtime::Runtime, FfiRecipeError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiRecipeError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

/// Recipe screen state holder for mobile shells
#[cfg_attr(feature = "uniffi", derive(uniffi::Object))]
pub struct RecipeViewModel {
    runtime: tokio::runtime::Runtime,
    machine: RecipeStateMachine,
}

impl RecipeViewModel {
    fn with_config(config: &ClientConfig) -> Result<Arc<Self>, FfiRecipeError> {
        let runtime = create_runtime()?;
        let machine = state_machine_from_config(config)?;
        Ok(Arc::new(Self { runtime, machine }))
    }
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
impl RecipeViewModel {
    /// View model talking to the public TheMealDB endpoint
    #[cfg_attr(feature = "uniffi", uniffi::constructor)]
    pub fn new() -> Result<Arc<Self>, FfiRecipeError> {
        Self::with_config(&ClientConfig::default())
    }

    /// View model talking to a custom endpoint
    ///
    /// # Arguments
    /// * `base_url` - API base URL, `random.php` is appended
    /// * `timeout_seconds` - Optional timeout in seconds
    #[cfg_attr(feature = "uniffi", uniffi::constructor)]
    pub fn with_base_url(
        base_url: String,
        timeout_seconds: Option<u64>,
    ) -> Result<Arc<Self>, FfiRecipeError> {
        let defaults = ClientConfig::default();
        let config = ClientConfig {
            base_url,
            timeout: timeout_seconds.unwrap_or(defaults.timeout),
            ..defaults
        };
        Self::with_config(&config)
    }

    /// Start fetching a random recipe without blocking the caller.
    /// `ui_state()` reports `Loading` as soon as this returns.
    pub fn fetch_random_recipe(&self) {
        // Detached: the result is published through the state machine.
        drop(self.runtime.spawn(self.machine.fetch()));
    }

    /// Fetch a random recipe and wait for the outcome.
    pub fn fetch_random_recipe_blocking(&self) -> FfiUiState {
        self.runtime.block_on(self.machine.fetch());
        self.ui_state()
    }

    /// Display a recipe picked from the history list
    pub fn set_recipe(&self, recipe: FfiRecipe) {
        self.machine.select_from_history(recipe.into());
    }

    pub fn ui_state(&self) -> FfiUiState {
        self.machine.current_state().into()
    }

    pub fn previous_recipes(&self) -> Vec<FfiRecipe> {
        self.machine
            .history()
            .into_iter()
            .map(FfiRecipe::from)
            .collect()
    }

    /// Wait up to `timeout_ms` for the state to leave `Loading`.
    pub fn await_settled(&self, timeout_ms: u64) -> FfiUiState {
        let mut states = self.machine.subscribe();
        let wait = async {
            let _ = states.wait_for(|state| !state.is_loading()).await;
        };
        // Elapsed timeout just means we report whatever state is current.
        let _ = self
            .runtime
            .block_on(async { tokio::time::timeout(Duration::from_millis(timeout_ms), wait).await });
        self.ui_state()
    }
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
