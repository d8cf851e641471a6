use serde::{Deserialize, Serialize};

/// Number of ingredient/measure slots a TheMealDB record carries.
pub const MAX_INGREDIENTS: usize = 20;

/// One ingredient slot of a recipe. Either part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: Option<String>,
    pub measure: Option<String>,
}

impl Ingredient {
    pub fn new(name: Option<String>, measure: Option<String>) -> Self {
        Self { name, measure }
    }

    /// Human-readable line such as "200g Flour".
    ///
    /// Blank or missing parts are skipped; an empty string means there is
    /// nothing worth showing for this slot.
    pub fn display(&self) -> String {
        [self.measure.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A recipe as decoded from the API. Values are kept exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipe {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub instructions: Option<String>,
    /// At most [`MAX_INGREDIENTS`] entries, in slot order
    pub ingredients: Vec<Ingredient>,
}

/// What the presentation layer should currently display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiState {
    /// No fetch attempted yet
    #[default]
    Initial,
    /// A fetch is in flight
    Loading,
    /// The last fetch or history selection produced this recipe
    Success(Recipe),
    /// The last fetch failed
    Error(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        match self {
            UiState::Success(recipe) => Some(recipe),
            UiState::Initial | UiState::Loading | UiState::Error(_) => None,
        }
    }
}
