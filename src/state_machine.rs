use crate::client::{RawResponse, RecipeClient};
use crate::error::FetchError;
use crate::history::HistoryStore;
use crate::model::{Recipe, UiState};
use crate::repository::RecipeRepository;
use log::{debug, info, warn};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Message shown when the API answers with no meals at all.
pub const NO_RECIPE_FOUND: &str = "No recipe found";

/// Everything a single transition may touch. Guarded by one lock so that a
/// history append and the state change that follows it land together.
#[derive(Debug, Default)]
struct Session {
    state: UiState,
    history: HistoryStore,
    /// Token of the most recently issued fetch
    generation: u64,
}

struct Shared {
    session: Mutex<Session>,
    notifier: watch::Sender<UiState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set `state` and publish it while the lock is still held, so observers
    /// see transitions in the order they happened.
    fn transition(&self, session: &mut Session, state: UiState) {
        session.state = state.clone();
        self.notifier.send_replace(state);
    }

    fn begin_fetch(&self) -> u64 {
        let mut session = self.lock();
        session.generation += 1;
        let token = session.generation;
        self.transition(&mut session, UiState::Loading);
        token
    }

    fn complete_fetch(&self, token: u64, outcome: Result<RawResponse, FetchError>) {
        let decoded = outcome.map(RecipeRepository::decode);

        let mut session = self.lock();
        if session.generation != token {
            debug!(
                "Discarding result of fetch #{} superseded by #{}",
                token, session.generation
            );
            return;
        }

        let next = match decoded {
            Ok(Some(recipe)) => {
                info!(
                    "Fetched recipe: {}",
                    recipe.title.as_deref().unwrap_or("<untitled>")
                );
                session.history.append(recipe.clone());
                UiState::Success(recipe)
            }
            Ok(None) => {
                warn!("Recipe API returned no meals");
                UiState::Error(NO_RECIPE_FOUND.to_string())
            }
            Err(err) => {
                warn!("Failed to fetch recipe: {}", err);
                UiState::Error(err.ui_message())
            }
        };
        self.transition(&mut session, next);
    }
}

/// Drives recipe fetches and owns the UI state plus the session history.
///
/// Cloning is cheap and every clone shares the same session.
#[derive(Clone)]
pub struct RecipeStateMachine {
    client: Arc<dyn RecipeClient>,
    shared: Arc<Shared>,
}

impl RecipeStateMachine {
    pub fn new(client: Arc<dyn RecipeClient>) -> Self {
        let (notifier, _) = watch::channel(UiState::Initial);
        Self {
            client,
            shared: Arc::new(Shared {
                session: Mutex::new(Session::default()),
                notifier,
            }),
        }
    }

    /// Start fetching a random recipe.
    ///
    /// The state becomes [`UiState::Loading`] before this returns. The
    /// returned future performs the request and applies its outcome, unless
    /// another fetch (or a history selection) was issued in the meantime, in
    /// which case the outcome is dropped.
    ///
    /// The returned future must be awaited or spawned. Dropping it unpolled
    /// leaves the state at `Loading` until the next `fetch()` or history
    /// selection; use [`spawn_fetch`](Self::spawn_fetch) to fire and forget.
    #[must_use = "the request only runs when the returned future is awaited or spawned"]
    pub fn fetch(&self) -> impl Future<Output = ()> + Send + 'static {
        let token = self.shared.begin_fetch();
        debug!("Issued fetch #{}", token);

        let client = Arc::clone(&self.client);
        let shared = Arc::clone(&self.shared);
        async move {
            let outcome = client.fetch_random().await;
            shared.complete_fetch(token, outcome);
        }
    }

    /// Run [`fetch`](Self::fetch) as a task on the current tokio runtime.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_fetch(&self) -> JoinHandle<()> {
        tokio::spawn(self.fetch())
    }

    /// Show a recipe that is already in the history. No network access.
    pub fn select_from_history(&self, recipe: Recipe) {
        let mut session = self.shared.lock();
        // A fetch still in flight must not replace the user's choice.
        session.generation += 1;
        self.shared.transition(&mut session, UiState::Success(recipe));
    }

    pub fn current_state(&self) -> UiState {
        self.shared.lock().state.clone()
    }

    /// Recipes fetched so far, oldest first.
    pub fn history(&self) -> Vec<Recipe> {
        self.shared.lock().history.all().to_vec()
    }

    /// Receiver that is notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.shared.notifier.subscribe()
    }
}
