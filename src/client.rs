use crate::config::ClientConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// Body of a `random.php` response.
///
/// `meals` is `null` (or missing) when the API has nothing to return.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawResponse {
    #[serde(default)]
    pub meals: Option<Vec<RawMeal>>,
}

impl RawResponse {
    pub fn new(meals: Vec<RawMeal>) -> Self {
        Self { meals: Some(meals) }
    }

    pub fn empty() -> Self {
        Self { meals: None }
    }
}

/// A single undecoded meal record, kept as the JSON object it arrived as.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawMeal(Map<String, Value>);

impl RawMeal {
    /// String value of `key`; `None` when missing, null or not a string.
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(Value::as_str).map(str::to_owned)
    }
}

impl From<Map<String, Value>> for RawMeal {
    fn from(fields: Map<String, Value>) -> Self {
        RawMeal(fields)
    }
}

/// Source of random recipes
#[async_trait]
pub trait RecipeClient: Send + Sync {
    /// Perform a single request for a random recipe. No retries.
    async fn fetch_random(&self) -> Result<RawResponse, FetchError>;
}

/// [`RecipeClient`] talking to TheMealDB over HTTP
#[derive(Debug, Clone)]
pub struct HttpRecipeClient {
    client: Client,
    base_url: String,
}

impl HttpRecipeClient {
    /// Client for `base_url` with the default user agent.
    ///
    /// `timeout` is used as given; `None` means the default of 30 seconds.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let defaults = ClientConfig::default();
        Self::build(
            base_url.into(),
            timeout.unwrap_or_else(|| defaults.timeout_duration()),
            &defaults.user_agent,
        )
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, FetchError> {
        Self::build(
            config.base_url.clone(),
            config.timeout_duration(),
            &config.user_agent,
        )
    }

    fn build(base_url: String, timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        // A zero deadline has already passed, so every request would time out.
        if timeout.is_zero() {
            return Err(FetchError::Unclassified(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/random.php", self.base_url)
    }
}

#[async_trait]
impl RecipeClient for HttpRecipeClient {
    async fn fetch_random(&self) -> Result<RawResponse, FetchError> {
        let url = self.endpoint();
        debug!("Requesting random recipe from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Protocol {
                status: status.as_u16(),
                message: status.to_string(),
            });
        }

        let body = response.text().await?;
        debug!("API response: {}", body);

        let raw: RawResponse = serde_json::from_str(&body)?;
        Ok(raw)
    }
}
