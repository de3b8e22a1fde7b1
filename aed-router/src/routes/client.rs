//! Routing provider HTTP client.
//!
//! Provides async methods for the provider's route matrix and directions
//! endpoints. Handles authentication, field masks, bounded concurrency and
//! status-code classification.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::domain::{Coordinate, RawRoute};

use super::error::RoutesError;
use super::provider::RoutingProvider;
use super::types::{
    ComputeRoutesRequest, ComputeRoutesResponse, DIRECTIONS_FIELD_MASK, ErrorEnvelope,
    MATRIX_FIELD_MASK, RouteMatrixElement, RouteMatrixRequest, TRAVEL_MODE_WALK,
};

/// Default base URL for the routing provider.
const DEFAULT_BASE_URL: &str = "https://routes.googleapis.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

const API_KEY_HEADER: &str = "x-goog-api-key";
const FIELD_MASK_HEADER: &str = "x-goog-fieldmask";

/// Longest body excerpt kept in an error.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct RoutesConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to the production endpoint)
    pub base_url: String,
    /// Language for step instructions
    pub language_code: String,
    /// Unit system for instruction text
    pub units: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RoutesConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language_code: "en-US".to_string(),
            units: "IMPERIAL".to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the instruction language.
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language_code = code.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Routing provider API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct RoutesClient {
    http: reqwest::Client,
    base_url: String,
    language_code: String,
    units: String,
    semaphore: Arc<Semaphore>,
}

impl RoutesClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RoutesConfig) -> Result<Self, RoutesError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| RoutesError::Client("invalid API key format".to_string()))?;
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            language_code: config.language_code,
            units: config.units,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Walking durations from `origin` to each destination, in one request.
    pub async fn compute_route_matrix(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Vec<RouteMatrixElement>, RoutesError> {
        let request = RouteMatrixRequest {
            origins: vec![origin.into()],
            destinations: destinations.iter().map(|d| (*d).into()).collect(),
            travel_mode: TRAVEL_MODE_WALK,
            language_code: self.language_code.clone(),
            units: self.units.clone(),
        };

        self.post(
            "distanceMatrix/v2:computeRouteMatrix",
            MATRIX_FIELD_MASK,
            &request,
        )
        .await
    }

    /// Walking directions from `origin` to `destination`.
    pub async fn compute_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RawRoute, RoutesError> {
        let request = ComputeRoutesRequest {
            origin: origin.into(),
            destination: destination.into(),
            travel_mode: TRAVEL_MODE_WALK,
            language_code: self.language_code.clone(),
            units: self.units.clone(),
        };

        let response: ComputeRoutesResponse = self
            .post(
                "directions/v2:computeRoutes",
                DIRECTIONS_FIELD_MASK,
                &request,
            )
            .await?;

        Ok(response.into_raw_route())
    }

    async fn post<B, T>(&self, path: &str, field_mask: &str, body: &B) -> Result<T, RoutesError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RoutesError::Client("request limiter closed".to_string()))?;

        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "routing provider request");

        let response = self
            .http
            .post(&url)
            .header(FIELD_MASK_HEADER, field_mask)
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RoutesError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutesError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = api_error(status.as_u16(), &body);
            warn!(%url, error = %err, "routing provider request failed");
            return Err(err);
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RoutesError::Json {
            message: e.to_string(),
            body: Some(excerpt(&body)),
        })
    }
}

/// Classify a non-success body. The provider normally sends an
/// [`ErrorEnvelope`]; anything else (a proxy's HTML page, an empty body) is
/// kept as an excerpt.
fn api_error(status: u16, body: &str) -> RoutesError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => RoutesError::Api {
            status,
            reason: error.status,
            message: if error.message.is_empty() {
                excerpt(body)
            } else {
                error.message
            },
        },
        Err(_) => RoutesError::Api {
            status,
            reason: None,
            message: excerpt(body),
        },
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

impl RoutingProvider for RoutesClient {
    async fn travel_durations(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Vec<RouteMatrixElement>, RoutesError> {
        self.compute_route_matrix(origin, destinations).await
    }

    async fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RawRoute, RoutesError> {
        self.compute_routes(origin, destination).await
    }
}
