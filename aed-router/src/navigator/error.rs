//! Navigator error types.

use std::sync::Arc;

use crate::routes::RoutesError;

/// Shown to the user whenever a provider call fails.
pub const CONNECTIVITY_MESSAGE: &str =
    "Error fetching directions due to limited network, check your connectivity";

/// Failure to pick the nearest facility.
///
/// `Clone` so every caller coalesced onto one lookup receives the error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolutionError {
    #[error("no active facilities to choose from")]
    NoCandidates,

    #[error("route matrix request failed: {0}")]
    Provider(#[source] Arc<RoutesError>),

    #[error("route matrix response was empty")]
    EmptyMatrix,

    #[error("no facility is reachable on foot")]
    NoReachableFacility,

    #[error("destination index {index} out of range for {len} candidates")]
    InvalidIndex { index: usize, len: usize },

    #[error("unparseable duration {0:?}")]
    InvalidDuration(String),
}

/// Failure to fetch directions.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("directions request failed: {0}")]
    Provider(#[source] Arc<RoutesError>),
}

/// Any failure of the navigation pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NavigationError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl NavigationError {
    /// Whether the failure came from talking to the provider.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            NavigationError::Fetch(_)
                | NavigationError::Resolution(
                    ResolutionError::Provider(_)
                        | ResolutionError::EmptyMatrix
                        | ResolutionError::InvalidIndex { .. }
                        | ResolutionError::InvalidDuration(_)
                )
        )
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            e if e.is_network() => CONNECTIVITY_MESSAGE,
            NavigationError::Resolution(ResolutionError::NoCandidates) => {
                "No active AEDs are available"
            }
            _ => "No walking route to an AED could be found",
        }
    }
}
