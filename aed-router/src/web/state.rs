//! Application state for the web layer.

use std::sync::Arc;

use crate::domain::Facility;
use crate::navigator::Navigator;
use crate::routes::RoutesClient;

/// Shared application state.
pub struct AppState<P = RoutesClient> {
    /// Navigation pipeline over the routing provider
    pub navigator: Arc<Navigator<P>>,

    /// Active facilities from the loaded snapshot
    pub facilities: Arc<Vec<Facility>>,
}

// Derived Clone would require P: Clone.
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            navigator: Arc::clone(&self.navigator),
            facilities: Arc::clone(&self.facilities),
        }
    }
}

impl<P> AppState<P> {
    /// Create a new app state.
    pub fn new(navigator: Navigator<P>, facilities: Vec<Facility>) -> Self {
        Self {
            navigator: Arc::new(navigator),
            facilities: Arc::new(facilities),
        }
    }
}
