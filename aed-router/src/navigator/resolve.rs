//! Nearest-facility resolution.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use crate::cache::FacilityKey;
use crate::domain::{Coordinate, Facility};
use crate::routes::{RouteMatrixElement, RoutingProvider};

use super::Navigator;
use super::duration::{format_minutes, parse_duration_secs};
use super::error::ResolutionError;

/// The facility with the shortest walk from the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestFacility {
    pub facility: Facility,

    /// Provider duration text, e.g. `"725s"`.
    pub duration_text: String,

    pub travel_time: Duration,
}

impl NearestFacility {
    pub fn coordinate(&self) -> Coordinate {
        self.facility.coordinate()
    }

    /// Walking time in whole minutes, for display.
    pub fn minutes(&self) -> String {
        format_minutes(Some(&self.duration_text))
    }
}

impl<P: RoutingProvider> Navigator<P> {
    /// Find the active candidate with the shortest walk from `origin`.
    ///
    /// Results are cached per origin and candidate set. Concurrent calls
    /// for the same inputs share one provider request.
    pub async fn resolve_closest(
        &self,
        origin: Coordinate,
        candidates: &[Facility],
    ) -> Result<NearestFacility, ResolutionError> {
        let eligible: Vec<Facility> = candidates.iter().filter(|f| f.active).cloned().collect();
        if eligible.is_empty() {
            return Err(ResolutionError::NoCandidates);
        }

        let key = FacilityKey::new(origin, &eligible);
        if let Some(hit) = self.cache.get_facility(&key).await {
            debug!(%key, "nearest facility cache hit");
            return Ok(hit);
        }
        debug!(%key, candidates = eligible.len(), "nearest facility cache miss");

        let provider = &self.provider;
        let nearest = self
            .cache
            .facility_or_try_insert(key, async {
                let destinations: Vec<Coordinate> =
                    eligible.iter().map(Facility::coordinate).collect();
                let elements = provider
                    .travel_durations(origin, &destinations)
                    .await
                    .map_err(|e| ResolutionError::Provider(Arc::new(e)))?;
                select_closest(&eligible, elements)
            })
            .await
            .map_err(Arc::unwrap_or_clone)?;

        info!(
            facility = %nearest.facility.name,
            duration = %nearest.duration_text,
            "resolved nearest facility"
        );
        Ok(nearest)
    }
}

/// Pick the candidate with the smallest duration.
///
/// Elements are scanned in destination order; the first minimum wins.
/// Elements without a duration are unreachable and skipped.
pub fn select_closest(
    candidates: &[Facility],
    mut elements: Vec<RouteMatrixElement>,
) -> Result<NearestFacility, ResolutionError> {
    if elements.is_empty() {
        return Err(ResolutionError::EmptyMatrix);
    }
    elements.sort_by_key(|e| e.destination_index);

    let mut best: Option<(usize, u64, String)> = None;

    for element in elements {
        let index = element.destination_index;
        if index >= candidates.len() {
            return Err(ResolutionError::InvalidIndex {
                index,
                len: candidates.len(),
            });
        }

        let Some(text) = element.duration else {
            debug!(facility = %candidates[index].name, "facility unreachable");
            continue;
        };
        let secs =
            parse_duration_secs(&text).ok_or_else(|| ResolutionError::InvalidDuration(text.clone()))?;

        match &best {
            Some((_, best_secs, _)) if secs >= *best_secs => {}
            _ => best = Some((index, secs, text)),
        }
    }

    let (index, secs, duration_text) = best.ok_or(ResolutionError::NoReachableFacility)?;
    let travel_time = i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| ResolutionError::InvalidDuration(duration_text.clone()))?;

    Ok(NearestFacility {
        facility: candidates[index].clone(),
        duration_text,
        travel_time,
    })
}
