//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::navigator::{
    DEFAULT_BANNER_RADIUS, NavigationError, ResolutionError, banner_instruction,
};
use crate::routes::RoutingProvider;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<P>(state: AppState<P>) -> Router
where
    P: RoutingProvider + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/navigate", post(navigate::<P>))
        .route("/api/banner", post(banner))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve, fetch and assemble a walking route.
async fn navigate<P: RoutingProvider>(
    State(state): State<AppState<P>>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<NavigateResponse>, AppError> {
    let origin = req.origin;
    let destination = req.destination.into_destination(&state.facilities);

    let navigation = state.navigator.navigate(origin, destination).await?;

    info!(
        %origin,
        endpoint = %navigation.scenario.endpoint(),
        waypoints = navigation.waypoints.len(),
        "navigation complete"
    );

    Ok(Json(NavigateResponse::from_navigation(navigation)))
}

/// Instruction for the waypoint nearest the user's position.
async fn banner(Json(req): Json<BannerRequest>) -> Result<Json<BannerResponse>, AppError> {
    let radius = req.radius.unwrap_or(DEFAULT_BANNER_RADIUS);
    if !radius.is_finite() || radius < 0.0 {
        return Err(AppError::BadRequest {
            message: format!("Invalid radius: {radius}"),
        });
    }

    let instruction = banner_instruction(req.position, &req.waypoints, radius).map(str::to_owned);
    Ok(Json(BannerResponse { instruction }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
}

impl From<NavigationError> for AppError {
    fn from(e: NavigationError) -> Self {
        warn!(error = %e, "navigation failed");

        let message = e.user_message().to_string();
        if e.is_network() {
            return AppError::BadGateway { message };
        }
        match e {
            NavigationError::Resolution(ResolutionError::NoCandidates) => {
                AppError::BadRequest { message }
            }
            _ => AppError::NotFound { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        info!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::RouteCache;
    use crate::domain::{Coordinate, Facility, RawRoute, RouteLeg, RouteStep, Waypoint};
    use crate::navigator::{CONNECTIVITY_MESSAGE, Navigator};
    use crate::routes::MockRoutingProvider;

    fn state(mock: &MockRoutingProvider, facilities: Vec<Facility>) -> AppState<MockRoutingProvider> {
        AppState::new(
            Navigator::new(mock.clone(), Arc::new(RouteCache::default())),
            facilities,
        )
    }

    fn route() -> RawRoute {
        RawRoute::new(vec![RouteLeg::new(vec![RouteStep::new(
            "Walk north",
            "_ibE_ibE_ibE_ibE",
        )])])
    }

    fn navigate_request(json: &str) -> Json<NavigateRequest> {
        Json(serde_json::from_str(json).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn navigate_uses_snapshot_facilities() {
        let mock = MockRoutingProvider::new()
            .with_durations(&["725s"])
            .with_default_route(route());
        let state = state(&mock, vec![Facility::new("Library", 3.0, 3.0)]);

        let Json(response) = navigate(
            State(state),
            navigate_request(
                r#"{
                    "origin": {"latitude": 0.0, "longitude": 0.0},
                    "destination": {"kind": "nearest_facility"}
                }"#,
            ),
        )
        .await
        .unwrap();

        assert_eq!(response.facility.unwrap().name, "Library");
        assert_eq!(response.minutes, "12");
        assert!(response.drawable);
        assert_eq!(response.waypoints.len(), 4);
        assert_eq!(response.path.last(), Some(&Coordinate::new(3.0, 3.0)));
    }

    #[tokio::test]
    async fn navigate_without_candidates_is_bad_request() {
        let mock = MockRoutingProvider::new();
        let state = state(&mock, vec![]);

        let err = navigate(
            State(state),
            navigate_request(
                r#"{
                    "origin": {"latitude": 0.0, "longitude": 0.0},
                    "destination": {"kind": "nearest_facility"}
                }"#,
            ),
        )
        .await
        .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.matrix_calls(), 0);
    }

    #[tokio::test]
    async fn provider_failure_is_bad_gateway() {
        let mock = MockRoutingProvider::new().failing(503);
        let state = state(&mock, vec![]);

        let err = navigate(
            State(state),
            navigate_request(
                r#"{
                    "origin": {"latitude": 0.0, "longitude": 0.0},
                    "destination": {
                        "kind": "incident",
                        "incident": {"latitude": 1.0, "longitude": 1.0}
                    }
                }"#,
            ),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            &err,
            AppError::BadGateway { message } if message == CONNECTIVITY_MESSAGE
        ));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn unreachable_facility_is_not_found() {
        let mock = MockRoutingProvider::new().with_matrix(vec![
            crate::routes::RouteMatrixElement::unreachable(0),
        ]);
        let state = state(&mock, vec![Facility::new("Gym", 1.0, 1.0)]);

        let err = navigate(
            State(state),
            navigate_request(
                r#"{
                    "origin": {"latitude": 0.0, "longitude": 0.0},
                    "destination": {"kind": "nearest_facility"}
                }"#,
            ),
        )
        .await
        .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn banner_returns_nearest_instruction() {
        let req = BannerRequest {
            position: Coordinate::new(1.0, 1.0),
            waypoints: vec![
                Waypoint::new("Walk north", Coordinate::new(1.0, 1.0)),
                Waypoint::new("Turn right", Coordinate::new(1.5, 1.5)),
            ],
            radius: None,
        };

        let Json(response) = banner(Json(req)).await.unwrap();
        assert_eq!(response.instruction.as_deref(), Some("Walk north"));
    }

    #[tokio::test]
    async fn banner_rejects_negative_radius() {
        let req = BannerRequest {
            position: Coordinate::new(1.0, 1.0),
            waypoints: vec![],
            radius: Some(-1.0),
        };

        let err = banner(Json(req)).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
