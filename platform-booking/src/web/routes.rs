//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::{BookingError, BookingTime, PlatformId};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/station", get(get_station))
        .route("/station/lines", post(add_line))
        .route("/station/platforms", post(add_platform))
        .route("/station/platforms/:id", get(get_platform))
        .route("/station/platforms/:id/bookings", post(book_platform))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Identity, lines and every platform's bookings.
async fn get_station(State(state): State<AppState>) -> Json<StationResponse> {
    let station = state.station.snapshot().await;

    Json(StationResponse {
        identity: station.describe_identity(),
        identity_kind: station.identity().kind(),
        lines: station.lines().iter().map(|l| l.name.clone()).collect(),
        platforms: station.platforms().map(PlatformResponse::from).collect(),
    })
}

async fn add_line(
    State(state): State<AppState>,
    payload: Result<Json<AddLineRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(req) = payload?;
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "line name must not be empty".to_string(),
        });
    }
    state.station.add_line(req.name).await;
    Ok(StatusCode::CREATED)
}

async fn add_platform(
    State(state): State<AppState>,
    payload: Result<Json<AddPlatformRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlatformResponse>), AppError> {
    let Json(req) = payload?;
    state
        .station
        .add_platform(req.id)
        .await
        .map_err(|e| AppError::Conflict {
            message: e.to_string(),
        })?;

    let platform = state
        .station
        .platform(req.id)
        .await
        .ok_or_else(|| AppError::Internal {
            message: format!("platform {} vanished after registration", req.id),
        })?;
    Ok((StatusCode::CREATED, Json(PlatformResponse::from(&platform))))
}

async fn get_platform(
    State(state): State<AppState>,
    path: Result<Path<u32>, PathRejection>,
) -> Result<Json<PlatformResponse>, AppError> {
    let Path(id) = path?;
    let id = PlatformId(id);
    let platform = state
        .station
        .platform(id)
        .await
        .ok_or_else(|| AppError::from(BookingError::UnknownPlatform(id)))?;
    Ok(Json(PlatformResponse::from(&platform)))
}

/// Book a stoppage or through train on a platform.
async fn book_platform(
    State(state): State<AppState>,
    path: Result<Path<u32>, PathRejection>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    let platform = PlatformId(id);
    let time = BookingTime::parse(&req.time, state.service_date()).map_err(|e| {
        AppError::BadRequest {
            message: e.to_string(),
        }
    })?;

    state.station.book(platform, req.class, time).await?;
    info!(%platform, class = %req.class, time = %time.to_iso(), "booking accepted");

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            platform,
            class: req.class,
            time: time.to_iso(),
        }),
    ))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Separation(ConflictResponse),
    Internal { message: String },
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        match ConflictResponse::from_error(&e) {
            Some(conflict) => AppError::Separation(conflict),
            None => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Separation(conflict) => {
                warn!(status = %StatusCode::CONFLICT, error = %conflict.error, "request rejected");
                return (StatusCode::CONFLICT, Json(conflict)).into_response();
            }
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, error = %body, "request rejected");
        (status, Json(ErrorResponse { error: body })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationIdentity;
    use crate::registry::StationHandle;
    use chrono::NaiveDate;
    use serde_json::{Value, json};

    /// Serve the router on an ephemeral port and return its base URL.
    async fn spawn_app() -> String {
        let station = StationHandle::new(StationIdentity::Name("Central".into()));
        station.add_line("Blue Line").await;
        station.add_line("Yellow Line").await;
        station.add_platform(PlatformId(1)).await.unwrap();
        station.add_platform(PlatformId(2)).await.unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let app = create_router(AppState::new(station, Some(date)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn book(
        client: &reqwest::Client,
        base: &str,
        platform: u32,
        class: &str,
        time: &str,
    ) -> reqwest::Response {
        client
            .post(format!("{base}/station/platforms/{platform}/bookings"))
            .json(&json!({ "class": class, "time": time }))
            .send()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn health_check() {
        let base = spawn_app().await;
        let body = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn station_overview() {
        let base = spawn_app().await;
        let body: Value = reqwest::get(format!("{base}/station"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["identity"], "Station ID (String): Central");
        assert_eq!(body["identity_kind"], "string");
        assert_eq!(body["lines"], json!(["Blue Line", "Yellow Line"]));
        assert_eq!(body["platforms"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn stoppage_scenario_over_http() {
        let base = spawn_app().await;
        let client = reqwest::Client::new();

        let resp = book(&client, &base, 1, "stoppage", "08:00").await;
        assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["time"], "2024-03-15T08:00:00");

        let resp = book(&client, &base, 1, "stoppage", "08:20").await;
        assert_eq!(resp.status(), reqwest::StatusCode::CONFLICT);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["platform"], 1);
        assert_eq!(body["class"], "stoppage");
        assert_eq!(body["threshold_mins"], 30);
        assert_eq!(body["conflicts_with"], "2024-03-15T08:00:00");

        let resp = book(&client, &base, 1, "stoppage", "08:30").await;
        assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

        let body: Value = reqwest::get(format!("{base}/station/platforms/1"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(
            body["stoppages"],
            json!(["2024-03-15T08:00:00", "2024-03-15T08:30:00"])
        );
        assert_eq!(body["through"], json!([]));
    }

    #[tokio::test]
    async fn through_and_stoppage_do_not_interact() {
        let base = spawn_app().await;
        let client = reqwest::Client::new();

        assert!(book(&client, &base, 2, "stoppage", "10:00").await.status().is_success());
        assert!(book(&client, &base, 2, "through", "10:00").await.status().is_success());
        assert_eq!(
            book(&client, &base, 2, "through", "10:09:59").await.status(),
            reqwest::StatusCode::CONFLICT
        );
        assert!(book(&client, &base, 2, "through", "2024-03-15T10:10:00").await.status().is_success());
    }

    #[tokio::test]
    async fn unknown_platform_is_not_found() {
        let base = spawn_app().await;
        let client = reqwest::Client::new();

        let resp = book(&client, &base, 99, "stoppage", "08:00").await;
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "platform 99 not found");

        let resp = reqwest::get(format!("{base}/station/platforms/99")).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_time_is_bad_request() {
        let base = spawn_app().await;
        let client = reqwest::Client::new();

        let resp = book(&client, &base, 1, "stoppage", "25:00").await;
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "invalid time: hour must be 0-23");
    }

    #[tokio::test]
    async fn malformed_body_is_json_bad_request() {
        let base = spawn_app().await;
        let client = reqwest::Client::new();

        let resp = book(&client, &base, 1, "express", "08:00").await;
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("unknown variant"));

        let resp = client
            .post(format!("{base}/station/platforms/1/bookings"))
            .json(&json!({ "class": "stoppage" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].is_string());

        let resp = client
            .post(format!("{base}/station/platforms"))
            .body("not json")
            .header("content-type", "application/json")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

        // Nothing was booked by the rejected requests
        let body: Value = reqwest::get(format!("{base}/station/platforms/1"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["stoppages"], json!([]));
    }

    #[tokio::test]
    async fn non_numeric_platform_is_json_bad_request() {
        let base = spawn_app().await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{base}/station/platforms/one/bookings"))
            .json(&json!({ "class": "stoppage", "time": "08:00" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].is_string());

        let resp = reqwest::get(format!("{base}/station/platforms/one")).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_platform_and_line() {
        let base = spawn_app().await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{base}/station/platforms"))
            .json(&json!({ "id": 3 }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

        let resp = client
            .post(format!("{base}/station/platforms"))
            .json(&json!({ "id": 3 }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::CONFLICT);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "platform 3 already exists");

        let resp = client
            .post(format!("{base}/station/lines"))
            .json(&json!({ "name": "Blue Line" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

        let resp = client
            .post(format!("{base}/station/lines"))
            .json(&json!({ "name": "  " }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: Value = reqwest::get(format!("{base}/station"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(
            body["lines"],
            json!(["Blue Line", "Yellow Line", "Blue Line"])
        );
        assert_eq!(body["platforms"][2]["id"], 3);
    }
}
