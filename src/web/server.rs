use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Path, Query, State,
    },
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, patch, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::{GlobalOptions, ServeArgs};
use crate::core::types::{
    BloodGroup, DonorId, OrganType, ParseError, RecipientId, RecipientStatus, Urgency,
};
use crate::store::registry::{NewRecipient, Registry};
use crate::store::StoreError;

/// Request bodies are small JSON forms
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Shared application state.
///
/// Every action locks the registry for its whole duration, so actions are
/// applied one at a time in arrival order.
pub struct AppState {
    pub registry: Mutex<Registry>,

    /// Fixed evaluation instant; `None` means wall-clock time
    pub clock: Option<DateTime<Utc>>,
}

impl AppState {
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Mutex::new(registry),
            clock: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.unwrap_or_else(Utc::now)
    }
}

/// Error body returned by every failing endpoint
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

/// Failure of an API request
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    BadRequest(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid request".to_string(),
                    error_type: "bad_request".to_string(),
                    details: Some(message),
                },
            ),
            Self::Store(err) => store_error_response(&err),
        };
        (status, Json(body)).into_response()
    }
}

fn store_error_response(err: &StoreError) -> (StatusCode, ErrorResponse) {
    let client_error = |status: StatusCode, error_type: &str| {
        (
            status,
            ErrorResponse {
                error: err.to_string(),
                error_type: error_type.to_string(),
                details: None,
            },
        )
    };

    match err {
        StoreError::DonorNotFound(_) | StoreError::RecipientNotFound(_) => {
            client_error(StatusCode::NOT_FOUND, "not_found")
        }
        StoreError::DuplicatePatientId(_) => client_error(StatusCode::CONFLICT, "duplicate"),
        StoreError::EmptyPledge
        | StoreError::OrganNotPledged { .. }
        | StoreError::UnknownHospital(_)
        | StoreError::Validation(_) => client_error(StatusCode::BAD_REQUEST, "validation_error"),
        StoreError::Io { .. } | StoreError::Parse { .. } | StoreError::Matching(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            create_safe_error_response(
                "storage_error",
                "The registry could not complete the request",
                Some(&err.to_string()),
            ),
        ),
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created, the registry
/// cannot be loaded, or the server fails to start.
pub fn run(args: ServeArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let registry = opts.open_registry()?;
    let mut state = AppState::new(registry);
    if let Some(now) = opts.now {
        state = state.with_clock(now);
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, Arc::new(state)).await })
}

/// JSON API routes without the network-facing middleware
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/donors", get(list_donors).post(pledge))
        .route("/api/donors/{id}/organs/{organ}", delete(withdraw_organ))
        .route(
            "/api/recipients",
            get(list_recipients).post(register_recipient),
        )
        .route("/api/recipients/simulate", post(simulate_recipients))
        .route("/api/recipients/{id}", delete(remove_recipient))
        .route("/api/recipients/{id}/urgency", patch(update_urgency))
        .route("/api/recipients/{id}/score", get(score))
        .route("/api/match", post(run_matching))
        .route("/api/interest", post(express_interest))
        .route(
            "/api/notifications",
            get(list_notifications).delete(clear_notifications),
        )
        .route("/api/hospitals", get(list_hospitals))
        .with_state(state)
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(state: Arc<AppState>) -> anyhow::Result<Router> {
    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limiter configuration"))?;

    let app = api_routes(state).layer(
        ServiceBuilder::new()
            // Security headers for browser protection
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("no-referrer"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("cache-control"),
                HeaderValue::from_static("no-store"),
            ))
            // IP-based rate limiting
            .layer(GovernorLayer {
                config: Arc::new(governor_conf),
            })
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(30),
            ))
            .layer(ConcurrencyLimitLayer::new(100))
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
    );

    Ok(app)
}

async fn run_server(args: ServeArgs, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting organ-match API at http://{addr}/api");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/hospitals"));
    }

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[derive(Deserialize)]
struct PledgeForm {
    name: String,
    blood_group: BloodGroup,
    organs: Vec<OrganType>,
}

/// Query filters are parsed with the same rules as path segments
#[derive(Deserialize)]
struct DonorFilter {
    organ: Option<String>,
}

#[derive(Deserialize)]
struct RecipientFilter {
    organ: Option<String>,
    urgency: Option<String>,
    status: Option<String>,
}

#[derive(Deserialize)]
struct UrgencyForm {
    urgency: Urgency,
}

#[derive(Deserialize)]
struct SimulateForm {
    count: usize,
}

#[derive(Deserialize)]
struct InterestForm {
    donor: DonorId,
    organ: OrganType,
}

async fn list_donors(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DonorFilter>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(filter) = query?;
    let organ: Option<OrganType> = filter.organ.as_deref().map(str::parse).transpose()?;

    let registry = state.registry.lock().await;
    let donors: Vec<_> = registry
        .state()
        .donors
        .iter()
        .filter(|d| organ.map_or(true, |o| d.has_pledged(o)))
        .collect();
    Ok(Json(serde_json::json!(donors)))
}

async fn pledge(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PledgeForm>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(form) = payload?;
    let mut registry = state.registry.lock().await;
    let donor = registry.pledge(&form.name, form.blood_group, form.organs, state.now())?;
    Ok((StatusCode::CREATED, Json(donor)))
}

async fn withdraw_organ(
    State(state): State<Arc<AppState>>,
    Path((id, organ)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    let organ: OrganType = organ.parse()?;
    let mut registry = state.registry.lock().await;
    let outcome = registry.withdraw_organ(&DonorId::new(id), organ)?;
    Ok(Json(outcome))
}

async fn list_recipients(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RecipientFilter>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(filter) = query?;
    let organ: Option<OrganType> = filter.organ.as_deref().map(str::parse).transpose()?;
    let urgency: Option<Urgency> = filter.urgency.as_deref().map(str::parse).transpose()?;
    let status: Option<RecipientStatus> = filter.status.as_deref().map(str::parse).transpose()?;

    let registry = state.registry.lock().await;
    let recipients: Vec<_> = registry
        .state()
        .recipients
        .iter()
        .filter(|r| organ.map_or(true, |o| r.organ_needed == o))
        .filter(|r| urgency.map_or(true, |u| r.urgency == u))
        .filter(|r| status.map_or(true, |s| r.status == s))
        .collect();
    Ok(Json(serde_json::json!(recipients)))
}

async fn register_recipient(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewRecipient>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(form) = payload?;
    let mut registry = state.registry.lock().await;
    let recipient = registry.register_recipient(form, state.now())?;
    Ok((StatusCode::CREATED, Json(recipient)))
}

async fn update_urgency(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UrgencyForm>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(form) = payload?;
    let mut registry = state.registry.lock().await;
    let recipient = registry.update_urgency(&RecipientId::new(id), form.urgency)?;
    Ok(Json(recipient))
}

async fn remove_recipient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let mut registry = state.registry.lock().await;
    let removed = registry.remove_recipient(&RecipientId::new(id))?;
    Ok(Json(removed))
}

async fn simulate_recipients(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulateForm>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(form) = payload?;
    let mut registry = state.registry.lock().await;
    let created = registry.simulate_recipients(form.count, state.now())?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn score(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let registry = state.registry.lock().await;
    let score = registry.score(&RecipientId::new(id), state.now())?;
    Ok(Json(score))
}

async fn run_matching(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let registry = state.registry.lock().await;
    let matches = registry.run_matching(state.now())?;
    Ok(Json(serde_json::json!({
        "count": matches.len(),
        "waiting": registry.state().waitlist().count(),
        "matches": matches,
    })))
}

async fn express_interest(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InterestForm>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(form) = payload?;
    let mut registry = state.registry.lock().await;
    let outcome = registry.express_interest(&form.donor, form.organ, state.now())?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

async fn list_notifications(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let registry = state.registry.lock().await;
    Json(serde_json::json!(registry.state().notifications))
}

async fn clear_notifications(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let mut registry = state.registry.lock().await;
    let cleared = registry.clear_notifications()?;
    Ok(Json(serde_json::json!({ "cleared": cleared })))
}

async fn list_hospitals(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let registry = state.registry.lock().await;
    let hospitals: Vec<_> = registry.hospitals().iter().collect();
    Json(serde_json::json!(hospitals))
}
