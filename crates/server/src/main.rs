// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use clap::Parser;
use office_queue_api::{
    ApiError, AssignmentInfo, CallNextResponse, CounterInfo, CounterNameRequest,
    CounterServicesResponse, CreateServiceRequest, DeleteResponse, IssueTicketRequest,
    ListCountersResponse, ListQueuesResponse, ListServicesResponse, ListTicketsResponse,
    OpenQueueRequest, QueueInfo, ResetQueuesResponse, ServiceInfo, TicketInfo,
    UpdateServiceRequest, WaitingTimeResponse,
};
use office_queue_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use time::{Date, OffsetDateTime, UtcOffset};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Office Queue Server - HTTP server for the Office Queue ticket dispatch system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3001)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,
}

/// Application state shared across handlers.
///
/// Each request locks the persistence layer for exactly one core call.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    /// Offset used to decide which calendar day "today" is.
    offset: UtcOffset,
}

impl AppState {
    fn new(persistence: Persistence, offset: UtcOffset) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            offset,
        }
    }

    /// The current calendar day at the configured offset.
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.offset).date()
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InvalidState { .. } => {
                warn!(error = %err, "Rejected invariant-violating request");
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::StoreFailure { .. } => {
                error!(error = %err, "Store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ========================================================================
// Services
// ========================================================================

/// Handler for POST `/services`.
async fn handle_create_service(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<Json<ServiceInfo>, HttpError> {
    info!(name = %req.name, service_time = req.service_time, "Handling create_service request");

    let mut persistence = app_state.persistence.lock().await;
    let service: ServiceInfo = office_queue_api::create_service(&mut persistence, &req)?;
    drop(persistence);

    info!(service_id = service.service_id, "Created service");
    Ok(Json(service))
}

/// Handler for GET `/services`.
async fn handle_list_services(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListServicesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListServicesResponse = office_queue_api::list_services(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/services/{id}`.
async fn handle_get_service(
    AxumState(app_state): AxumState<AppState>,
    Path(service_id): Path<i64>,
) -> Result<Json<ServiceInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let service: ServiceInfo = office_queue_api::get_service(&mut persistence, service_id)?;
    drop(persistence);

    Ok(Json(service))
}

/// Handler for GET `/services/name/{name}`.
async fn handle_get_service_by_name(
    AxumState(app_state): AxumState<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ServiceInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let service: ServiceInfo = office_queue_api::get_service_by_name(&mut persistence, &name)?;
    drop(persistence);

    Ok(Json(service))
}

/// Handler for PATCH `/services/{name}`.
///
/// Services are edited by their current name.
async fn handle_update_service(
    AxumState(app_state): AxumState<AppState>,
    Path(name): Path<String>,
    Json(req): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceInfo>, HttpError> {
    info!(name = %name, new_name = %req.new_name, "Handling update_service request");

    let mut persistence = app_state.persistence.lock().await;
    let service: ServiceInfo = office_queue_api::update_service(&mut persistence, &name, &req)?;
    drop(persistence);

    Ok(Json(service))
}

/// Handler for DELETE `/services/{name}`.
async fn handle_delete_service(
    AxumState(app_state): AxumState<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(name = %name, "Handling delete_service request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = office_queue_api::delete_service(&mut persistence, &name)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/services/waitingtime/{id}`.
async fn handle_waiting_time(
    AxumState(app_state): AxumState<AppState>,
    Path(service_id): Path<i64>,
) -> Result<Json<WaitingTimeResponse>, HttpError> {
    let today: Date = app_state.today();

    let mut persistence = app_state.persistence.lock().await;
    let response: WaitingTimeResponse =
        office_queue_api::estimate_waiting_time(&mut persistence, service_id, today)?;
    drop(persistence);

    Ok(Json(response))
}

// ========================================================================
// Counters
// ========================================================================

/// Handler for POST `/counters`.
async fn handle_create_counter(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CounterNameRequest>,
) -> Result<Json<CounterInfo>, HttpError> {
    info!(name = %req.name, "Handling create_counter request");

    let mut persistence = app_state.persistence.lock().await;
    let counter: CounterInfo = office_queue_api::create_counter(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(counter))
}

/// Handler for GET `/counters`.
async fn handle_list_counters(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListCountersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListCountersResponse = office_queue_api::list_counters(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/counters/{id}`.
async fn handle_get_counter(
    AxumState(app_state): AxumState<AppState>,
    Path(counter_id): Path<i64>,
) -> Result<Json<CounterInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let counter: CounterInfo = office_queue_api::get_counter(&mut persistence, counter_id)?;
    drop(persistence);

    Ok(Json(counter))
}

/// Handler for POST `/counters/{id}`, which renames the counter.
async fn handle_update_counter(
    AxumState(app_state): AxumState<AppState>,
    Path(counter_id): Path<i64>,
    Json(req): Json<CounterNameRequest>,
) -> Result<Json<CounterInfo>, HttpError> {
    info!(counter_id, name = %req.name, "Handling update_counter request");

    let mut persistence = app_state.persistence.lock().await;
    let counter: CounterInfo =
        office_queue_api::update_counter(&mut persistence, counter_id, &req)?;
    drop(persistence);

    Ok(Json(counter))
}

/// Handler for DELETE `/counters/{id}`.
async fn handle_delete_counter(
    AxumState(app_state): AxumState<AppState>,
    Path(counter_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(counter_id, "Handling delete_counter request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = office_queue_api::delete_counter(&mut persistence, counter_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/counters/{counter_id}/services/{service_id}`.
async fn handle_assign_service(
    AxumState(app_state): AxumState<AppState>,
    Path((counter_id, service_id)): Path<(i64, i64)>,
) -> Result<Json<AssignmentInfo>, HttpError> {
    info!(counter_id, service_id, "Handling assign_service request");
    let today: Date = app_state.today();

    let mut persistence = app_state.persistence.lock().await;
    let assignment: AssignmentInfo =
        office_queue_api::assign_service(&mut persistence, counter_id, service_id, today)?;
    drop(persistence);

    Ok(Json(assignment))
}

/// Handler for DELETE `/counters/{counter_id}/services/{service_id}`.
async fn handle_unassign_service(
    AxumState(app_state): AxumState<AppState>,
    Path((counter_id, service_id)): Path<(i64, i64)>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(counter_id, service_id, "Handling unassign_service request");
    let today: Date = app_state.today();

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse =
        office_queue_api::unassign_service(&mut persistence, counter_id, service_id, today)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/counters/{counter_id}/services`.
async fn handle_counter_services(
    AxumState(app_state): AxumState<AppState>,
    Path(counter_id): Path<i64>,
) -> Result<Json<CounterServicesResponse>, HttpError> {
    let today: Date = app_state.today();

    let mut persistence = app_state.persistence.lock().await;
    let response: CounterServicesResponse =
        office_queue_api::list_counter_services(&mut persistence, counter_id, today)?;
    drop(persistence);

    Ok(Json(response))
}

// ========================================================================
// Queues
// ========================================================================

/// Handler for POST `/queues`.
async fn handle_open_queue(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<OpenQueueRequest>,
) -> Result<Json<QueueInfo>, HttpError> {
    info!(service_id = req.service_id, "Handling open_queue request");
    let today: Date = app_state.today();

    let mut persistence = app_state.persistence.lock().await;
    let queue: QueueInfo = office_queue_api::open_queue(&mut persistence, &req, today)?;
    drop(persistence);

    Ok(Json(queue))
}

/// Handler for GET `/queues`.
async fn handle_list_queues(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListQueuesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListQueuesResponse = office_queue_api::list_queues(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/queues/{service_id}/{date}`.
async fn handle_get_queue(
    AxumState(app_state): AxumState<AppState>,
    Path((service_id, date)): Path<(i64, String)>,
) -> Result<Json<QueueInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let queue: QueueInfo = office_queue_api::get_queue(&mut persistence, service_id, &date)?;
    drop(persistence);

    Ok(Json(queue))
}

/// Handler for DELETE `/queues/{service_id}/{date}`.
async fn handle_delete_queue(
    AxumState(app_state): AxumState<AppState>,
    Path((service_id, date)): Path<(i64, String)>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(service_id, date = %date, "Handling delete_queue request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse =
        office_queue_api::delete_queue(&mut persistence, service_id, &date)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/queues`.
async fn handle_delete_all_queues(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!("Handling delete_all_queues request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = office_queue_api::delete_all_queues(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/queues/next/{counter_id}`.
///
/// Responds 200 with a null ticket when the counter has nobody to call.
async fn handle_call_next(
    AxumState(app_state): AxumState<AppState>,
    Path(counter_id): Path<i64>,
) -> Result<Json<CallNextResponse>, HttpError> {
    info!(counter_id, "Handling call_next request");
    let today: Date = app_state.today();

    let mut persistence = app_state.persistence.lock().await;
    let response: CallNextResponse =
        office_queue_api::call_next(&mut persistence, counter_id, today)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/queues/reset`.
async fn handle_reset_queues(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ResetQueuesResponse>, HttpError> {
    let today: Date = app_state.today();
    info!(%today, "Handling reset_queues request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ResetQueuesResponse = office_queue_api::reset_queues(&mut persistence, today)?;
    drop(persistence);

    Ok(Json(response))
}

// ========================================================================
// Tickets
// ========================================================================

/// Handler for POST `/tickets/new`.
async fn handle_issue_ticket(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<IssueTicketRequest>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(service_id = req.service_id, "Handling issue_ticket request");
    let today: Date = app_state.today();

    let mut persistence = app_state.persistence.lock().await;
    let ticket: TicketInfo = office_queue_api::issue_ticket(&mut persistence, &req, today)?;
    drop(persistence);

    Ok(Json(ticket))
}

/// Handler for GET `/tickets`.
async fn handle_list_tickets(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListTicketsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListTicketsResponse = office_queue_api::list_tickets(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/tickets/{id}`.
async fn handle_get_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_id): Path<i64>,
) -> Result<Json<TicketInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let ticket: TicketInfo = office_queue_api::get_ticket(&mut persistence, ticket_id)?;
    drop(persistence);

    Ok(Json(ticket))
}

/// Handler for DELETE `/tickets/{id}`.
async fn handle_delete_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(ticket_id, "Handling delete_ticket request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = office_queue_api::delete_ticket(&mut persistence, ticket_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/tickets`.
async fn handle_delete_all_tickets(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!("Handling delete_all_tickets request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = office_queue_api::delete_all_tickets(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints under `/officequeue`.
fn build_router(app_state: AppState) -> Router {
    let routes: Router<AppState> = Router::new()
        .route(
            "/services",
            post(handle_create_service).get(handle_list_services),
        )
        .route("/services/name/{name}", get(handle_get_service_by_name))
        .route("/services/waitingtime/{id}", get(handle_waiting_time))
        .route(
            "/services/{service}",
            get(handle_get_service)
                .patch(handle_update_service)
                .delete(handle_delete_service),
        )
        .route(
            "/counters",
            post(handle_create_counter).get(handle_list_counters),
        )
        .route(
            "/counters/{counter_id}",
            get(handle_get_counter)
                .post(handle_update_counter)
                .delete(handle_delete_counter),
        )
        .route("/counters/{counter_id}/services", get(handle_counter_services))
        .route(
            "/counters/{counter_id}/services/{service_id}",
            post(handle_assign_service).delete(handle_unassign_service),
        )
        .route(
            "/queues",
            post(handle_open_queue)
                .get(handle_list_queues)
                .delete(handle_delete_all_queues),
        )
        .route("/queues/reset", patch(handle_reset_queues))
        .route("/queues/next/{counter_id}", patch(handle_call_next))
        .route(
            "/queues/{service_id}/{date}",
            get(handle_get_queue).delete(handle_delete_queue),
        )
        .route("/tickets/new", post(handle_issue_ticket))
        .route(
            "/tickets",
            get(handle_list_tickets).delete(handle_delete_all_tickets),
        )
        .route(
            "/tickets/{id}",
            get(handle_get_ticket).delete(handle_delete_ticket),
        );

    Router::new()
        .nest("/officequeue", routes)
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Office Queue Server");

    let offset: UtcOffset = UtcOffset::current_local_offset().unwrap_or_else(|_| {
        warn!("Local UTC offset could not be determined, days follow UTC");
        UtcOffset::UTC
    });

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app: Router = build_router(AppState::new(persistence, offset));

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Helper to create a router over a fresh in-memory database.
    fn create_test_app() -> Router {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        build_router(AppState::new(persistence, UtcOffset::UTC))
    }

    /// Sends one request and returns the status with the decoded JSON body.
    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (HttpStatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body: Body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_string(&value).unwrap())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status: HttpStatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    /// Creates a service with an open queue and one counter serving it.
    async fn setup_service_and_counter(app: &Router) -> (i64, i64) {
        let (_, service) = send(
            app,
            "POST",
            "/officequeue/services",
            Some(json!({"name": "Passports", "service_time": 10})),
        )
        .await;
        let service_id: i64 = service["service_id"].as_i64().unwrap();

        let (status, _) = send(
            app,
            "POST",
            "/officequeue/queues",
            Some(json!({"service_id": service_id})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (_, counter) = send(
            app,
            "POST",
            "/officequeue/counters",
            Some(json!({"name": "Window 1"})),
        )
        .await;
        let counter_id: i64 = counter["counter_id"].as_i64().unwrap();

        let (status, _) = send(
            app,
            "POST",
            &format!("/officequeue/counters/{counter_id}/services/{service_id}"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        (service_id, counter_id)
    }

    #[tokio::test]
    async fn test_create_and_fetch_service() {
        let app: Router = create_test_app();

        let (status, created) = send(
            &app,
            "POST",
            "/officequeue/services",
            Some(json!({"name": "Passports", "service_time": 10})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let service_id: i64 = created["service_id"].as_i64().unwrap();

        let (status, by_id) = send(
            &app,
            "GET",
            &format!("/officequeue/services/{service_id}"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(by_id, created);

        let (status, by_name) =
            send(&app, "GET", "/officequeue/services/name/Passports", None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(by_name, created);
    }

    #[tokio::test]
    async fn test_duplicate_service_is_conflict() {
        let app: Router = create_test_app();
        let body: Value = json!({"name": "Passports", "service_time": 10});
        send(&app, "POST", "/officequeue/services", Some(body.clone())).await;

        let (status, error) = send(&app, "POST", "/officequeue/services", Some(body)).await;

        assert_eq!(status, HttpStatusCode::CONFLICT);
        assert_eq!(error["error"], true);
    }

    #[tokio::test]
    async fn test_invalid_service_time_is_bad_request() {
        let app: Router = create_test_app();

        let (status, _) = send(
            &app,
            "POST",
            "/officequeue/services",
            Some(json!({"name": "Passports", "service_time": 0})),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_ticket_is_not_found() {
        let app: Router = create_test_app();

        let (status, error) = send(&app, "GET", "/officequeue/tickets/99", None).await;

        assert_eq!(status, HttpStatusCode::NOT_FOUND);
        assert!(error["message"].as_str().unwrap().contains("99"));
    }

    #[tokio::test]
    async fn test_issue_and_call_next() {
        let app: Router = create_test_app();
        let (service_id, counter_id) = setup_service_and_counter(&app).await;

        let (status, ticket) = send(
            &app,
            "POST",
            "/officequeue/tickets/new",
            Some(json!({"service_id": service_id})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(ticket["queue_position"], 0);

        let (status, called) = send(
            &app,
            "PATCH",
            &format!("/officequeue/queues/next/{counter_id}"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(called["ticket"]["ticket_id"], ticket["ticket_id"]);
        assert_eq!(called["ticket"]["served"], true);

        let (status, idle) = send(
            &app,
            "PATCH",
            &format!("/officequeue/queues/next/{counter_id}"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert!(idle["ticket"].is_null());
    }

    #[tokio::test]
    async fn test_waiting_time_endpoint() {
        let app: Router = create_test_app();
        let (service_id, _) = setup_service_and_counter(&app).await;
        for _ in 0..2 {
            send(
                &app,
                "POST",
                "/officequeue/tickets/new",
                Some(json!({"service_id": service_id})),
            )
            .await;
        }

        let (status, estimate) = send(
            &app,
            "GET",
            &format!("/officequeue/services/waitingtime/{service_id}"),
            None,
        )
        .await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(estimate["queue_length"], 2);
        assert!((estimate["waiting_time"].as_f64().unwrap() - 25.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_open_queue_twice_is_conflict() {
        let app: Router = create_test_app();
        let (service_id, _) = setup_service_and_counter(&app).await;

        let (status, _) = send(
            &app,
            "POST",
            "/officequeue/queues",
            Some(json!({"service_id": service_id})),
        )
        .await;

        assert_eq!(status, HttpStatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_get_queue_with_malformed_date_is_bad_request() {
        let app: Router = create_test_app();
        let (service_id, _) = setup_service_and_counter(&app).await;

        let (status, _) = send(
            &app,
            "GET",
            &format!("/officequeue/queues/{service_id}/yesterday"),
            None,
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reset_queues_endpoint() {
        let app: Router = create_test_app();
        setup_service_and_counter(&app).await;

        let (status, response) = send(&app, "PATCH", "/officequeue/queues/reset", None).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(response["queues_reset"], 1);
    }

    #[tokio::test]
    async fn test_delete_service_cascades_to_tickets() {
        let app: Router = create_test_app();
        let (service_id, _) = setup_service_and_counter(&app).await;
        send(
            &app,
            "POST",
            "/officequeue/tickets/new",
            Some(json!({"service_id": service_id})),
        )
        .await;

        let (status, _) = send(&app, "DELETE", "/officequeue/services/Passports", None).await;
        assert_eq!(status, HttpStatusCode::OK);

        let (_, tickets) = send(&app, "GET", "/officequeue/tickets", None).await;
        assert!(tickets["tickets"].as_array().unwrap().is_empty());
        let (_, queues) = send(&app, "GET", "/officequeue/queues", None).await;
        assert!(queues["queues"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_call_next_unknown_counter_is_not_found() {
        let app: Router = create_test_app();

        let (status, _) = send(&app, "PATCH", "/officequeue/queues/next/5", None).await;

        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }
}
