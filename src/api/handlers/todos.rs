//! TODO handlers.
//!
//! One route, `/todos`, dispatched on the HTTP method. Bodies are decoded as
//! JSON whatever their `Content-Type`, then validated here before the
//! repository is called; repository errors are
//! mapped by kind, with the diagnostic logged and a fixed message returned.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::{Method, StatusCode},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{error, instrument, warn};
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::db::{
    DEFAULT_PAGE_SIZE, Database, DbError, PageCursor, Todo, TodoId, TodoRepository,
};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// TODO response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct TodoResponse {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "buy milk")]
    pub subject: String,
    #[schema(example = "semi-skimmed")]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            subject: t.subject,
            description: t.description,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Single TODO envelope, returned by create and update
#[derive(Debug, Serialize, ToSchema)]
pub struct TodoEnvelope {
    pub todo: TodoResponse,
}

/// Page of TODOs, newest first
#[derive(Debug, Serialize, ToSchema)]
pub struct TodoList {
    pub todos: Vec<TodoResponse>,
}

/// Create TODO request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    #[schema(example = "buy milk")]
    #[serde(default)]
    pub subject: String,
    /// Optional; absent or null means empty
    #[schema(example = "semi-skimmed")]
    #[serde(default)]
    pub description: Option<String>,
}

/// Update TODO request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTodoRequest {
    /// Identifier of the TODO to update; 0 means absent
    #[schema(example = 1)]
    #[serde(default)]
    pub id: TodoId,
    #[schema(example = "buy milk and bread")]
    #[serde(default)]
    pub subject: String,
    /// Optional; absent or null means empty
    #[serde(default)]
    pub description: Option<String>,
}

/// Delete TODOs request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteTodosRequest {
    #[schema(example = json!([1, 2, 3]))]
    #[serde(default)]
    pub ids: Vec<TodoId>,
}

/// Delete TODOs response DTO (empty object)
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteTodosResponse {}

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "todo not found")]
    pub error: String,
}

// Values are kept as strings so that empty parameters fall back to defaults
// and malformed integers can be reported as a bad request.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTodosQuery {
    /// Return only TODOs with an id below this one (0 or absent: newest first)
    #[param(value_type = Option<i64>, example = 0)]
    pub prev_id: Option<String>,
    /// Maximum number of TODOs to return (default 5)
    #[param(value_type = Option<i64>, example = 5)]
    pub size: Option<String>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

// =============================================================================
// Handlers
// =============================================================================

/// Create a TODO
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 200, description = "TODO created", body = TodoEnvelope),
        (status = 400, description = "Malformed body or empty subject", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_todo<D: Database>(
    State(state): State<AppState<D>>,
    body: Bytes,
) -> Result<Json<TodoEnvelope>, HandlerError> {
    let req: CreateTodoRequest = decode_body(&body)?;

    if req.subject.is_empty() {
        warn!("Rejected todo without subject");
        return Err(bad_request("subject is required"));
    }

    let todo = state
        .db()
        .todos()
        .create(&req.subject, req.description.as_deref().unwrap_or_default())
        .await
        .map_err(db_error)?;

    Ok(Json(TodoEnvelope { todo: todo.into() }))
}

/// List TODOs
///
/// Returns up to `size` TODOs ordered newest first. Pass the last id of a
/// page as `prev_id` to fetch the next (older) page.
#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    params(ListTodosQuery),
    responses(
        (status = 200, description = "Page of TODOs", body = TodoList),
        (status = 400, description = "Malformed query parameter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_todos<D: Database>(
    State(state): State<AppState<D>>,
    query: Result<Query<ListTodosQuery>, QueryRejection>,
) -> Result<Json<TodoList>, HandlerError> {
    let Query(query) = query.map_err(|e| {
        warn!(error = %e, "Rejected malformed query string");
        bad_request("malformed query string")
    })?;

    let cursor = PageCursor::new(
        parse_param("prev_id", query.prev_id.as_deref(), 0)?,
        parse_param("size", query.size.as_deref(), DEFAULT_PAGE_SIZE)?,
    );

    let todos = state
        .db()
        .todos()
        .read(cursor)
        .await
        .map_err(db_error)?;

    Ok(Json(TodoList {
        todos: todos.into_iter().map(TodoResponse::from).collect(),
    }))
}

/// Update a TODO
#[utoipa::path(
    put,
    path = "/todos",
    tag = "todos",
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "TODO updated", body = TodoEnvelope),
        (status = 400, description = "Malformed body, empty subject or missing id", body = ErrorResponse),
        (status = 404, description = "TODO not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn update_todo<D: Database>(
    State(state): State<AppState<D>>,
    body: Bytes,
) -> Result<Json<TodoEnvelope>, HandlerError> {
    let req: UpdateTodoRequest = decode_body(&body)?;

    if req.subject.is_empty() || req.id == 0 {
        warn!(id = req.id, "Rejected update without subject or id");
        return Err(bad_request("id and subject are required"));
    }

    let todo = state
        .db()
        .todos()
        .update(
            req.id,
            &req.subject,
            req.description.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(db_error)?;

    Ok(Json(TodoEnvelope { todo: todo.into() }))
}

/// Delete TODOs
///
/// Deletes every TODO listed in `ids`. Succeeds when at least one was removed.
#[utoipa::path(
    delete,
    path = "/todos",
    tag = "todos",
    request_body = DeleteTodosRequest,
    responses(
        (status = 200, description = "TODOs deleted", body = DeleteTodosResponse),
        (status = 400, description = "Malformed body or no ids", body = ErrorResponse),
        (status = 404, description = "None of the TODOs exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn delete_todos<D: Database>(
    State(state): State<AppState<D>>,
    body: Bytes,
) -> Result<Json<DeleteTodosResponse>, HandlerError> {
    let req: DeleteTodosRequest = decode_body(&body)?;

    if req.ids.is_empty() {
        warn!("Rejected delete without ids");
        return Err(bad_request("ids are required"));
    }

    state
        .db()
        .todos()
        .delete(&req.ids)
        .await
        .map_err(db_error)?;

    Ok(Json(DeleteTodosResponse {}))
}

/// Fallback for methods `/todos` does not serve.
#[instrument]
pub async fn unsupported_method(method: Method) -> HandlerError {
    warn!(%method, "Unsupported method");
    bad_request("unsupported method")
}

// =============================================================================
// Helpers
// =============================================================================

fn bad_request(message: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// Decode a JSON body regardless of the declared content type.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, HandlerError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Rejected malformed request body");
        bad_request("malformed request body")
    })
}

/// Parse an optional integer query parameter; empty means absent.
fn parse_param(name: &str, raw: Option<&str>, default: i64) -> Result<i64, HandlerError> {
    match raw.filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(value) => value.parse::<i64>().map_err(|e| {
            warn!(param = name, value, error = %e, "Rejected malformed query parameter");
            bad_request(&format!("{} must be an integer", name))
        }),
    }
}

/// Map a repository error to a response, logging the diagnostic.
fn db_error(e: DbError) -> HandlerError {
    if e.is_persistence() {
        error!(error = %e, "Todo store failure");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "internal server error".to_string(),
            }),
        );
    }

    warn!(error = %e, "Todo request failed");
    match e {
        DbError::Validation { .. } => bad_request("invalid request"),
        _ => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "todo not found".to_string(),
            }),
        ),
    }
}
