//! API route configuration.

use axum::Router;
use axum::routing::get;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CreateTodoRequest, DeleteTodosRequest, DeleteTodosResponse, ErrorResponse,
    HealthzResponse, TodoEnvelope, TodoList, TodoResponse, UpdateTodoRequest,
};
use super::state::AppState;
use crate::db::Database;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TODO API",
        version = "0.1.0",
        description = "Create, page through, update and delete TODO records",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::create_todo,
        handlers::list_todos,
        handlers::update_todo,
        handlers::delete_todos,
    ),
    components(
        schemas(
            HealthzResponse,
            TodoResponse,
            TodoEnvelope,
            TodoList,
            CreateTodoRequest,
            UpdateTodoRequest,
            DeleteTodosRequest,
            DeleteTodosResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "todos", description = "TODO management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = Router::new().route("/healthz", get(handlers::health));

    // Every method on /todos is answered here; unknown ones get 400, not 405.
    let todo_routes = Router::new().route(
        "/todos",
        get(handlers::list_todos::<D>)
            .post(handlers::create_todo::<D>)
            .put(handlers::update_todo::<D>)
            .delete(handlers::delete_todos::<D>)
            .fallback(handlers::unsupported_method),
    );

    system_routes
        .merge(todo_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
