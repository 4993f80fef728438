//! Todo CRUD handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use todos_core::TodoError;
use todos_types::{ErrorResponse, Todo, TodoPayload, TodoUpdate};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Result type returned by the todo handlers
pub type ApiResult<T> = Result<(StatusCode, Json<T>), ApiError>;

/// Handler for the `/todos/` resource
pub struct TodoHandler;

impl TodoHandler {
    /// Handle POST /todos/
    pub async fn create(
        State(state): State<AppState>,
        Json(payload): Json<TodoPayload>,
    ) -> ApiResult<Todo> {
        let todo = state.store.insert(payload).await.map_err(error_response)?;
        info!("Created todo {}", todo.id);
        Ok((StatusCode::OK, Json(todo)))
    }

    /// Handle GET /todos/
    pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Todo>> {
        let todos = state.store.find_all().await.map_err(error_response)?;
        debug!("Listing {} todos", todos.len());
        Ok((StatusCode::OK, Json(todos)))
    }

    /// Handle GET /todos/{id}
    pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Todo> {
        let id = validate_id(&state, id).map_err(error_response)?;
        match state.store.find_by_id(&id).await {
            Ok(Some(todo)) => Ok((StatusCode::OK, Json(todo))),
            Ok(None) => Err(error_response(TodoError::NotFound(id))),
            Err(e) => Err(error_response(e)),
        }
    }

    /// Handle PUT /todos/{id}
    ///
    /// Only the fields present in the body change. A well-formed id with no
    /// matching todo is a no-op that echoes the submitted fields.
    pub async fn update(
        State(state): State<AppState>,
        Path(id): Path<String>,
        Json(update): Json<TodoUpdate>,
    ) -> ApiResult<Todo> {
        let id = validate_id(&state, id).map_err(error_response)?;
        let updated = state
            .store
            .update_by_id(&id, update.clone())
            .await
            .map_err(error_response)?;

        let todo = match updated {
            Some(todo) => {
                info!("Updated todo {}", todo.id);
                todo
            }
            None => {
                debug!("Update of missing todo {} left the store unchanged", id);
                let mut payload = TodoPayload::default();
                update.apply_to(&mut payload);
                Todo::from_payload(id.to_ascii_lowercase(), payload)
            }
        };
        Ok((StatusCode::OK, Json(todo)))
    }

    /// Handle DELETE /todos/{id}
    pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
        let id = validate_id(&state, id).map_err(error_response)?;
        state.store.delete_by_id(&id).await.map_err(error_response)?;
        info!("Deleted todo {}", id);
        Ok((StatusCode::OK, Json(json!({}))))
    }
}

fn validate_id(state: &AppState, id: String) -> Result<String, TodoError> {
    if state.store.is_valid_id(&id) {
        Ok(id)
    } else {
        Err(TodoError::InvalidIdentifier(id))
    }
}

/// Map a service error onto its status code and JSON body
pub fn error_response(e: TodoError) -> ApiError {
    if e.is_error() {
        error!("Request failed: {}", e);
    } else if e.is_client_error() {
        debug!("Rejected request: {}", e);
    } else {
        warn!("Request failed: {}", e);
    }

    let status = match e.status_code() {
        400 => StatusCode::BAD_REQUEST,
        404 => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(e.sanitized_message())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTodoStore;
    use std::sync::Arc;
    use todos_core::AppConfig;

    fn state() -> AppState {
        AppState::new(Arc::new(MemoryTodoStore::new()), Arc::new(AppConfig::default()))
    }

    #[test]
    fn test_error_response_statuses() {
        let (status, body) = error_response(TodoError::InvalidIdentifier("123".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.error, "Invalid todo id: 123");

        let (status, _) = error_response(TodoError::NotFound("x".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = error_response(TodoError::Store("mongodb://secret".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0.error, "Database error");
    }

    #[test]
    fn test_validate_id() {
        let state = state();
        assert!(validate_id(&state, "4e971ed699b6bd4f08000001".into()).is_ok());
        assert!(matches!(
            validate_id(&state, "123".into()),
            Err(TodoError::InvalidIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn test_get_missing_todo() {
        let result = TodoHandler::get(
            State(state()),
            Path("4e971ed699b6bd4f08000001".to_string()),
        )
        .await;
        let (status, _) = result.unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let state = state();
        let (status, Json(created)) = TodoHandler::create(
            State(state.clone()),
            Json(TodoPayload::new("foo", 1, false)),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);

        let (_, Json(fetched)) = TodoHandler::get(State(state), Path(created.id.clone()))
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_merges_into_existing() {
        let state = state();
        let (_, Json(created)) = TodoHandler::create(
            State(state.clone()),
            Json(TodoPayload::new("foo", 7, true)),
        )
        .await
        .unwrap();

        let update = TodoUpdate {
            done: Some(false),
            ..TodoUpdate::default()
        };
        let (status, Json(updated)) =
            TodoHandler::update(State(state), Path(created.id.clone()), Json(update))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated, Todo::from_payload(created.id, TodoPayload::new("foo", 7, false)));
    }
}
