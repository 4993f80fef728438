//! OpenAPI documentation handler

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use todos_core::{AppConfig, OBJECT_ID_HEX_LEN};

use crate::state::AppState;

/// Handler for OpenAPI documentation
pub struct OpenApiHandler;

impl OpenApiHandler {
    /// Handle GET /docs
    pub async fn handle(State(state): State<AppState>) -> impl IntoResponse {
        (StatusCode::OK, Json(Self::generate_spec(&state.config)))
    }

    /// Generate the OpenAPI 3.0 document for the todo routes
    pub fn generate_spec(config: &AppConfig) -> serde_json::Value {
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "description": "Todo identifier",
            "schema": {
                "type": "string",
                "pattern": format!("^[0-9a-fA-F]{{{}}}$", OBJECT_ID_HEX_LEN)
            }
        });

        let request_body = |schema: &str| {
            json!({
                "required": true,
                "content": {
                    "application/json": {
                        "schema": { "$ref": format!("#/components/schemas/{}", schema) }
                    }
                }
            })
        };

        let todo_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Todo" }
                    }
                }
            })
        };

        let error_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };

        json!({
            "openapi": "3.0.0",
            "info": {
                "title": config.name,
                "version": env!("CARGO_PKG_VERSION"),
                "description": "Create, list, fetch, update and delete todo items"
            },
            "paths": {
                "/todos/": {
                    "get": {
                        "summary": "List all todos",
                        "operationId": "listTodos",
                        "responses": {
                            "200": {
                                "description": "All todos, ascending by order",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Todo" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a todo",
                        "operationId": "createTodo",
                        "requestBody": request_body("TodoPayload"),
                        "responses": {
                            "200": todo_response("The created todo with its id")
                        }
                    }
                },
                "/todos/{id}": {
                    "get": {
                        "summary": "Fetch one todo",
                        "operationId": "getTodo",
                        "parameters": [id_param.clone()],
                        "responses": {
                            "200": todo_response("The todo"),
                            "400": error_response("Malformed id"),
                            "404": error_response("No todo with this id")
                        }
                    },
                    "put": {
                        "summary": "Update the supplied fields of a todo",
                        "operationId": "updateTodo",
                        "parameters": [id_param.clone()],
                        "requestBody": request_body("TodoUpdate"),
                        "responses": {
                            "200": todo_response("The updated todo"),
                            "400": error_response("Malformed id")
                        }
                    },
                    "delete": {
                        "summary": "Delete a todo",
                        "operationId": "deleteTodo",
                        "parameters": [id_param],
                        "responses": {
                            "200": { "description": "Deleted, or already absent" },
                            "400": error_response("Malformed id")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Todo": {
                        "type": "object",
                        "required": ["id", "text", "order", "done"],
                        "properties": {
                            "id": { "type": "string" },
                            "text": { "type": "string" },
                            "order": { "type": "integer", "format": "int64" },
                            "done": { "type": "boolean" }
                        }
                    },
                    "TodoPayload": {
                        "type": "object",
                        "properties": {
                            "text": { "type": "string", "default": "" },
                            "order": { "type": "integer", "format": "int64", "default": 0 },
                            "done": { "type": "boolean", "default": false }
                        }
                    },
                    "TodoUpdate": {
                        "type": "object",
                        "description": "Fields left out keep their stored values",
                        "properties": {
                            "text": { "type": "string" },
                            "order": { "type": "integer", "format": "int64" },
                            "done": { "type": "boolean" }
                        }
                    },
                    "ErrorResponse": {
                        "type": "object",
                        "required": ["error"],
                        "properties": {
                            "error": { "type": "string" }
                        }
                    }
                }
            }
        })
    }
}
