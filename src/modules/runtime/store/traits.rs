//! Todo store trait definition

use async_trait::async_trait;
use todos_core::{is_valid_object_id, TodoError};
use todos_types::{StoreBackend, Todo, TodoPayload, TodoUpdate};

/// Trait for todo persistence backends
///
/// Every operation touches a single document of the `todos` collection.
/// Identifiers passed in are expected to have passed [`TodoStore::is_valid_id`];
/// stores still reject malformed ones with [`TodoError::InvalidIdentifier`].
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert a new todo and return it with its store-assigned id
    async fn insert(&self, payload: TodoPayload) -> Result<Todo, TodoError>;

    /// Return every todo, ascending by `order`
    async fn find_all(&self) -> Result<Vec<Todo>, TodoError>;

    /// Look up a todo by id; `None` when no document matches
    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, TodoError>;

    /// Set the fields present in `update` on the todo with `id`.
    ///
    /// Returns the todo after the update, or `None` when no document matches.
    /// A missing document is never created.
    async fn update_by_id(&self, id: &str, update: TodoUpdate) -> Result<Option<Todo>, TodoError>;

    /// Remove the todo with `id` if it exists
    async fn delete_by_id(&self, id: &str) -> Result<(), TodoError>;

    /// Whether `id` has this store's identifier format
    fn is_valid_id(&self, id: &str) -> bool {
        is_valid_object_id(id)
    }

    /// Check if the store is reachable
    async fn health_check(&self) -> Result<(), TodoError>;

    /// Release connections and other resources
    async fn close(&self) -> Result<(), TodoError>;

    /// Which backend this store is
    fn backend(&self) -> StoreBackend;
}
