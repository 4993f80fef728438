//! In-process todo store

use async_trait::async_trait;
use bson::oid::ObjectId;
use std::collections::HashMap;
use todos_core::{is_valid_object_id, TodoError};
use todos_types::{StoreBackend, Todo, TodoPayload, TodoUpdate};
use tokio::sync::RwLock;

use super::traits::TodoStore;

/// Map-backed store with MongoDB-style identifiers.
///
/// Contents live only as long as the process. Used for `backend: memory`
/// and for exercising the HTTP layer without a database.
pub struct MemoryTodoStore {
    todos: RwLock<HashMap<String, TodoPayload>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self {
            todos: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored todos
    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }

    fn key(id: &str) -> Result<String, TodoError> {
        if !is_valid_object_id(id) {
            return Err(TodoError::InvalidIdentifier(id.to_string()));
        }
        Ok(id.to_ascii_lowercase())
    }
}

impl Default for MemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn insert(&self, payload: TodoPayload) -> Result<Todo, TodoError> {
        let id = ObjectId::new().to_hex();
        let mut guard = self.todos.write().await;
        guard.insert(id.clone(), payload.clone());
        Ok(Todo::from_payload(id, payload))
    }

    async fn find_all(&self) -> Result<Vec<Todo>, TodoError> {
        let guard = self.todos.read().await;
        let mut todos: Vec<Todo> = guard
            .iter()
            .map(|(id, payload)| Todo::from_payload(id.clone(), payload.clone()))
            .collect();
        // ObjectIds grow with insertion time, so ties keep creation order
        todos.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        Ok(todos)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, TodoError> {
        let key = Self::key(id)?;
        let guard = self.todos.read().await;
        Ok(guard
            .get(&key)
            .map(|payload| Todo::from_payload(key.clone(), payload.clone())))
    }

    async fn update_by_id(&self, id: &str, update: TodoUpdate) -> Result<Option<Todo>, TodoError> {
        let key = Self::key(id)?;
        let mut guard = self.todos.write().await;
        Ok(guard.get_mut(&key).map(|existing| {
            update.apply_to(existing);
            Todo::from_payload(key.clone(), existing.clone())
        }))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), TodoError> {
        let key = Self::key(id)?;
        let mut guard = self.todos.write().await;
        guard.remove(&key);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), TodoError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), TodoError> {
        Ok(())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}
