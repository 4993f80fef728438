//! MongoDB todo store

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::TryStreamExt;
use mongodb::{
    options::{ClientOptions, FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Client, Collection,
};
use serde::{Deserialize, Serialize};
use todos_core::{StoreConfig, TodoError, TODOS_COLLECTION};
use todos_types::{StoreBackend, Todo, TodoPayload, TodoUpdate};
use tracing::debug;

use super::traits::TodoStore;

/// Shape of a todo as stored in the `todos` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    order: i64,
    #[serde(default)]
    done: bool,
}

impl TodoDocument {
    fn from_payload(payload: TodoPayload) -> Self {
        Self {
            id: None,
            text: payload.text,
            order: payload.order,
            done: payload.done,
        }
    }

    fn into_todo(self) -> Option<Todo> {
        let id = self.id?;
        Some(Todo {
            id: id.to_hex(),
            text: self.text,
            order: self.order,
            done: self.done,
        })
    }
}

/// MongoDB store: one document per todo in the configured database.
pub struct MongoTodoStore {
    client: Client,
    collection: Collection<TodoDocument>,
}

impl MongoTodoStore {
    /// Connect using the store section of the configuration
    pub async fn new(config: &StoreConfig) -> Result<Self, TodoError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| TodoError::Config("MongoDB store requires a url".to_string()))?;

        let pool = config.pool();
        let mut options = ClientOptions::parse(url)
            .await
            .map_err(|e| TodoError::Store(format!("MongoDB options parse failed: {}", e)))?;
        options.min_pool_size = options.min_pool_size.or(Some(pool.min_connections()));
        options.max_pool_size = options.max_pool_size.or(Some(pool.max_connections()));
        options.app_name = options.app_name.or(Some("todos".to_string()));

        let client = Client::with_options(options)
            .map_err(|e| TodoError::Store(format!("MongoDB client creation failed: {}", e)))?;
        let collection = client
            .database(config.database())
            .collection::<TodoDocument>(TODOS_COLLECTION);

        debug!(
            "MongoDB store using {}.{}",
            config.database(),
            TODOS_COLLECTION
        );

        Ok(Self { client, collection })
    }

    fn id_filter(id: &str) -> Result<Document, TodoError> {
        let oid = ObjectId::parse_str(id)
            .map_err(|_| TodoError::InvalidIdentifier(id.to_string()))?;
        Ok(doc! { "_id": oid })
    }

    /// Ascending by `order`; equal orders keep creation order via the ObjectId
    fn list_options() -> FindOptions {
        FindOptions::builder()
            .sort(doc! { "order": 1, "_id": 1 })
            .build()
    }

    /// `$set` body holding only the fields present in `update`
    fn set_document(update: &TodoUpdate) -> Document {
        let mut set = Document::new();
        if let Some(text) = &update.text {
            set.insert("text", text.as_str());
        }
        if let Some(order) = update.order {
            set.insert("order", order);
        }
        if let Some(done) = update.done {
            set.insert("done", done);
        }
        set
    }
}

#[async_trait]
impl TodoStore for MongoTodoStore {
    async fn insert(&self, payload: TodoPayload) -> Result<Todo, TodoError> {
        let document = TodoDocument::from_payload(payload.clone());
        let result = self
            .collection
            .insert_one(&document, None)
            .await
            .map_err(|e| TodoError::Store(format!("insert_one failed: {}", e)))?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            TodoError::Store(format!(
                "insert_one returned a non-ObjectId id: {}",
                result.inserted_id
            ))
        })?;

        Ok(Todo::from_payload(id.to_hex(), payload))
    }

    async fn find_all(&self) -> Result<Vec<Todo>, TodoError> {
        let cursor = self
            .collection
            .find(None, Self::list_options())
            .await
            .map_err(|e| TodoError::Store(format!("find failed: {}", e)))?;

        let documents: Vec<TodoDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| TodoError::Store(format!("cursor read failed: {}", e)))?;

        Ok(documents
            .into_iter()
            .filter_map(TodoDocument::into_todo)
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, TodoError> {
        let filter = Self::id_filter(id)?;
        let document = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| TodoError::Store(format!("find_one failed: {}", e)))?;

        Ok(document.and_then(TodoDocument::into_todo))
    }

    async fn update_by_id(&self, id: &str, update: TodoUpdate) -> Result<Option<Todo>, TodoError> {
        let set = Self::set_document(&update);
        if set.is_empty() {
            return self.find_by_id(id).await;
        }

        let filter = Self::id_filter(id)?;
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let document = self
            .collection
            .find_one_and_update(filter, doc! { "$set": set }, options)
            .await
            .map_err(|e| TodoError::Store(format!("find_one_and_update failed: {}", e)))?;

        if document.is_none() {
            debug!("Update matched no todo for id {}", id);
        }

        Ok(document.and_then(TodoDocument::into_todo))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), TodoError> {
        let filter = Self::id_filter(id)?;
        let result = self
            .collection
            .delete_one(filter, None)
            .await
            .map_err(|e| TodoError::Store(format!("delete_one failed: {}", e)))?;

        debug!("Deleted {} todo(s) for id {}", result.deleted_count, id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), TodoError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| TodoError::Store(format!("MongoDB health check failed: {}", e)))?;
        Ok(())
    }

    async fn close(&self) -> Result<(), TodoError> {
        // The driver's pool is released when the last client handle drops.
        Ok(())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Mongodb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_omits_missing_id() {
        let document = TodoDocument::from_payload(TodoPayload::new("foo", 1, false));
        let bson = bson::to_document(&document).unwrap();
        assert!(!bson.contains_key("_id"));
        assert_eq!(bson.get_str("text").unwrap(), "foo");
        assert_eq!(bson.get_i64("order").unwrap(), 1);
        assert!(!bson.get_bool("done").unwrap());
    }

    #[test]
    fn test_document_into_todo_renders_hex_id() {
        let oid = ObjectId::parse_str("4e971ed699b6bd4f08000001").unwrap();
        let stored = doc! { "_id": oid, "text": "bar", "order": 3_i32, "done": true };
        let document: TodoDocument = bson::from_document(stored).unwrap();
        let todo = document.into_todo().unwrap();
        assert_eq!(todo.id, "4e971ed699b6bd4f08000001");
        assert_eq!(todo.text, "bar");
        assert_eq!(todo.order, 3);
        assert!(todo.done);
    }

    #[test]
    fn test_document_missing_fields_default() {
        let oid = ObjectId::new();
        let document: TodoDocument = bson::from_document(doc! { "_id": oid }).unwrap();
        let todo = document.into_todo().unwrap();
        assert_eq!(todo.text, "");
        assert_eq!(todo.order, 0);
        assert!(!todo.done);
    }

    #[test]
    fn test_id_filter() {
        let filter = MongoTodoStore::id_filter("4e971ed699b6bd4f08000001").unwrap();
        assert_eq!(
            filter.get_object_id("_id").unwrap().to_hex(),
            "4e971ed699b6bd4f08000001"
        );
        assert!(matches!(
            MongoTodoStore::id_filter("123"),
            Err(TodoError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_list_sort_breaks_ties_by_id() {
        let sort = MongoTodoStore::list_options().sort.unwrap();
        let keys: Vec<&str> = sort.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["order", "_id"]);
        assert_eq!(sort.get_i32("order").unwrap(), 1);
        assert_eq!(sort.get_i32("_id").unwrap(), 1);
    }

    #[test]
    fn test_set_document_only_has_supplied_fields() {
        let update = TodoUpdate {
            text: Some("bar".to_string()),
            ..TodoUpdate::default()
        };
        assert_eq!(MongoTodoStore::set_document(&update), doc! { "text": "bar" });

        let update = TodoUpdate {
            text: None,
            order: Some(7),
            done: Some(true),
        };
        assert_eq!(
            MongoTodoStore::set_document(&update),
            doc! { "order": 7_i64, "done": true }
        );

        assert!(MongoTodoStore::set_document(&TodoUpdate::default()).is_empty());
    }

    async fn test_store(database: &str) -> MongoTodoStore {
        let mut config = StoreConfig::mongodb("mongodb://localhost:27017");
        config.database = Some(database.to_string());
        let store = MongoTodoStore::new(&config).await.unwrap();
        store.collection.drop(None).await.unwrap();
        store
    }

    #[tokio::test]
    #[ignore] // Requires a running MongoDB instance
    async fn test_mongodb_equal_orders_keep_creation_order() {
        let store = test_store("todos_test_ordering").await;

        let first = store.insert(TodoPayload::new("first", 1, false)).await.unwrap();
        let second = store.insert(TodoPayload::new("second", 1, false)).await.unwrap();
        let third = store.insert(TodoPayload::new("third", 0, false)).await.unwrap();

        let ids: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![third.id, first.id, second.id]);
    }

    #[tokio::test]
    #[ignore] // Requires a running MongoDB instance
    async fn test_mongodb_partial_update() {
        let store = test_store("todos_test_update").await;

        let created = store.insert(TodoPayload::new("foo", 7, true)).await.unwrap();
        let update = TodoUpdate {
            text: Some("bar".to_string()),
            ..TodoUpdate::default()
        };
        let updated = store.update_by_id(&created.id, update).await.unwrap().unwrap();
        assert_eq!(updated.text, "bar");
        assert_eq!(updated.order, 7);
        assert!(updated.done);

        let missing = store
            .update_by_id("4e971ed699b6bd4f08000001", TodoUpdate::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    #[ignore] // Requires a running MongoDB instance
    async fn test_mongodb_crud_cycle() {
        let mut config = StoreConfig::mongodb("mongodb://localhost:27017");
        config.database = Some("todos_test".to_string());
        let store = MongoTodoStore::new(&config).await.unwrap();
        store.health_check().await.unwrap();

        let created = store.insert(TodoPayload::new("foo", 1, false)).await.unwrap();
        let fetched = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        let update = TodoUpdate {
            text: Some("bar".to_string()),
            order: Some(1),
            done: Some(true),
        };
        let updated = store.update_by_id(&created.id, update).await.unwrap().unwrap();
        assert_eq!(updated.text, "bar");
        assert_eq!(store.find_by_id(&created.id).await.unwrap(), Some(updated));

        store.delete_by_id(&created.id).await.unwrap();
        assert!(store.find_by_id(&created.id).await.unwrap().is_none());
    }
}
