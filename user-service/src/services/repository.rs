use crate::models::User;
use crate::services::metrics::record_operation;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection,
};
use service_core::error::AppError;

use super::MongoDb;

/// CRUD access to the `users` collection.
///
/// Lookups by id return `Ok(None)` when nothing matches; only driver failures
/// are errors.
#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: &MongoDb) -> Self {
        Self {
            collection: db.users(),
        }
    }

    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        record_operation("create");
        let result = self.collection.insert_one(&user, None).await?;
        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    /// All users in natural order.
    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        record_operation("list");
        let cursor = self.collection.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn get(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        record_operation("get");
        Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
    }

    /// Applies `update` and returns the post-update document. With no
    /// modifications this is a plain lookup.
    pub async fn update(
        &self,
        id: ObjectId,
        update: Option<Document>,
    ) -> Result<Option<User>, AppError> {
        record_operation("update");
        let Some(update) = update else {
            return Ok(self.collection.find_one(doc! { "_id": id }, None).await?);
        };

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, update, options)
            .await?)
    }

    /// Returns whether a document was removed.
    pub async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        record_operation("delete");
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }
}
