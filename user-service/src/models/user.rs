use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A user document in the `users` collection.
///
/// `_id` is left unset on insert so the store assigns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
