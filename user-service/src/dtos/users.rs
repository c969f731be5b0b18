use crate::models::User;
use mongodb::bson::{doc, Document};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Request body for `POST /users` and `PUT /users/:id`.
///
/// Each field is tri-state: absent (`None`), explicit `null` (`Some(None)`)
/// or a value (`Some(Some(_))`). Numbers and booleans are stored as their
/// string form; objects and arrays are rejected. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct UserPayload {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Option<String>>,
}

// Only called when the key exists, so `null` becomes `Some(None)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarString).map(Some)
}

struct ScalarString;

impl<'de> Visitor<'de> for ScalarString {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

impl UserPayload {
    /// Builds the document to insert; `null` fields are left out.
    pub fn into_new_user(self) -> User {
        User {
            id: None,
            name: self.name.flatten(),
            email: self.email.flatten(),
        }
    }

    /// Builds the update modifications: values go to `$set`, `null`s to
    /// `$unset`. Returns `None` when the payload changes nothing.
    pub fn to_update(&self) -> Option<Document> {
        let mut set = Document::new();
        let mut unset = Document::new();

        for (field, value) in [("name", &self.name), ("email", &self.email)] {
            match value {
                Some(Some(value)) => {
                    set.insert(field, value.as_str());
                }
                Some(None) => {
                    unset.insert(field, "");
                }
                None => {}
            }
        }

        let mut update = Document::new();
        if !set.is_empty() {
            update.insert("$set", set);
        }
        if !unset.is_empty() {
            update.insert("$unset", unset);
        }

        (!update.is_empty()).then_some(update)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            message: "User deleted",
        }
    }
}
