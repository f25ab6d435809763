//! Record definitions
//!
//! Each record has a wire form (request/response JSON) and a document
//! form (what the store holds). The only structural difference is the
//! primary key, which is stored as `_id`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A user as sent and returned over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    #[serde(default)]
    #[validate(email(message = "a valid email is required"))]
    pub email: String,

    /// Accepted on insert, never returned
    #[serde(default, skip_serializing)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "surname is required"))]
    pub surname: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
}

/// Stored form of [`User`], keyed by email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub email: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
}

impl From<User> for UserDocument {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            password: user.password,
            name: user.name,
            surname: user.surname,
            age: user.age,
        }
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            email: doc.email,
            password: doc.password,
            name: doc.name,
            surname: doc.surname,
            age: doc.age,
        }
    }
}

/// A calendar entry as sent and returned over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CalendarDate {
    /// Generated on insert when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    #[serde(rename = "type", default)]
    #[validate(length(min = 1, message = "type is required"))]
    pub kind: String,

    #[serde(default)]
    #[validate(range(min = 1, message = "year is required"))]
    pub year: u16,

    #[serde(default)]
    #[validate(range(min = 1, max = 12, message = "month must be between 1 and 12"))]
    pub month: u8,

    #[serde(default)]
    #[validate(range(min = 1, max = 31, message = "day must be between 1 and 31"))]
    pub day: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 23, message = "hours must be between 0 and 23"))]
    pub hours: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 59, message = "minutes must be between 0 and 59"))]
    pub minutes: Option<u8>,
}

impl CalendarDate {
    /// Convert to the stored form, assigning a fresh id if needed
    pub fn into_document(self) -> CalendarDocument {
        CalendarDocument {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            labels: self.labels,
            kind: self.kind,
            year: self.year,
            month: self.month,
            day: self.day,
            hours: self.hours,
            minutes: self.minutes,
        }
    }
}

/// Stored form of [`CalendarDate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u8>,
}

impl From<CalendarDocument> for CalendarDate {
    fn from(doc: CalendarDocument) -> Self {
        Self {
            id: Some(doc.id),
            labels: doc.labels,
            kind: doc.kind,
            year: doc.year,
            month: doc.month,
            day: doc.day,
            hours: doc.hours,
            minutes: doc.minutes,
        }
    }
}
