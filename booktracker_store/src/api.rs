use std::fmt;

use chrono::{DateTime, Utc};
use paperclip::actix::Apiv2Schema;
use paperclip::v2::models::{DataType, DefaultSchemaRaw};
use serde::{Deserialize, Serialize};

pub type BookId = i32;

#[derive(Debug, Default, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(from = "String", into = "String")]
/// Read-state of a book. Unrecognized values are kept as they were sent.
pub enum BookStatus {
    #[default]
    ToRead,
    Read,
    Other(String),
}

impl BookStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookStatus::ToRead => "ToRead",
            BookStatus::Read => "Read",
            BookStatus::Other(value) => value,
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self, BookStatus::Read)
    }
}

impl From<String> for BookStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ToRead" => BookStatus::ToRead,
            "Read" => BookStatus::Read,
            _ => BookStatus::Other(value),
        }
    }
}

impl From<&str> for BookStatus {
    fn from(value: &str) -> Self {
        BookStatus::from(value.to_string())
    }
}

impl From<BookStatus> for String {
    fn from(status: BookStatus) -> Self {
        match status {
            BookStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl paperclip::v2::schema::Apiv2Schema for BookStatus {
    fn raw_schema() -> DefaultSchemaRaw {
        DefaultSchemaRaw {
            data_type: Some(DataType::String),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
/// A tracked book as stored by the service
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    pub category: String,
    pub status: BookStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
/// Body of a create request. Id and creation time are always assigned by the service.
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookStatus>,
}

#[derive(thiserror::Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum BookValidationError {
    #[error("Field {0} must not be empty")]
    MissingField(&'static str),
}

impl NewBook {
    /// Checks that every required field carries some non-whitespace text
    pub fn validate(&self) -> Result<(), BookValidationError> {
        [
            ("title", &self.title),
            ("author", &self.author),
            ("category", &self.category),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map_or(Ok(()), |(field, _)| {
            Err(BookValidationError::MissingField(field))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Body of a status update request
pub struct StatusUpdate {
    pub status: BookStatus,
}
