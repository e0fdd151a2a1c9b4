use booktracker_store::api::{BookStatus, NewBook};

pub const ALREADY_READ_CHOICE: &str = "already_read_choice";

#[derive(thiserror::Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum FormError {
    #[error("Title, author and category are required.")]
    MissingRequiredField,

    #[error("Select a status.")]
    MissingStatus,
}

/// Status radio group of the add-book form
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StatusChoice {
    AlreadyRead,
    WantToRead,
}

impl StatusChoice {
    pub fn from_radio_value(value: &str) -> Self {
        if value == ALREADY_READ_CHOICE {
            StatusChoice::AlreadyRead
        } else {
            StatusChoice::WantToRead
        }
    }

    pub fn status(&self) -> BookStatus {
        match self {
            StatusChoice::AlreadyRead => BookStatus::Read,
            StatusChoice::WantToRead => BookStatus::ToRead,
        }
    }
}

/// Raw inputs of the add-book form
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub category: String,
    pub status_choice: Option<StatusChoice>,
}

impl BookForm {
    pub fn into_new_book(self) -> Result<NewBook, FormError> {
        let title = self.title.trim();
        let author = self.author.trim();
        let category = self.category.trim();
        if title.is_empty() || author.is_empty() || category.is_empty() {
            return Err(FormError::MissingRequiredField);
        }
        let status_choice = self.status_choice.ok_or(FormError::MissingStatus)?;
        let cover_image = self.cover_image.trim();

        Ok(NewBook {
            title: title.to_string(),
            author: author.to_string(),
            cover_image_url: (!cover_image.is_empty()).then(|| cover_image.to_string()),
            category: category.to_string(),
            status: Some(status_choice.status()),
        })
    }
}
