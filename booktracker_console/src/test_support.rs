use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use anyhow::bail;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use booktracker_store::api::{Book, BookId, BookStatus, NewBook};

use crate::alerts::Alerts;
use crate::books_api::BooksApi;

pub fn book(id: BookId, category: &str, status: BookStatus) -> Book {
    Book {
        id,
        title: format!("Title {}", id),
        author: format!("Author {}", id),
        cover_image_url: None,
        category: category.to_string(),
        status,
        created_at: base_time() + Duration::seconds(i64::from(id)),
    }
}

fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
}

/// Store stand-in keeping books in memory and recording every request
#[derive(Default)]
pub struct FakeBooksApi {
    books: Mutex<Vec<Book>>,
    next_id: AtomicI32,
    failing: AtomicBool,
    requests: Mutex<Vec<String>>,
}

impl FakeBooksApi {
    pub fn with_books(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|book| book.id).max().unwrap_or_default() + 1;
        Self {
            books: Mutex::new(books),
            next_id: AtomicI32::new(next_id),
            ..Self::default()
        }
    }

    /// Makes every following request fail as if the server answered with an error
    pub fn fail_requests(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    fn record(&self, request: String) -> anyhow::Result<()> {
        self.requests.lock().push(request);
        if self.failing.load(Ordering::SeqCst) {
            bail!("Request failed")
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl BooksApi for FakeBooksApi {
    async fn fetch_books(&self) -> anyhow::Result<Vec<Book>> {
        self.record("GET /api/books".to_string())?;
        let mut books = self.books.lock().clone();
        books.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(books)
    }

    async fn add_book(&self, new_book: &NewBook) -> anyhow::Result<Book> {
        self.record("POST /api/books".to_string())?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let book = Book {
            id,
            title: new_book.title.clone(),
            author: new_book.author.clone(),
            cover_image_url: new_book.cover_image_url.clone(),
            category: new_book.category.clone(),
            status: new_book.status.clone().unwrap_or_default(),
            created_at: Utc::now(),
        };
        self.books.lock().push(book.clone());
        Ok(book)
    }

    async fn delete_book(&self, book_id: BookId) -> anyhow::Result<()> {
        self.record(format!("DELETE /api/books/{}", book_id))?;
        let mut books = self.books.lock();
        let before = books.len();
        books.retain(|book| book.id != book_id);
        if books.len() == before {
            bail!("Book {} not found", book_id)
        }
        Ok(())
    }

    async fn update_status(&self, book_id: BookId, status: BookStatus) -> anyhow::Result<Book> {
        self.record(format!("PUT /api/books/{}/status {}", book_id, status))?;
        let mut books = self.books.lock();
        match books.iter_mut().find(|book| book.id == book_id) {
            Some(book) => {
                book.status = status;
                Ok(book.clone())
            }
            None => bail!("Book {} not found", book_id),
        }
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    messages: Mutex<Vec<String>>,
}

impl RecordingAlerts {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Alerts for RecordingAlerts {
    fn alert(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
