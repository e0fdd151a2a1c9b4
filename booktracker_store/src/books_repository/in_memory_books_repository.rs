use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use chrono::Utc;

use crate::api::{Book, BookId, BookStatus, NewBook};
use crate::books_repository::{BookRepository, BookRepositoryError};

pub struct InMemoryBookRepository {
    book_sequence_generator: AtomicI32,
    books: parking_lot::RwLock<HashMap<BookId, Book>>,
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self {
            book_sequence_generator: AtomicI32::new(1),
            books: Default::default(),
        }
    }
}

#[async_trait::async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn add_book(&self, new_book: NewBook) -> Result<Book, BookRepositoryError> {
        let id = self.book_sequence_generator.fetch_add(1, Ordering::Relaxed);
        let book = Book {
            id,
            title: new_book.title,
            author: new_book.author,
            cover_image_url: new_book.cover_image_url,
            category: new_book.category,
            status: new_book.status.unwrap_or_default(),
            created_at: Utc::now(),
        };
        self.books.write().insert(id, book.clone());
        Ok(book)
    }

    async fn list_books(&self) -> Result<Vec<Book>, BookRepositoryError> {
        let mut books: Vec<Book> = self.books.read().values().cloned().collect();
        books.sort_by_key(|book| Reverse((book.created_at, book.id)));
        Ok(books)
    }

    async fn get_book(&self, book_id: BookId) -> Result<Book, BookRepositoryError> {
        self.books
            .read()
            .get(&book_id)
            .cloned()
            .ok_or(BookRepositoryError::NotFound(book_id))
    }

    async fn delete_book(&self, book_id: BookId) -> Result<(), BookRepositoryError> {
        self.books
            .write()
            .remove(&book_id)
            .map(|_| ())
            .ok_or(BookRepositoryError::NotFound(book_id))
    }

    async fn update_status(
        &self,
        book_id: BookId,
        status: BookStatus,
    ) -> Result<Book, BookRepositoryError> {
        let mut locked_books = self.books.write();
        let book = locked_books
            .get_mut(&book_id)
            .ok_or(BookRepositoryError::NotFound(book_id))?;
        book.status = status;
        Ok(book.clone())
    }
}
