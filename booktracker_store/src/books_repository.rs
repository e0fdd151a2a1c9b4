pub use in_memory_books_repository::InMemoryBookRepository;
pub use postgres_books_repository::{PostgresBooksRepository, PostgresBooksRepositoryConfig};

use crate::api::{Book, BookId, BookStatus, NewBook};

mod in_memory_books_repository;
mod postgres_books_repository;

#[derive(thiserror::Error, Debug)]
pub enum BookRepositoryError {
    #[error("Book {0} not found")]
    NotFound(BookId),

    #[error("DatabaseFailure failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Other error {0}")]
    Other(String),
}

#[async_trait::async_trait]
pub trait BookRepository: Send + Sync {
    /// Adds book to repository, returns the stored record with its assigned id and creation time
    async fn add_book(&self, new_book: NewBook) -> Result<Book, BookRepositoryError>;
    /// Lists all books in the repository, most recently created first
    async fn list_books(&self) -> Result<Vec<Book>, BookRepositoryError>;
    /// Retrieves a single book from repository
    async fn get_book(&self, book_id: BookId) -> Result<Book, BookRepositoryError>;
    /// Removes the book permanently
    async fn delete_book(&self, book_id: BookId) -> Result<(), BookRepositoryError>;
    /// Overwrites status of the book, returns the updated record
    async fn update_status(
        &self,
        book_id: BookId,
        status: BookStatus,
    ) -> Result<Book, BookRepositoryError>;
}
