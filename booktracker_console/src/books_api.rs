use anyhow::bail;

use booktracker_store::api::{Book, BookId, BookStatus, NewBook};
use booktracker_store::client::BookTrackerStoreClient;

/// Requests the console makes to the book store.
/// Any failure, not-found included, is reported as an error.
#[async_trait::async_trait]
pub trait BooksApi: Send + Sync {
    async fn fetch_books(&self) -> anyhow::Result<Vec<Book>>;

    async fn add_book(&self, new_book: &NewBook) -> anyhow::Result<Book>;

    async fn delete_book(&self, book_id: BookId) -> anyhow::Result<()>;

    async fn update_status(&self, book_id: BookId, status: BookStatus) -> anyhow::Result<Book>;
}

#[async_trait::async_trait]
impl BooksApi for BookTrackerStoreClient {
    async fn fetch_books(&self) -> anyhow::Result<Vec<Book>> {
        self.list_books().await
    }

    async fn add_book(&self, new_book: &NewBook) -> anyhow::Result<Book> {
        BookTrackerStoreClient::add_book(self, new_book).await
    }

    async fn delete_book(&self, book_id: BookId) -> anyhow::Result<()> {
        if !BookTrackerStoreClient::delete_book(self, book_id).await? {
            bail!("Book {} not found", book_id)
        }
        Ok(())
    }

    async fn update_status(&self, book_id: BookId, status: BookStatus) -> anyhow::Result<Book> {
        match BookTrackerStoreClient::update_status(self, book_id, status).await? {
            Some(book) => Ok(book),
            None => bail!("Book {} not found", book_id),
        }
    }
}
