use anyhow::Context;
use tokio_postgres::{Client, NoTls, Row, Statement};

use crate::api::{Book, BookId, BookStatus, NewBook};
use crate::books_repository::{BookRepository, BookRepositoryError};
use crate::migrations::run_migrations;

const BOOK_COLUMNS: &str = "id, title, author, cover_image_url, category, status, created_at";

pub struct PostgresBooksRepository {
    client: Client,
}

pub struct PostgresBooksRepositoryConfig {
    pub connection_string: String,
}

impl PostgresBooksRepository {
    pub async fn init(config: PostgresBooksRepositoryConfig) -> anyhow::Result<Self> {
        let (mut client, connection) =
            tokio_postgres::connect(&config.connection_string, NoTls)
                .await
                .context("Failed to start postgres")?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("Postgres connection error: {}", e);
            }
        });

        let applied = run_migrations(&mut client)
            .await
            .context("Failed to migrate schema")?;
        tracing::info!(?applied, "Postgres books repository ready");

        Ok(Self { client })
    }
}

fn book_from_row(row: &Row) -> Result<Book, tokio_postgres::Error> {
    let status: String = row.try_get("status")?;
    Ok(Book {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        cover_image_url: row.try_get("cover_image_url")?,
        category: row.try_get("category")?,
        status: BookStatus::from(status),
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait::async_trait]
impl BookRepository for PostgresBooksRepository {
    async fn add_book(&self, new_book: NewBook) -> Result<Book, BookRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!(
                "INSERT INTO books (title, author, cover_image_url, category, status) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING {BOOK_COLUMNS}"
            ))
            .await?;

        let status: String = new_book.status.unwrap_or_default().into();
        let rows = self
            .client
            .query(
                &stmt,
                &[
                    &new_book.title,
                    &new_book.author,
                    &new_book.cover_image_url,
                    &new_book.category,
                    &status,
                ],
            )
            .await?;

        let row = rows
            .first()
            .ok_or_else(|| BookRepositoryError::Other("Book not returned".to_string()))?;
        Ok(book_from_row(row)?)
    }

    async fn list_books(&self) -> Result<Vec<Book>, BookRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!(
                "SELECT {BOOK_COLUMNS} FROM books ORDER BY created_at DESC, id DESC"
            ))
            .await?;

        let rows = self.client.query(&stmt, &[]).await?;

        rows.iter()
            .map(|row| book_from_row(row).map_err(BookRepositoryError::from))
            .collect()
    }

    async fn get_book(&self, book_id: BookId) -> Result<Book, BookRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ($1)"))
            .await?;

        let rows = self.client.query(&stmt, &[&book_id]).await?;

        let row = rows
            .first()
            .ok_or(BookRepositoryError::NotFound(book_id))?;
        Ok(book_from_row(row)?)
    }

    async fn delete_book(&self, book_id: BookId) -> Result<(), BookRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("DELETE FROM books WHERE id = ($1)")
            .await?;

        match self.client.execute(&stmt, &[&book_id]).await? {
            0 => Err(BookRepositoryError::NotFound(book_id)),
            _ => Ok(()),
        }
    }

    async fn update_status(
        &self,
        book_id: BookId,
        status: BookStatus,
    ) -> Result<Book, BookRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!(
                "UPDATE books SET status = ($1) WHERE id = ($2) RETURNING {BOOK_COLUMNS}"
            ))
            .await?;

        let status: String = status.into();
        let rows = self.client.query(&stmt, &[&status, &book_id]).await?;

        let row = rows
            .first()
            .ok_or(BookRepositoryError::NotFound(book_id))?;
        Ok(book_from_row(row)?)
    }
}
