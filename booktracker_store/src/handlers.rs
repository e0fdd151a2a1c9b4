use std::sync::Arc;

use actix_web::http::header::LOCATION;
use actix_web::web::Data;
use actix_web::Error;
use actix_web::HttpResponse;
use paperclip::actix::{
    api_v2_operation,
    web::{self},
};

use crate::api::{BookId, NewBook, StatusUpdate};
use crate::books_repository::{BookRepository, BookRepositoryError};

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn list_books(
    books_repository: Data<Arc<dyn BookRepository>>,
) -> Result<HttpResponse, Error> {
    Ok(match books_repository.list_books().await {
        Ok(books) => HttpResponse::Ok().json(books),
        Err(err) => {
            tracing::error!("List books failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn add_book(
    books_repository: Data<Arc<dyn BookRepository>>,
    new_book: web::Json<NewBook>,
) -> Result<HttpResponse, Error> {
    let new_book = new_book.into_inner();
    if let Err(err) = new_book.validate() {
        tracing::info!("Rejected book {}", err);
        return Ok(HttpResponse::BadRequest().json(err.to_string()));
    }

    Ok(match books_repository.add_book(new_book).await {
        Ok(book) => HttpResponse::Created()
            .append_header((LOCATION, format!("/api/books/{}", book.id)))
            .json(book),
        Err(err) => {
            tracing::error!("Add book failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn get_book(
    books_repository: Data<Arc<dyn BookRepository>>,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    Ok(match books_repository.get_book(book_id.into_inner()).await {
        Ok(book) => HttpResponse::Ok().json(book),
        Err(err @ BookRepositoryError::NotFound(_)) => {
            HttpResponse::NotFound().json(err.to_string())
        }
        Err(err) => {
            tracing::error!("Get book failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn delete_book(
    books_repository: Data<Arc<dyn BookRepository>>,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    Ok(
        match books_repository.delete_book(book_id.into_inner()).await {
            Ok(()) => HttpResponse::NoContent().finish(),
            Err(err @ BookRepositoryError::NotFound(_)) => {
                HttpResponse::NotFound().json(err.to_string())
            }
            Err(err) => {
                tracing::error!("Delete book failed {}", err);
                HttpResponse::InternalServerError().finish()
            }
        },
    )
}

#[api_v2_operation]
pub async fn update_book_status(
    books_repository: Data<Arc<dyn BookRepository>>,
    book_id: web::Path<BookId>,
    update: web::Json<StatusUpdate>,
) -> Result<HttpResponse, Error> {
    Ok(
        match books_repository
            .update_status(book_id.into_inner(), update.into_inner().status)
            .await
        {
            Ok(book) => HttpResponse::Ok().json(book),
            Err(err @ BookRepositoryError::NotFound(_)) => {
                HttpResponse::NotFound().json(err.to_string())
            }
            Err(err) => {
                tracing::error!("Update book status failed {}", err);
                HttpResponse::InternalServerError().finish()
            }
        },
    )
}

#[cfg(test)]
mod handler_tests {
    use std::sync::Arc;

    use actix_web::http::header::LOCATION;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use paperclip::actix::{web, OpenApiExt};
    use serde_json::json;

    use crate::api::{Book, BookStatus};
    use crate::app_config::config_app;
    use crate::books_repository::{BookRepository, InMemoryBookRepository};

    macro_rules! init_app {
        () => {{
            let books_repository: Arc<dyn BookRepository> =
                Arc::new(InMemoryBookRepository::default());
            test::init_service(
                App::new()
                    .wrap_api()
                    .app_data(web::Data::new(books_repository))
                    .configure(config_app)
                    .build(),
            )
            .await
        }};
    }

    macro_rules! create_book {
        ($app:expr, $body:expr) => {{
            let request = test::TestRequest::post()
                .uri("/api/books")
                .set_json($body)
                .to_request();
            let response = test::call_service(&$app, request).await;
            assert_eq!(response.status(), StatusCode::CREATED);
            let book: Book = test::read_body_json(response).await;
            book
        }};
    }

    #[actix_web::test]
    async fn test_health() {
        let app = init_app!();
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    /// Creating Dune returns 201, a location header and the stored record
    async fn test_create_book() {
        let app = init_app!();

        let request = test::TestRequest::post()
            .uri("/api/books")
            .set_json(json!({"title": "Dune", "author": "Herbert", "category": "Sci-Fi"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let location = response
            .headers()
            .get(LOCATION)
            .expect("No location header")
            .to_str()
            .expect("Invalid location header")
            .to_string();

        let book: Book = test::read_body_json(response).await;
        assert_eq!(location, format!("/api/books/{}", book.id));
        assert_eq!(book.status, BookStatus::ToRead);
        assert_eq!(book.cover_image_url, None);
        assert!(book.created_at <= chrono::Utc::now());
    }

    #[actix_web::test]
    /// Blank required fields are rejected before reaching the repository
    async fn test_create_book_with_blank_field_is_rejected() {
        let app = init_app!();

        let request = test::TestRequest::post()
            .uri("/api/books")
            .set_json(json!({"title": "Dune", "author": "  ", "category": "Sci-Fi"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message: String = test::read_body_json(response).await;
        assert_eq!(message, "Field author must not be empty");

        let request = test::TestRequest::post()
            .uri("/api/books")
            .set_json(json!({"title": "Dune", "category": "Sci-Fi"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let request = test::TestRequest::get().uri("/api/books").to_request();
        let books: Vec<Book> = test::call_and_read_body_json(&app, request).await;
        assert!(books.is_empty());
    }

    #[actix_web::test]
    /// Listing returns the most recently created book first
    async fn test_list_books_newest_first() {
        let app = init_app!();

        let older = create_book!(
            app,
            json!({"title": "Emma", "author": "Austen", "category": "Classics"})
        );
        let newer = create_book!(
            app,
            json!({"title": "Dune", "author": "Herbert", "category": "Sci-Fi", "status": "Read"})
        );

        let request = test::TestRequest::get().uri("/api/books").to_request();
        let books: Vec<Book> = test::call_and_read_body_json(&app, request).await;
        assert_eq!(books, vec![newer, older]);
    }

    #[actix_web::test]
    /// Marking a book as read changes only its status
    async fn test_update_status() {
        let app = init_app!();
        let book = create_book!(
            app,
            json!({"title": "Dune", "author": "Herbert", "category": "Sci-Fi"})
        );

        let request = test::TestRequest::put()
            .uri(&format!("/api/books/{}/status", book.id))
            .set_json(json!({"status": "Read"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Book = test::read_body_json(response).await;
        assert_eq!(
            updated,
            Book {
                status: BookStatus::Read,
                ..book.clone()
            }
        );

        let request = test::TestRequest::get().uri("/api/books").to_request();
        let books: Vec<Book> = test::call_and_read_body_json(&app, request).await;
        assert_eq!(books, vec![updated]);

        let request = test::TestRequest::put()
            .uri("/api/books/4242/status")
            .set_json(json!({"status": "Read"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    /// Deleting removes the book, deleting it again is not found
    async fn test_delete_book() {
        let app = init_app!();
        let book = create_book!(
            app,
            json!({"title": "Dune", "author": "Herbert", "category": "Sci-Fi"})
        );

        let request = test::TestRequest::delete()
            .uri(&format!("/api/books/{}", book.id))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let body = test::read_body(response).await;
        assert!(body.is_empty());

        let request = test::TestRequest::get().uri("/api/books").to_request();
        let books: Vec<Book> = test::call_and_read_body_json(&app, request).await;
        assert!(books.iter().all(|listed| listed.id != book.id));

        let request = test::TestRequest::get()
            .uri(&format!("/api/books/{}", book.id))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let request = test::TestRequest::delete()
            .uri(&format!("/api/books/{}", book.id))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
