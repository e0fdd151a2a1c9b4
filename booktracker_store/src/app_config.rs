use actix_cors::Cors;
use paperclip::actix::web;

use crate::handlers;

pub fn config_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(
            web::scope("/api/books")
                .service(
                    web::resource("")
                        .route(web::get().to(handlers::list_books))
                        .route(web::post().to(handlers::add_book)),
                )
                .service(
                    web::scope("/{book_id}")
                        .service(
                            web::resource("")
                                .route(web::get().to(handlers::get_book))
                                .route(web::delete().to(handlers::delete_book)),
                        )
                        .service(
                            web::resource("/status")
                                .route(web::put().to(handlers::update_book_status)),
                        ),
                ),
        );
}

/// Cross-origin policy of the service: every origin, method and header is accepted
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
}
