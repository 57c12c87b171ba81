pub mod admin;
pub mod auth;
pub mod books;
pub mod health;
pub mod todos;
pub mod users;

use crate::auth::AuthMiddleware;
use crate::validation;
use actix_web::web;

/// Registers every endpoint and the extractor configuration.
///
/// Expects `web::Data<DbPool>`, `web::Data<Authenticator>` and
/// `web::Data<BookCatalog>` to be registered on the `App`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .app_data(validation::query_config())
        .app_data(validation::form_config())
        .service(health::health)
        .service(
            web::scope("/auth")
                .service(auth::create_user)
                .service(auth::login),
        )
        .service(
            web::scope("/todos")
                .wrap(AuthMiddleware)
                .service(todos::read_all)
                .service(todos::create_todo)
                .service(todos::read_todo)
                .service(todos::update_todo)
                .service(todos::delete_todo),
        )
        .service(
            web::scope("/admin")
                .wrap(AuthMiddleware)
                .service(admin::read_all)
                .service(admin::delete_todo),
        )
        .service(
            web::scope("/user")
                .wrap(AuthMiddleware)
                .service(users::get_user)
                .service(users::change_password),
        )
        .service(books::read_all_books)
        .service(books::read_books_by_rating)
        .service(books::read_books_by_published_date)
        .service(books::update_book)
        .service(books::read_book)
        .service(books::delete_book)
        .service(books::create_book);
}
