//! Demo catalog endpoints over the in-memory `BookCatalog`. No authentication.

use crate::{
    error::AppError,
    models::{BookRequest, PublishedDateQuery, RatingQuery},
    repository::BookCatalog,
    validation::{ResourceId, ValidatedJson, ValidatedPath, ValidatedQuery},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

#[get("/books")]
pub async fn read_all_books(catalog: web::Data<BookCatalog>) -> impl Responder {
    HttpResponse::Ok().json(catalog.all().await)
}

#[get("/books/{id}")]
pub async fn read_book(
    catalog: web::Data<BookCatalog>,
    path: ValidatedPath<ResourceId>,
) -> Result<impl Responder, AppError> {
    let book = catalog.get(path.0.id).await?;
    Ok(HttpResponse::Ok().json(book))
}

/// `GET /books/?book_rating=N`, with N in 0..=5.
#[get("/books/")]
pub async fn read_books_by_rating(
    catalog: web::Data<BookCatalog>,
    query: ValidatedQuery<RatingQuery>,
) -> impl Responder {
    HttpResponse::Ok().json(catalog.by_rating(query.0.book_rating).await)
}

/// `GET /books/publish/?published_date=YYYY`, with the year in 2000..=2030.
#[get("/books/publish/")]
pub async fn read_books_by_published_date(
    catalog: web::Data<BookCatalog>,
    query: ValidatedQuery<PublishedDateQuery>,
) -> impl Responder {
    HttpResponse::Ok().json(catalog.by_published_date(query.0.published_date).await)
}

#[post("/create-book")]
pub async fn create_book(
    catalog: web::Data<BookCatalog>,
    body: ValidatedJson<BookRequest>,
) -> impl Responder {
    HttpResponse::Created().json(catalog.create(body.0).await)
}

#[put("/books/update_book")]
pub async fn update_book(
    catalog: web::Data<BookCatalog>,
    body: ValidatedJson<BookRequest>,
) -> Result<impl Responder, AppError> {
    catalog.update(body.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/books/{id}")]
pub async fn delete_book(
    catalog: web::Data<BookCatalog>,
    path: ValidatedPath<ResourceId>,
) -> Result<impl Responder, AppError> {
    catalog.delete(path.0.id).await?;
    Ok(HttpResponse::NoContent().finish())
}
