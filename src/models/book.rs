use serde::{Deserialize, Serialize};
use validator::Validate;

/// An entry of the in-memory book catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub rating: i32,
    pub published_date: i32,
}

impl Book {
    pub fn new(
        id: i64,
        title: &str,
        author: &str,
        description: &str,
        rating: i32,
        published_date: i32,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            rating,
            published_date,
        }
    }
}

/// Payload for creating or replacing a book.
///
/// `id` is ignored on creation; on update it selects the book to replace.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 3))]
    pub title: String,
    #[validate(length(min = 1))]
    pub author: String,
    #[validate(length(min = 1, max = 100))]
    pub description: String,
    #[validate(range(min = 0, max = 5))]
    pub rating: i32,
    #[validate(range(min = 2000, max = 2030))]
    pub published_date: i32,
}

impl BookRequest {
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            description: self.description,
            rating: self.rating,
            published_date: self.published_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RatingQuery {
    #[validate(range(min = 0, max = 5))]
    pub book_rating: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PublishedDateQuery {
    #[validate(range(min = 2000, max = 2030))]
    pub published_date: i32,
}
