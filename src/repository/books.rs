use log::debug;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{Book, BookRequest};
use crate::validation::Valid;

/// In-memory book catalog shared by all workers.
///
/// Nothing is persisted; each process starts from [`BookCatalog::seeded`].
pub struct BookCatalog {
    books: RwLock<Vec<Book>>,
}

fn not_found() -> AppError {
    AppError::NotFound("Item not found".into())
}

impl BookCatalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    pub fn seeded() -> Self {
        Self::new(vec![
            Book::new(1, "Computer Science Pro", "Amit Singh", "Nice book", 5, 2010),
            Book::new(2, "Math with fun", "Pratham Sr", "Nice book and concise points", 4, 2009),
            Book::new(3, "Web dev unleashed", "Alex Johnson", "Good book", 4, 2009),
            Book::new(4, "AI and ML terrors", "Emily White", "Average book", 3, 2000),
            Book::new(5, "Maths for coders", "David Brown", "Not recommended", 1, 2000),
            Book::new(6, "Creative writing techniques", "Ankit Singh", "Overall Nice book", 2, 2009),
        ])
    }

    pub async fn all(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    pub async fn get(&self, id: i64) -> Result<Book, AppError> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    pub async fn by_rating(&self, rating: i32) -> Vec<Book> {
        self.filter(|book| book.rating == rating).await
    }

    pub async fn by_published_date(&self, year: i32) -> Vec<Book> {
        self.filter(|book| book.published_date == year).await
    }

    async fn filter<F>(&self, predicate: F) -> Vec<Book>
    where
        F: Fn(&Book) -> bool,
    {
        self.books
            .read()
            .await
            .iter()
            .filter(|book| predicate(book))
            .cloned()
            .collect()
    }

    /// Appends a book with id one greater than the last entry (1 when empty).
    pub async fn create(&self, request: Valid<BookRequest>) -> Book {
        let mut books = self.books.write().await;
        let id = books.last().map_or(1, |last| last.id + 1);
        let book = request.into_inner().into_book(id);
        books.push(book.clone());
        debug!("Catalog added book {}", id);
        book
    }

    /// Replaces the book whose id matches `request.id`.
    pub async fn update(&self, request: Valid<BookRequest>) -> Result<(), AppError> {
        let id = request.id.ok_or_else(not_found)?;
        let mut books = self.books.write().await;
        let slot = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(not_found)?;
        *slot = request.into_inner().into_book(id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(not_found)?;
        books.remove(index);
        Ok(())
    }
}
