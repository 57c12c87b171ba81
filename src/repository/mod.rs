//! Typed data access.
//!
//! Each repository borrows the pool for the duration of a request and returns
//! typed results; a missing row is always an explicit `None` or
//! `AppError::NotFound`, never an unchecked query.

pub mod books;
pub mod todos;
pub mod users;

pub use books::BookCatalog;
pub use todos::TodoRepository;
pub use users::UserRepository;
