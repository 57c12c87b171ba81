pub mod book;
pub mod todo;
pub mod user;

pub use book::{Book, BookRequest, PublishedDateQuery, RatingQuery};
pub use todo::{Todo, TodoRequest};
pub use user::{CreateUserRequest, LoginForm, NewUser, PasswordChange, Role, User};
