use crate::domain::repository::{BookRepository, UserRepository};
use crate::domain::types::{Book, User};
use crate::error::LibraryServiceError;

pub mod auth;
pub mod author;
pub mod book;
pub mod book_author;
pub mod book_category;
pub mod category;
pub mod loan;
pub mod reservation;
pub mod review;
pub mod user;
pub mod user_profile;

#[cfg(test)]
pub(crate) mod mock;

/// Look up a referenced user before mutating anything that points at it.
pub(crate) async fn resolve_user<U: UserRepository>(
    users: &U,
    user_id: i32,
) -> Result<User, LibraryServiceError> {
    users
        .find_by_id(user_id)
        .await?
        .ok_or(LibraryServiceError::UserNotFound)
}

/// Look up a referenced book before mutating anything that points at it.
pub(crate) async fn resolve_book<B: BookRepository>(
    books: &B,
    book_id: i32,
) -> Result<Book, LibraryServiceError> {
    books
        .find_by_id(book_id)
        .await?
        .ok_or(LibraryServiceError::BookNotFound)
}
