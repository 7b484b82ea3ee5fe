#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use athenaeum_domain::id::{BookAuthorKey, BookCategoryKey};

use crate::domain::types::{
    Author, Book, BookQuery, Category, CheckInOutcome, CheckoutOutcome, Loan, NewAuthor, NewBook,
    NewCategory, NewLoan, NewReservation, NewReview, NewUser, NewUserProfile, Reservation, Review,
    User, UserProfile,
};
use crate::error::LibraryServiceError;

// `update` and `delete` return `true` when a row was affected.

// ── Catalog ──────────────────────────────────────────────────────────────────

pub trait BookRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, LibraryServiceError>;
    async fn list(&self) -> Result<Vec<Book>, LibraryServiceError>;
    async fn search(&self, query: &BookQuery) -> Result<Vec<Book>, LibraryServiceError>;
    async fn create(&self, book: &NewBook) -> Result<Book, LibraryServiceError>;
    async fn update(&self, id: i32, book: &NewBook) -> Result<bool, LibraryServiceError>;
    /// Removes the book and its join records. Fails with `BookInUse` while loans,
    /// reservations or reviews still reference it.
    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError>;
}

pub trait AuthorRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, LibraryServiceError>;
    async fn list(&self) -> Result<Vec<Author>, LibraryServiceError>;
    async fn create(&self, author: &NewAuthor) -> Result<Author, LibraryServiceError>;
    async fn update(&self, id: i32, author: &NewAuthor) -> Result<bool, LibraryServiceError>;
    /// Removes the author and its book links.
    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError>;
}

pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, LibraryServiceError>;
    async fn list(&self) -> Result<Vec<Category>, LibraryServiceError>;
    async fn create(&self, category: &NewCategory) -> Result<Category, LibraryServiceError>;
    async fn update(&self, id: i32, category: &NewCategory)
    -> Result<bool, LibraryServiceError>;
    /// Removes the category and its book links.
    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError>;
}

pub trait BookAuthorRepository: Send + Sync {
    async fn exists(&self, key: BookAuthorKey) -> Result<bool, LibraryServiceError>;
    async fn list(&self) -> Result<Vec<BookAuthorKey>, LibraryServiceError>;
    /// Insert the link; an existing link is left untouched.
    async fn insert_if_absent(&self, key: BookAuthorKey) -> Result<(), LibraryServiceError>;
    async fn delete(&self, key: BookAuthorKey) -> Result<bool, LibraryServiceError>;
}

pub trait BookCategoryRepository: Send + Sync {
    async fn exists(&self, key: BookCategoryKey) -> Result<bool, LibraryServiceError>;
    async fn list(&self) -> Result<Vec<BookCategoryKey>, LibraryServiceError>;
    /// Insert the link; an existing link is left untouched.
    async fn insert_if_absent(&self, key: BookCategoryKey) -> Result<(), LibraryServiceError>;
    async fn delete(&self, key: BookCategoryKey) -> Result<bool, LibraryServiceError>;
}

// ── Accounts ─────────────────────────────────────────────────────────────────

pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, LibraryServiceError>;
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, LibraryServiceError>;
    async fn list(&self) -> Result<Vec<User>, LibraryServiceError>;
    /// Fails with `UserAlreadyExists` on a username or email collision.
    async fn create(&self, user: &NewUser) -> Result<User, LibraryServiceError>;
    /// Fails with `UserAlreadyExists` on a username or email collision.
    async fn update(&self, id: i32, user: &NewUser) -> Result<bool, LibraryServiceError>;
    /// Fails with `UserInUse` while other records reference the user.
    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError>;
}

pub trait UserProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<UserProfile>, LibraryServiceError>;
    async fn list(&self) -> Result<Vec<UserProfile>, LibraryServiceError>;
    async fn create(&self, profile: &NewUserProfile) -> Result<UserProfile, LibraryServiceError>;
    async fn update(&self, id: i32, profile: &NewUserProfile)
    -> Result<bool, LibraryServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError>;
}

// ── Lending ──────────────────────────────────────────────────────────────────

/// Plain loan records. Never touches copy counters.
pub trait LoanRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Loan>, LibraryServiceError>;
    async fn list(&self) -> Result<Vec<Loan>, LibraryServiceError>;
    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Loan>, LibraryServiceError>;
    /// `ACTIVE` loans whose return date is before `now`.
    async fn list_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Loan>, LibraryServiceError>;
    async fn create(&self, loan: &NewLoan) -> Result<Loan, LibraryServiceError>;
    async fn update(&self, id: i32, loan: &NewLoan) -> Result<bool, LibraryServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError>;
}

/// Loan transitions that move `Book.available_copies`. Each call is one transaction.
pub trait LendingPort: Send + Sync {
    /// Decrement the book's available copies if any remain and insert an `ACTIVE` loan.
    async fn checkout(
        &self,
        user_id: i32,
        book_id: i32,
        loan_date: DateTime<Utc>,
        return_date: DateTime<Utc>,
    ) -> Result<CheckoutOutcome, LibraryServiceError>;

    /// Move the loan to `RETURNED` and give the copy back, capped at `total_copies`.
    async fn check_in(&self, loan_id: i32) -> Result<CheckInOutcome, LibraryServiceError>;
}

pub trait ReservationRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Reservation>, LibraryServiceError>;
    async fn list(&self) -> Result<Vec<Reservation>, LibraryServiceError>;
    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Reservation>, LibraryServiceError>;
    async fn create(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, LibraryServiceError>;
    async fn update(
        &self,
        id: i32,
        reservation: &NewReservation,
    ) -> Result<bool, LibraryServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError>;
}

// ── Reviews ──────────────────────────────────────────────────────────────────

pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Review>, LibraryServiceError>;
    async fn list(&self) -> Result<Vec<Review>, LibraryServiceError>;
    async fn list_by_book(&self, book_id: i32) -> Result<Vec<Review>, LibraryServiceError>;
    async fn create(&self, review: &NewReview) -> Result<Review, LibraryServiceError>;
    async fn update(&self, id: i32, review: &NewReview) -> Result<bool, LibraryServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError>;
}
