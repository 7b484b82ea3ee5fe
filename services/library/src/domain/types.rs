use chrono::{DateTime, Utc};

use athenaeum_domain::lending::{LoanStatus, ReservationStatus};
use athenaeum_domain::user::UserRole;

// ── Catalog ──────────────────────────────────────────────────────────────────

/// A catalog title with its copy counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub available_copies: i32,
    pub total_copies: i32,
}

/// Book fields without an id; used for add and full-replacement update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub description: String,
    pub available_copies: i32,
    pub total_copies: i32,
}

impl NewBook {
    /// `0 <= available_copies <= total_copies`.
    pub fn copies_consistent(&self) -> bool {
        self.available_copies >= 0 && self.available_copies <= self.total_copies
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub biography: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub biography: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

/// Filters supported by the book search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookQuery {
    /// Case-insensitive substring of the title.
    Title(String),
    /// Inclusive range over `available_copies`.
    AvailableCopies { min: i32, max: i32 },
    /// Case-insensitive substring of an author's first or last name.
    AuthorName(String),
    /// Case-insensitive substring of a category name.
    CategoryName(String),
}

// ── Accounts ─────────────────────────────────────────────────────────────────

/// A library account. `password_hash` is an argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub user_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub user_id: i32,
}

// ── Lending ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub id: i32,
    pub status: LoanStatus,
    pub loan_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub user_id: i32,
    pub book_id: i32,
}

impl Loan {
    /// Active and past its return date at `now`.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.status == LoanStatus::Active && self.return_date < now
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoan {
    pub status: LoanStatus,
    pub loan_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub user_id: i32,
    pub book_id: i32,
}

/// Result of the atomic copy-decrement + loan insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Loaned(Loan),
    BookMissing,
    NoCopies,
}

/// Result of the atomic loan return + copy increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// Transitioned to `RETURNED`. `capped` is set when the counter was already at
    /// `total_copies` and was left alone.
    Returned { book_id: i32, capped: bool },
    AlreadyReturned,
    LoanMissing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub reservation_time: DateTime<Utc>,
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub user_id: i32,
    pub book_id: i32,
    pub reservation_time: DateTime<Utc>,
    pub status: ReservationStatus,
}

// ── Reviews ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub comment: String,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub user_id: i32,
    pub book_id: i32,
    pub comment: String,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}
