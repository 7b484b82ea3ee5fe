//! sea-orm entities for the library database.

pub mod authors;
pub mod book_authors;
pub mod book_categories;
pub mod books;
pub mod categories;
pub mod loans;
pub mod reservations;
pub mod reviews;
pub mod user_profiles;
pub mod users;
