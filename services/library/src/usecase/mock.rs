//! In-memory implementation of every repository port, shared by use-case unit tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use athenaeum_domain::id::{BookAuthorKey, BookCategoryKey};
use athenaeum_domain::lending::LoanStatus;

use crate::domain::repository::{
    AuthorRepository, BookAuthorRepository, BookCategoryRepository, BookRepository,
    CategoryRepository, LendingPort, LoanRepository, ReservationRepository, ReviewRepository,
    UserProfileRepository, UserRepository,
};
use crate::domain::types::{
    Author, Book, BookQuery, Category, CheckInOutcome, CheckoutOutcome, Loan, NewAuthor, NewBook,
    NewCategory, NewLoan, NewReservation, NewReview, NewUser, NewUserProfile, Reservation, Review,
    User, UserProfile,
};
use crate::error::LibraryServiceError;

#[derive(Default)]
pub struct Store {
    next_id: i32,
    pub books: BTreeMap<i32, Book>,
    pub authors: BTreeMap<i32, Author>,
    pub categories: BTreeMap<i32, Category>,
    pub book_authors: BTreeSet<(i32, i32)>,
    pub book_categories: BTreeSet<(i32, i32)>,
    pub users: BTreeMap<i32, User>,
    pub profiles: BTreeMap<i32, UserProfile>,
    pub loans: BTreeMap<i32, Loan>,
    pub reservations: BTreeMap<i32, Reservation>,
    pub reviews: BTreeMap<i32, Review>,
}

impl Store {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn book_referenced(&self, id: i32) -> bool {
        self.loans.values().any(|l| l.book_id == id)
            || self.reservations.values().any(|r| r.book_id == id)
            || self.reviews.values().any(|r| r.book_id == id)
    }

    fn user_referenced(&self, id: i32) -> bool {
        self.profiles.values().any(|p| p.user_id == id)
            || self.loans.values().any(|l| l.user_id == id)
            || self.reservations.values().any(|r| r.user_id == id)
            || self.reviews.values().any(|r| r.user_id == id)
    }

    fn user_collides(&self, user: &NewUser, except: Option<i32>) -> bool {
        self.users.values().any(|u| {
            Some(u.id) != except && (u.username == user.username || u.email == user.email)
        })
    }
}

/// Cloneable handle; clones share the same store.
#[derive(Clone, Default)]
pub struct InMemoryLibrary {
    pub store: Arc<Mutex<Store>>,
}

impl InMemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        f(&mut self.store.lock().unwrap())
    }

    pub fn seed_book(&self, title: &str, available: i32, total: i32) -> Book {
        self.with(|s| {
            let id = s.next_id();
            let book = Book {
                id,
                title: title.to_owned(),
                description: format!("{title} description"),
                available_copies: available,
                total_copies: total,
            };
            s.books.insert(id, book.clone());
            book
        })
    }

    pub fn seed_author(&self, first_name: &str, last_name: &str) -> Author {
        self.with(|s| {
            let id = s.next_id();
            let author = Author {
                id,
                first_name: first_name.to_owned(),
                last_name: last_name.to_owned(),
                biography: String::new(),
            };
            s.authors.insert(id, author.clone());
            author
        })
    }

    pub fn seed_category(&self, name: &str) -> Category {
        self.with(|s| {
            let id = s.next_id();
            let category = Category {
                id,
                name: name.to_owned(),
                description: format!("{name} books"),
            };
            s.categories.insert(id, category.clone());
            category
        })
    }

    pub fn seed_user(&self, username: &str) -> User {
        self.with(|s| {
            let id = s.next_id();
            let user = User {
                id,
                username: username.to_owned(),
                email: format!("{username}@example.com"),
                password_hash: "not-a-hash".to_owned(),
                role: athenaeum_domain::user::UserRole::User,
            };
            s.users.insert(id, user.clone());
            user
        })
    }

    pub fn seed_loan(&self, loan: NewLoan) -> Loan {
        self.with(|s| {
            let id = s.next_id();
            let loan = loan_from(id, &loan);
            s.loans.insert(id, loan.clone());
            loan
        })
    }

    pub fn book(&self, id: i32) -> Option<Book> {
        self.with(|s| s.books.get(&id).cloned())
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn loan_from(id: i32, loan: &NewLoan) -> Loan {
    Loan {
        id,
        status: loan.status,
        loan_date: loan.loan_date,
        return_date: loan.return_date,
        user_id: loan.user_id,
        book_id: loan.book_id,
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

impl BookRepository for InMemoryLibrary {
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, LibraryServiceError> {
        Ok(self.book(id))
    }

    async fn list(&self) -> Result<Vec<Book>, LibraryServiceError> {
        Ok(self.with(|s| s.books.values().cloned().collect()))
    }

    async fn search(&self, query: &BookQuery) -> Result<Vec<Book>, LibraryServiceError> {
        Ok(self.with(|s| {
            s.books
                .values()
                .filter(|b| match query {
                    BookQuery::Title(part) => contains_ci(&b.title, part),
                    BookQuery::AvailableCopies { min, max } => {
                        (*min..=*max).contains(&b.available_copies)
                    }
                    BookQuery::AuthorName(part) => s
                        .book_authors
                        .iter()
                        .filter(|(book_id, _)| *book_id == b.id)
                        .filter_map(|(_, author_id)| s.authors.get(author_id))
                        .any(|a| {
                            contains_ci(&a.first_name, part) || contains_ci(&a.last_name, part)
                        }),
                    BookQuery::CategoryName(part) => s
                        .book_categories
                        .iter()
                        .filter(|(book_id, _)| *book_id == b.id)
                        .filter_map(|(_, category_id)| s.categories.get(category_id))
                        .any(|c| contains_ci(&c.name, part)),
                })
                .cloned()
                .collect()
        }))
    }

    async fn create(&self, book: &NewBook) -> Result<Book, LibraryServiceError> {
        Ok(self.with(|s| {
            let id = s.next_id();
            let created = Book {
                id,
                title: book.title.clone(),
                description: book.description.clone(),
                available_copies: book.available_copies,
                total_copies: book.total_copies,
            };
            s.books.insert(id, created.clone());
            created
        }))
    }

    async fn update(&self, id: i32, book: &NewBook) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| match s.books.get_mut(&id) {
            Some(existing) => {
                existing.title = book.title.clone();
                existing.description = book.description.clone();
                existing.available_copies = book.available_copies;
                existing.total_copies = book.total_copies;
                true
            }
            None => false,
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        self.with(|s| {
            if !s.books.contains_key(&id) {
                return Ok(false);
            }
            if s.book_referenced(id) {
                return Err(LibraryServiceError::BookInUse);
            }
            s.book_authors.retain(|(book_id, _)| *book_id != id);
            s.book_categories.retain(|(book_id, _)| *book_id != id);
            s.books.remove(&id);
            Ok(true)
        })
    }
}

impl AuthorRepository for InMemoryLibrary {
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, LibraryServiceError> {
        Ok(self.with(|s| s.authors.get(&id).cloned()))
    }

    async fn list(&self) -> Result<Vec<Author>, LibraryServiceError> {
        Ok(self.with(|s| s.authors.values().cloned().collect()))
    }

    async fn create(&self, author: &NewAuthor) -> Result<Author, LibraryServiceError> {
        Ok(self.with(|s| {
            let id = s.next_id();
            let created = Author {
                id,
                first_name: author.first_name.clone(),
                last_name: author.last_name.clone(),
                biography: author.biography.clone(),
            };
            s.authors.insert(id, created.clone());
            created
        }))
    }

    async fn update(&self, id: i32, author: &NewAuthor) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| match s.authors.get_mut(&id) {
            Some(existing) => {
                existing.first_name = author.first_name.clone();
                existing.last_name = author.last_name.clone();
                existing.biography = author.biography.clone();
                true
            }
            None => false,
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| {
            s.book_authors.retain(|(_, author_id)| *author_id != id);
            s.authors.remove(&id).is_some()
        }))
    }
}

impl CategoryRepository for InMemoryLibrary {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, LibraryServiceError> {
        Ok(self.with(|s| s.categories.get(&id).cloned()))
    }

    async fn list(&self) -> Result<Vec<Category>, LibraryServiceError> {
        Ok(self.with(|s| s.categories.values().cloned().collect()))
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, LibraryServiceError> {
        Ok(self.with(|s| {
            let id = s.next_id();
            let created = Category {
                id,
                name: category.name.clone(),
                description: category.description.clone(),
            };
            s.categories.insert(id, created.clone());
            created
        }))
    }

    async fn update(
        &self,
        id: i32,
        category: &NewCategory,
    ) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| match s.categories.get_mut(&id) {
            Some(existing) => {
                existing.name = category.name.clone();
                existing.description = category.description.clone();
                true
            }
            None => false,
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| {
            s.book_categories.retain(|(_, category_id)| *category_id != id);
            s.categories.remove(&id).is_some()
        }))
    }
}

impl BookAuthorRepository for InMemoryLibrary {
    async fn exists(&self, key: BookAuthorKey) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| s.book_authors.contains(&(key.book_id, key.author_id))))
    }

    async fn list(&self) -> Result<Vec<BookAuthorKey>, LibraryServiceError> {
        Ok(self.with(|s| {
            s.book_authors
                .iter()
                .map(|&(book_id, author_id)| BookAuthorKey::new(book_id, author_id))
                .collect()
        }))
    }

    async fn insert_if_absent(&self, key: BookAuthorKey) -> Result<(), LibraryServiceError> {
        self.with(|s| s.book_authors.insert((key.book_id, key.author_id)));
        Ok(())
    }

    async fn delete(&self, key: BookAuthorKey) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| s.book_authors.remove(&(key.book_id, key.author_id))))
    }
}

impl BookCategoryRepository for InMemoryLibrary {
    async fn exists(&self, key: BookCategoryKey) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| s.book_categories.contains(&(key.book_id, key.category_id))))
    }

    async fn list(&self) -> Result<Vec<BookCategoryKey>, LibraryServiceError> {
        Ok(self.with(|s| {
            s.book_categories
                .iter()
                .map(|&(book_id, category_id)| BookCategoryKey::new(book_id, category_id))
                .collect()
        }))
    }

    async fn insert_if_absent(&self, key: BookCategoryKey) -> Result<(), LibraryServiceError> {
        self.with(|s| s.book_categories.insert((key.book_id, key.category_id)));
        Ok(())
    }

    async fn delete(&self, key: BookCategoryKey) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| s.book_categories.remove(&(key.book_id, key.category_id))))
    }
}

// ── Accounts ─────────────────────────────────────────────────────────────────

impl UserRepository for InMemoryLibrary {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, LibraryServiceError> {
        Ok(self.with(|s| s.users.get(&id).cloned()))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, LibraryServiceError> {
        Ok(self.with(|s| s.users.values().find(|u| u.username == username).cloned()))
    }

    async fn list(&self) -> Result<Vec<User>, LibraryServiceError> {
        Ok(self.with(|s| s.users.values().cloned().collect()))
    }

    async fn create(&self, user: &NewUser) -> Result<User, LibraryServiceError> {
        self.with(|s| {
            if s.user_collides(user, None) {
                return Err(LibraryServiceError::UserAlreadyExists);
            }
            let id = s.next_id();
            let created = User {
                id,
                username: user.username.clone(),
                email: user.email.clone(),
                password_hash: user.password_hash.clone(),
                role: user.role,
            };
            s.users.insert(id, created.clone());
            Ok(created)
        })
    }

    async fn update(&self, id: i32, user: &NewUser) -> Result<bool, LibraryServiceError> {
        self.with(|s| {
            if !s.users.contains_key(&id) {
                return Ok(false);
            }
            if s.user_collides(user, Some(id)) {
                return Err(LibraryServiceError::UserAlreadyExists);
            }
            if let Some(existing) = s.users.get_mut(&id) {
                existing.username = user.username.clone();
                existing.email = user.email.clone();
                existing.password_hash = user.password_hash.clone();
                existing.role = user.role;
            }
            Ok(true)
        })
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        self.with(|s| {
            if !s.users.contains_key(&id) {
                return Ok(false);
            }
            if s.user_referenced(id) {
                return Err(LibraryServiceError::UserInUse);
            }
            s.users.remove(&id);
            Ok(true)
        })
    }
}

impl UserProfileRepository for InMemoryLibrary {
    async fn find_by_id(&self, id: i32) -> Result<Option<UserProfile>, LibraryServiceError> {
        Ok(self.with(|s| s.profiles.get(&id).cloned()))
    }

    async fn list(&self) -> Result<Vec<UserProfile>, LibraryServiceError> {
        Ok(self.with(|s| s.profiles.values().cloned().collect()))
    }

    async fn create(&self, profile: &NewUserProfile) -> Result<UserProfile, LibraryServiceError> {
        Ok(self.with(|s| {
            let id = s.next_id();
            let created = UserProfile {
                id,
                first_name: profile.first_name.clone(),
                last_name: profile.last_name.clone(),
                phone: profile.phone.clone(),
                address: profile.address.clone(),
                user_id: profile.user_id,
            };
            s.profiles.insert(id, created.clone());
            created
        }))
    }

    async fn update(
        &self,
        id: i32,
        profile: &NewUserProfile,
    ) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| match s.profiles.get_mut(&id) {
            Some(existing) => {
                existing.first_name = profile.first_name.clone();
                existing.last_name = profile.last_name.clone();
                existing.phone = profile.phone.clone();
                existing.address = profile.address.clone();
                existing.user_id = profile.user_id;
                true
            }
            None => false,
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| s.profiles.remove(&id).is_some()))
    }
}

// ── Lending ──────────────────────────────────────────────────────────────────

impl LoanRepository for InMemoryLibrary {
    async fn find_by_id(&self, id: i32) -> Result<Option<Loan>, LibraryServiceError> {
        Ok(self.with(|s| s.loans.get(&id).cloned()))
    }

    async fn list(&self) -> Result<Vec<Loan>, LibraryServiceError> {
        Ok(self.with(|s| s.loans.values().cloned().collect()))
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Loan>, LibraryServiceError> {
        Ok(self.with(|s| {
            s.loans
                .values()
                .filter(|l| l.user_id == user_id)
                .cloned()
                .collect()
        }))
    }

    async fn list_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Loan>, LibraryServiceError> {
        Ok(self.with(|s| {
            s.loans
                .values()
                .filter(|l| l.is_overdue_at(now))
                .cloned()
                .collect()
        }))
    }

    async fn create(&self, loan: &NewLoan) -> Result<Loan, LibraryServiceError> {
        Ok(self.seed_loan(loan.clone()))
    }

    async fn update(&self, id: i32, loan: &NewLoan) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| match s.loans.get_mut(&id) {
            Some(existing) => {
                *existing = loan_from(id, loan);
                true
            }
            None => false,
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| s.loans.remove(&id).is_some()))
    }
}

impl LendingPort for InMemoryLibrary {
    async fn checkout(
        &self,
        user_id: i32,
        book_id: i32,
        loan_date: DateTime<Utc>,
        return_date: DateTime<Utc>,
    ) -> Result<CheckoutOutcome, LibraryServiceError> {
        Ok(self.with(|s| {
            let Some(book) = s.books.get_mut(&book_id) else {
                return CheckoutOutcome::BookMissing;
            };
            if book.available_copies <= 0 {
                return CheckoutOutcome::NoCopies;
            }
            book.available_copies -= 1;
            let id = s.next_id();
            let loan = Loan {
                id,
                status: LoanStatus::Active,
                loan_date,
                return_date,
                user_id,
                book_id,
            };
            s.loans.insert(id, loan.clone());
            CheckoutOutcome::Loaned(loan)
        }))
    }

    async fn check_in(&self, loan_id: i32) -> Result<CheckInOutcome, LibraryServiceError> {
        Ok(self.with(|s| {
            let Some(loan) = s.loans.get_mut(&loan_id) else {
                return CheckInOutcome::LoanMissing;
            };
            if loan.status == LoanStatus::Returned {
                return CheckInOutcome::AlreadyReturned;
            }
            loan.status = LoanStatus::Returned;
            let book_id = loan.book_id;
            let capped = match s.books.get_mut(&book_id) {
                Some(book) if book.available_copies < book.total_copies => {
                    book.available_copies += 1;
                    false
                }
                _ => true,
            };
            CheckInOutcome::Returned { book_id, capped }
        }))
    }
}

impl ReservationRepository for InMemoryLibrary {
    async fn find_by_id(&self, id: i32) -> Result<Option<Reservation>, LibraryServiceError> {
        Ok(self.with(|s| s.reservations.get(&id).cloned()))
    }

    async fn list(&self) -> Result<Vec<Reservation>, LibraryServiceError> {
        Ok(self.with(|s| s.reservations.values().cloned().collect()))
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Reservation>, LibraryServiceError> {
        Ok(self.with(|s| {
            s.reservations
                .values()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect()
        }))
    }

    async fn create(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, LibraryServiceError> {
        Ok(self.with(|s| {
            let id = s.next_id();
            let created = Reservation {
                id,
                user_id: reservation.user_id,
                book_id: reservation.book_id,
                reservation_time: reservation.reservation_time,
                status: reservation.status,
            };
            s.reservations.insert(id, created.clone());
            created
        }))
    }

    async fn update(
        &self,
        id: i32,
        reservation: &NewReservation,
    ) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| match s.reservations.get_mut(&id) {
            Some(existing) => {
                existing.user_id = reservation.user_id;
                existing.book_id = reservation.book_id;
                existing.reservation_time = reservation.reservation_time;
                existing.status = reservation.status;
                true
            }
            None => false,
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| s.reservations.remove(&id).is_some()))
    }
}

// ── Reviews ──────────────────────────────────────────────────────────────────

impl ReviewRepository for InMemoryLibrary {
    async fn find_by_id(&self, id: i32) -> Result<Option<Review>, LibraryServiceError> {
        Ok(self.with(|s| s.reviews.get(&id).cloned()))
    }

    async fn list(&self) -> Result<Vec<Review>, LibraryServiceError> {
        Ok(self.with(|s| s.reviews.values().cloned().collect()))
    }

    async fn list_by_book(&self, book_id: i32) -> Result<Vec<Review>, LibraryServiceError> {
        Ok(self.with(|s| {
            s.reviews
                .values()
                .filter(|r| r.book_id == book_id)
                .cloned()
                .collect()
        }))
    }

    async fn create(&self, review: &NewReview) -> Result<Review, LibraryServiceError> {
        Ok(self.with(|s| {
            let id = s.next_id();
            let created = Review {
                id,
                user_id: review.user_id,
                book_id: review.book_id,
                comment: review.comment.clone(),
                rating: review.rating,
                created_at: review.created_at,
            };
            s.reviews.insert(id, created.clone());
            created
        }))
    }

    async fn update(&self, id: i32, review: &NewReview) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| match s.reviews.get_mut(&id) {
            Some(existing) => {
                existing.user_id = review.user_id;
                existing.book_id = review.book_id;
                existing.comment = review.comment.clone();
                existing.rating = review.rating;
                existing.created_at = review.created_at;
                true
            }
            None => false,
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        Ok(self.with(|s| s.reviews.remove(&id).is_some()))
    }
}
