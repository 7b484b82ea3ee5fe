use tracing::info;

use athenaeum_domain::id::BookAuthorKey;

use crate::domain::repository::{AuthorRepository, BookAuthorRepository, BookRepository};
use crate::error::LibraryServiceError;
use crate::usecase::resolve_book;

// ── AddBookAuthor ────────────────────────────────────────────────────────────

/// Link a book to an author. Linking an already-linked pair succeeds without change.
pub struct AddBookAuthorUseCase<B, A, L>
where
    B: BookRepository,
    A: AuthorRepository,
    L: BookAuthorRepository,
{
    pub books: B,
    pub authors: A,
    pub links: L,
}

impl<B, A, L> AddBookAuthorUseCase<B, A, L>
where
    B: BookRepository,
    A: AuthorRepository,
    L: BookAuthorRepository,
{
    pub async fn execute(&self, key: BookAuthorKey) -> Result<BookAuthorKey, LibraryServiceError> {
        resolve_book(&self.books, key.book_id).await?;
        if self.authors.find_by_id(key.author_id).await?.is_none() {
            return Err(LibraryServiceError::AuthorNotFound);
        }
        self.links.insert_if_absent(key).await?;
        info!(%key, "book author linked");
        Ok(key)
    }
}

// ── GetBookAuthor ────────────────────────────────────────────────────────────

pub struct GetBookAuthorUseCase<L: BookAuthorRepository> {
    pub links: L,
}

impl<L: BookAuthorRepository> GetBookAuthorUseCase<L> {
    pub async fn execute(&self, key: BookAuthorKey) -> Result<BookAuthorKey, LibraryServiceError> {
        if !self.links.exists(key).await? {
            return Err(LibraryServiceError::BookAuthorNotFound);
        }
        Ok(key)
    }
}

// ── ListBookAuthors ──────────────────────────────────────────────────────────

pub struct ListBookAuthorsUseCase<L: BookAuthorRepository> {
    pub links: L,
}

impl<L: BookAuthorRepository> ListBookAuthorsUseCase<L> {
    pub async fn execute(&self) -> Result<Vec<BookAuthorKey>, LibraryServiceError> {
        self.links.list().await
    }
}

// ── DeleteBookAuthor ─────────────────────────────────────────────────────────

pub struct DeleteBookAuthorUseCase<L: BookAuthorRepository> {
    pub links: L,
}

impl<L: BookAuthorRepository> DeleteBookAuthorUseCase<L> {
    pub async fn execute(&self, key: BookAuthorKey) -> Result<(), LibraryServiceError> {
        if !self.links.delete(key).await? {
            return Err(LibraryServiceError::BookAuthorNotFound);
        }
        info!(%key, "book author unlinked");
        Ok(())
    }
}
