use tracing::info;

use athenaeum_domain::id::BookCategoryKey;

use crate::domain::repository::{BookCategoryRepository, BookRepository, CategoryRepository};
use crate::error::LibraryServiceError;
use crate::usecase::resolve_book;

// ── AddBookCategory ──────────────────────────────────────────────────────────

/// Link a book to a category. Linking an already-linked pair succeeds without change.
pub struct AddBookCategoryUseCase<B, C, L>
where
    B: BookRepository,
    C: CategoryRepository,
    L: BookCategoryRepository,
{
    pub books: B,
    pub categories: C,
    pub links: L,
}

impl<B, C, L> AddBookCategoryUseCase<B, C, L>
where
    B: BookRepository,
    C: CategoryRepository,
    L: BookCategoryRepository,
{
    pub async fn execute(
        &self,
        key: BookCategoryKey,
    ) -> Result<BookCategoryKey, LibraryServiceError> {
        resolve_book(&self.books, key.book_id).await?;
        if self.categories.find_by_id(key.category_id).await?.is_none() {
            return Err(LibraryServiceError::CategoryNotFound);
        }
        self.links.insert_if_absent(key).await?;
        info!(%key, "book category linked");
        Ok(key)
    }
}

// ── GetBookCategory ──────────────────────────────────────────────────────────

pub struct GetBookCategoryUseCase<L: BookCategoryRepository> {
    pub links: L,
}

impl<L: BookCategoryRepository> GetBookCategoryUseCase<L> {
    pub async fn execute(
        &self,
        key: BookCategoryKey,
    ) -> Result<BookCategoryKey, LibraryServiceError> {
        if !self.links.exists(key).await? {
            return Err(LibraryServiceError::BookCategoryNotFound);
        }
        Ok(key)
    }
}

// ── ListBookCategories ───────────────────────────────────────────────────────

pub struct ListBookCategoriesUseCase<L: BookCategoryRepository> {
    pub links: L,
}

impl<L: BookCategoryRepository> ListBookCategoriesUseCase<L> {
    pub async fn execute(&self) -> Result<Vec<BookCategoryKey>, LibraryServiceError> {
        self.links.list().await
    }
}

// ── DeleteBookCategory ───────────────────────────────────────────────────────

pub struct DeleteBookCategoryUseCase<L: BookCategoryRepository> {
    pub links: L,
}

impl<L: BookCategoryRepository> DeleteBookCategoryUseCase<L> {
    pub async fn execute(&self, key: BookCategoryKey) -> Result<(), LibraryServiceError> {
        if !self.links.delete(key).await? {
            return Err(LibraryServiceError::BookCategoryNotFound);
        }
        info!(%key, "book category unlinked");
        Ok(())
    }
}
