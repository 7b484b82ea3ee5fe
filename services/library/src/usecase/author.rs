use tracing::info;

use crate::domain::repository::AuthorRepository;
use crate::domain::types::{Author, NewAuthor};
use crate::error::LibraryServiceError;

// ── AddAuthor ────────────────────────────────────────────────────────────────

pub struct AddAuthorUseCase<R: AuthorRepository> {
    pub repo: R,
}

impl<R: AuthorRepository> AddAuthorUseCase<R> {
    pub async fn execute(&self, input: NewAuthor) -> Result<Author, LibraryServiceError> {
        let author = self.repo.create(&input).await?;
        info!(author_id = author.id, "author added");
        Ok(author)
    }
}

// ── GetAuthor ────────────────────────────────────────────────────────────────

pub struct GetAuthorUseCase<R: AuthorRepository> {
    pub repo: R,
}

impl<R: AuthorRepository> GetAuthorUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Author, LibraryServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(LibraryServiceError::AuthorNotFound)
    }
}

// ── ListAuthors ──────────────────────────────────────────────────────────────

pub struct ListAuthorsUseCase<R: AuthorRepository> {
    pub repo: R,
}

impl<R: AuthorRepository> ListAuthorsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Author>, LibraryServiceError> {
        self.repo.list().await
    }
}

// ── UpdateAuthor ─────────────────────────────────────────────────────────────

pub struct UpdateAuthorUseCase<R: AuthorRepository> {
    pub repo: R,
}

impl<R: AuthorRepository> UpdateAuthorUseCase<R> {
    pub async fn execute(&self, id: i32, input: NewAuthor) -> Result<Author, LibraryServiceError> {
        if !self.repo.update(id, &input).await? {
            return Err(LibraryServiceError::AuthorNotFound);
        }
        info!(author_id = id, "author updated");
        Ok(Author {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            biography: input.biography,
        })
    }
}

// ── DeleteAuthor ─────────────────────────────────────────────────────────────

pub struct DeleteAuthorUseCase<R: AuthorRepository> {
    pub repo: R,
}

impl<R: AuthorRepository> DeleteAuthorUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), LibraryServiceError> {
        if !self.repo.delete(id).await? {
            return Err(LibraryServiceError::AuthorNotFound);
        }
        info!(author_id = id, "author deleted");
        Ok(())
    }
}
