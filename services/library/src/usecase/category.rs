use tracing::info;

use crate::domain::repository::CategoryRepository;
use crate::domain::types::{Category, NewCategory};
use crate::error::LibraryServiceError;

// ── AddCategory ──────────────────────────────────────────────────────────────

pub struct AddCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> AddCategoryUseCase<R> {
    pub async fn execute(&self, input: NewCategory) -> Result<Category, LibraryServiceError> {
        let category = self.repo.create(&input).await?;
        info!(category_id = category.id, "category added");
        Ok(category)
    }
}

// ── GetCategory ──────────────────────────────────────────────────────────────

pub struct GetCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> GetCategoryUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Category, LibraryServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(LibraryServiceError::CategoryNotFound)
    }
}

// ── ListCategories ───────────────────────────────────────────────────────────

pub struct ListCategoriesUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> ListCategoriesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Category>, LibraryServiceError> {
        self.repo.list().await
    }
}

// ── UpdateCategory ───────────────────────────────────────────────────────────

pub struct UpdateCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> UpdateCategoryUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        input: NewCategory,
    ) -> Result<Category, LibraryServiceError> {
        if !self.repo.update(id, &input).await? {
            return Err(LibraryServiceError::CategoryNotFound);
        }
        info!(category_id = id, "category updated");
        Ok(Category {
            id,
            name: input.name,
            description: input.description,
        })
    }
}

// ── DeleteCategory ───────────────────────────────────────────────────────────

pub struct DeleteCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> DeleteCategoryUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), LibraryServiceError> {
        if !self.repo.delete(id).await? {
            return Err(LibraryServiceError::CategoryNotFound);
        }
        info!(category_id = id, "category deleted");
        Ok(())
    }
}
