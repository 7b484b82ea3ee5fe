use tracing::info;

use crate::domain::repository::{BookRepository, ReviewRepository, UserRepository};
use crate::domain::types::{NewReview, Review};
use crate::error::LibraryServiceError;
use crate::usecase::{resolve_book, resolve_user};

// ── AddReview ────────────────────────────────────────────────────────────────

pub struct AddReviewUseCase<U: UserRepository, B: BookRepository, R: ReviewRepository> {
    pub users: U,
    pub books: B,
    pub reviews: R,
}

impl<U, B, R> AddReviewUseCase<U, B, R>
where
    U: UserRepository,
    B: BookRepository,
    R: ReviewRepository,
{
    pub async fn execute(&self, input: NewReview) -> Result<Review, LibraryServiceError> {
        resolve_user(&self.users, input.user_id).await?;
        resolve_book(&self.books, input.book_id).await?;
        let review = self.reviews.create(&input).await?;
        info!(
            review_id = review.id,
            book_id = review.book_id,
            rating = review.rating,
            "review added"
        );
        Ok(review)
    }
}

// ── GetReview ────────────────────────────────────────────────────────────────

pub struct GetReviewUseCase<R: ReviewRepository> {
    pub reviews: R,
}

impl<R: ReviewRepository> GetReviewUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Review, LibraryServiceError> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or(LibraryServiceError::ReviewNotFound)
    }
}

// ── ListReviews ──────────────────────────────────────────────────────────────

pub struct ListReviewsUseCase<R: ReviewRepository> {
    pub reviews: R,
}

impl<R: ReviewRepository> ListReviewsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Review>, LibraryServiceError> {
        self.reviews.list().await
    }
}

// ── ListReviewsByBook ────────────────────────────────────────────────────────

pub struct ListReviewsByBookUseCase<R: ReviewRepository> {
    pub reviews: R,
}

impl<R: ReviewRepository> ListReviewsByBookUseCase<R> {
    pub async fn execute(&self, book_id: i32) -> Result<Vec<Review>, LibraryServiceError> {
        self.reviews.list_by_book(book_id).await
    }
}

// ── UpdateReview ─────────────────────────────────────────────────────────────

pub struct UpdateReviewUseCase<U: UserRepository, B: BookRepository, R: ReviewRepository> {
    pub users: U,
    pub books: B,
    pub reviews: R,
}

impl<U, B, R> UpdateReviewUseCase<U, B, R>
where
    U: UserRepository,
    B: BookRepository,
    R: ReviewRepository,
{
    pub async fn execute(&self, id: i32, input: NewReview) -> Result<Review, LibraryServiceError> {
        resolve_user(&self.users, input.user_id).await?;
        resolve_book(&self.books, input.book_id).await?;
        if !self.reviews.update(id, &input).await? {
            return Err(LibraryServiceError::ReviewNotFound);
        }
        info!(review_id = id, "review updated");
        Ok(Review {
            id,
            user_id: input.user_id,
            book_id: input.book_id,
            comment: input.comment,
            rating: input.rating,
            created_at: input.created_at,
        })
    }
}

// ── DeleteReview ─────────────────────────────────────────────────────────────

pub struct DeleteReviewUseCase<R: ReviewRepository> {
    pub reviews: R,
}

impl<R: ReviewRepository> DeleteReviewUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), LibraryServiceError> {
        if !self.reviews.delete(id).await? {
            return Err(LibraryServiceError::ReviewNotFound);
        }
        info!(review_id = id, "review deleted");
        Ok(())
    }
}
