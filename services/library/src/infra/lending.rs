use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait, sea_query::Expr,
};

use athenaeum_domain::lending::{LoanStatus, ReservationStatus};
use athenaeum_library_schema::{books, loans, reservations, reviews};

use crate::domain::repository::{
    LendingPort, LoanRepository, ReservationRepository, ReviewRepository,
};
use crate::domain::types::{
    CheckInOutcome, CheckoutOutcome, Loan, NewLoan, NewReservation, NewReview, Reservation,
    Review,
};
use crate::error::LibraryServiceError;

// ── Loan repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLoanRepository {
    pub db: DatabaseConnection,
}

impl LoanRepository for DbLoanRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Loan>, LibraryServiceError> {
        let model = loans::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find loan by id")?;
        model.map(loan_from_model).transpose()
    }

    async fn list(&self) -> Result<Vec<Loan>, LibraryServiceError> {
        loans::Entity::find()
            .order_by_asc(loans::Column::Id)
            .all(&self.db)
            .await
            .context("list loans")?
            .into_iter()
            .map(loan_from_model)
            .collect()
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Loan>, LibraryServiceError> {
        loans::Entity::find()
            .filter(loans::Column::UserId.eq(user_id))
            .order_by_asc(loans::Column::Id)
            .all(&self.db)
            .await
            .context("list loans by user")?
            .into_iter()
            .map(loan_from_model)
            .collect()
    }

    async fn list_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Loan>, LibraryServiceError> {
        loans::Entity::find()
            .filter(loans::Column::Status.eq(LoanStatus::Active.as_str()))
            .filter(loans::Column::ReturnDate.lt(now))
            .order_by_asc(loans::Column::ReturnDate)
            .order_by_asc(loans::Column::Id)
            .all(&self.db)
            .await
            .context("list overdue loans")?
            .into_iter()
            .map(loan_from_model)
            .collect()
    }

    async fn create(&self, loan: &NewLoan) -> Result<Loan, LibraryServiceError> {
        let model = loans::ActiveModel {
            status: Set(loan.status.as_str().to_owned()),
            loan_date: Set(loan.loan_date),
            return_date: Set(loan.return_date),
            user_id: Set(loan.user_id),
            book_id: Set(loan.book_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create loan")?;
        loan_from_model(model)
    }

    async fn update(&self, id: i32, loan: &NewLoan) -> Result<bool, LibraryServiceError> {
        let result = loans::Entity::update_many()
            .set(loans::ActiveModel {
                status: Set(loan.status.as_str().to_owned()),
                loan_date: Set(loan.loan_date),
                return_date: Set(loan.return_date),
                user_id: Set(loan.user_id),
                book_id: Set(loan.book_id),
                ..Default::default()
            })
            .filter(loans::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update loan")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        let result = loans::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete loan")?;
        Ok(result.rows_affected > 0)
    }
}

fn loan_from_model(model: loans::Model) -> Result<Loan, LibraryServiceError> {
    let status = model
        .status
        .parse::<LoanStatus>()
        .with_context(|| format!("loan {} status", model.id))?;
    Ok(Loan {
        id: model.id,
        status,
        loan_date: model.loan_date,
        return_date: model.return_date,
        user_id: model.user_id,
        book_id: model.book_id,
    })
}

// ── Lending port ─────────────────────────────────────────────────────────────

/// Counter and loan writes share one transaction. The counter only moves through
/// conditional `UPDATE`s, so concurrent checkouts of the last copy serialize on
/// the book row and at most one of them matches.
#[derive(Clone)]
pub struct DbLendingPort {
    pub db: DatabaseConnection,
}

impl LendingPort for DbLendingPort {
    async fn checkout(
        &self,
        user_id: i32,
        book_id: i32,
        loan_date: DateTime<Utc>,
        return_date: DateTime<Utc>,
    ) -> Result<CheckoutOutcome, LibraryServiceError> {
        let outcome = self
            .db
            .transaction::<_, CheckoutOutcome, DbErr>(|txn| {
                Box::pin(async move {
                    let taken = books::Entity::update_many()
                        .col_expr(
                            books::Column::AvailableCopies,
                            Expr::col(books::Column::AvailableCopies).sub(1),
                        )
                        .filter(books::Column::Id.eq(book_id))
                        .filter(books::Column::AvailableCopies.gt(0))
                        .exec(txn)
                        .await?;
                    if taken.rows_affected == 0 {
                        let book = books::Entity::find_by_id(book_id).one(txn).await?;
                        return Ok(match book {
                            Some(_) => CheckoutOutcome::NoCopies,
                            None => CheckoutOutcome::BookMissing,
                        });
                    }

                    let model = loans::ActiveModel {
                        status: Set(LoanStatus::Active.as_str().to_owned()),
                        loan_date: Set(loan_date),
                        return_date: Set(return_date),
                        user_id: Set(user_id),
                        book_id: Set(book_id),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    Ok(CheckoutOutcome::Loaned(Loan {
                        id: model.id,
                        status: LoanStatus::Active,
                        loan_date: model.loan_date,
                        return_date: model.return_date,
                        user_id: model.user_id,
                        book_id: model.book_id,
                    }))
                })
            })
            .await
            .context("checkout book")?;
        Ok(outcome)
    }

    async fn check_in(&self, loan_id: i32) -> Result<CheckInOutcome, LibraryServiceError> {
        let outcome = self
            .db
            .transaction::<_, CheckInOutcome, DbErr>(|txn| {
                Box::pin(async move {
                    let Some(loan) = loans::Entity::find_by_id(loan_id).one(txn).await? else {
                        return Ok(CheckInOutcome::LoanMissing);
                    };

                    let returned = LoanStatus::Returned.as_str();
                    let flipped = loans::Entity::update_many()
                        .col_expr(loans::Column::Status, Expr::value(returned))
                        .filter(loans::Column::Id.eq(loan_id))
                        .filter(loans::Column::Status.ne(returned))
                        .exec(txn)
                        .await?;
                    if flipped.rows_affected == 0 {
                        return Ok(CheckInOutcome::AlreadyReturned);
                    }

                    let restored = books::Entity::update_many()
                        .col_expr(
                            books::Column::AvailableCopies,
                            Expr::col(books::Column::AvailableCopies).add(1),
                        )
                        .filter(books::Column::Id.eq(loan.book_id))
                        .filter(
                            Expr::col(books::Column::AvailableCopies)
                                .lt(Expr::col(books::Column::TotalCopies)),
                        )
                        .exec(txn)
                        .await?;
                    Ok(CheckInOutcome::Returned {
                        book_id: loan.book_id,
                        capped: restored.rows_affected == 0,
                    })
                })
            })
            .await
            .context("check in loan")?;
        Ok(outcome)
    }
}

// ── Reservation repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReservationRepository {
    pub db: DatabaseConnection,
}

impl ReservationRepository for DbReservationRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Reservation>, LibraryServiceError> {
        let model = reservations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find reservation by id")?;
        model.map(reservation_from_model).transpose()
    }

    async fn list(&self) -> Result<Vec<Reservation>, LibraryServiceError> {
        reservations::Entity::find()
            .order_by_asc(reservations::Column::Id)
            .all(&self.db)
            .await
            .context("list reservations")?
            .into_iter()
            .map(reservation_from_model)
            .collect()
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Reservation>, LibraryServiceError> {
        reservations::Entity::find()
            .filter(reservations::Column::UserId.eq(user_id))
            .order_by_asc(reservations::Column::Id)
            .all(&self.db)
            .await
            .context("list reservations by user")?
            .into_iter()
            .map(reservation_from_model)
            .collect()
    }

    async fn create(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, LibraryServiceError> {
        let model = reservations::ActiveModel {
            user_id: Set(reservation.user_id),
            book_id: Set(reservation.book_id),
            reservation_time: Set(reservation.reservation_time),
            status: Set(reservation.status.as_str().to_owned()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create reservation")?;
        reservation_from_model(model)
    }

    async fn update(
        &self,
        id: i32,
        reservation: &NewReservation,
    ) -> Result<bool, LibraryServiceError> {
        let result = reservations::Entity::update_many()
            .set(reservations::ActiveModel {
                user_id: Set(reservation.user_id),
                book_id: Set(reservation.book_id),
                reservation_time: Set(reservation.reservation_time),
                status: Set(reservation.status.as_str().to_owned()),
                ..Default::default()
            })
            .filter(reservations::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update reservation")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        let result = reservations::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete reservation")?;
        Ok(result.rows_affected > 0)
    }
}

fn reservation_from_model(model: reservations::Model) -> Result<Reservation, LibraryServiceError> {
    let status = model
        .status
        .parse::<ReservationStatus>()
        .with_context(|| format!("reservation {} status", model.id))?;
    Ok(Reservation {
        id: model.id,
        user_id: model.user_id,
        book_id: model.book_id,
        reservation_time: model.reservation_time,
        status,
    })
}

// ── Review repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl ReviewRepository for DbReviewRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Review>, LibraryServiceError> {
        let model = reviews::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find review by id")?;
        Ok(model.map(review_from_model))
    }

    async fn list(&self) -> Result<Vec<Review>, LibraryServiceError> {
        let models = reviews::Entity::find()
            .order_by_asc(reviews::Column::Id)
            .all(&self.db)
            .await
            .context("list reviews")?;
        Ok(models.into_iter().map(review_from_model).collect())
    }

    async fn list_by_book(&self, book_id: i32) -> Result<Vec<Review>, LibraryServiceError> {
        let models = reviews::Entity::find()
            .filter(reviews::Column::BookId.eq(book_id))
            .order_by_asc(reviews::Column::Id)
            .all(&self.db)
            .await
            .context("list reviews by book")?;
        Ok(models.into_iter().map(review_from_model).collect())
    }

    async fn create(&self, review: &NewReview) -> Result<Review, LibraryServiceError> {
        let model = reviews::ActiveModel {
            user_id: Set(review.user_id),
            book_id: Set(review.book_id),
            comment: Set(review.comment.clone()),
            rating: Set(review.rating),
            created_at: Set(review.created_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create review")?;
        Ok(review_from_model(model))
    }

    async fn update(&self, id: i32, review: &NewReview) -> Result<bool, LibraryServiceError> {
        let result = reviews::Entity::update_many()
            .set(reviews::ActiveModel {
                user_id: Set(review.user_id),
                book_id: Set(review.book_id),
                comment: Set(review.comment.clone()),
                rating: Set(review.rating),
                created_at: Set(review.created_at),
                ..Default::default()
            })
            .filter(reviews::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update review")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        let result = reviews::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete review")?;
        Ok(result.rows_affected > 0)
    }
}

fn review_from_model(model: reviews::Model) -> Review {
    Review {
        id: model.id,
        user_id: model.user_id,
        book_id: model.book_id,
        comment: model.comment,
        rating: model.rating,
        created_at: model.created_at,
    }
}
