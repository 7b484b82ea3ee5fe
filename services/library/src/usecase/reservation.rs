use chrono::Utc;
use tracing::info;

use athenaeum_domain::lending::ReservationStatus;

use crate::domain::repository::{BookRepository, ReservationRepository, UserRepository};
use crate::domain::types::{NewReservation, Reservation};
use crate::error::LibraryServiceError;
use crate::usecase::{resolve_book, resolve_user};

// ── ReserveBook ──────────────────────────────────────────────────────────────

/// Record intent to borrow. A reservation does not hold a copy.
pub struct ReserveBookUseCase<U, B, R>
where
    U: UserRepository,
    B: BookRepository,
    R: ReservationRepository,
{
    pub users: U,
    pub books: B,
    pub reservations: R,
}

impl<U, B, R> ReserveBookUseCase<U, B, R>
where
    U: UserRepository,
    B: BookRepository,
    R: ReservationRepository,
{
    pub async fn execute(
        &self,
        user_id: i32,
        book_id: i32,
    ) -> Result<Reservation, LibraryServiceError> {
        resolve_user(&self.users, user_id).await?;
        resolve_book(&self.books, book_id).await?;
        let reservation = self
            .reservations
            .create(&NewReservation {
                user_id,
                book_id,
                reservation_time: Utc::now(),
                status: ReservationStatus::Confirmed,
            })
            .await?;
        info!(
            reservation_id = reservation.id,
            user_id, book_id, "book reserved"
        );
        Ok(reservation)
    }
}

// ── CancelReservation ────────────────────────────────────────────────────────

/// Cancelling removes the row; it does not write `CANCELLED`.
pub struct CancelReservationUseCase<R: ReservationRepository> {
    pub reservations: R,
}

impl<R: ReservationRepository> CancelReservationUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), LibraryServiceError> {
        if !self.reservations.delete(id).await? {
            return Err(LibraryServiceError::ReservationNotFound);
        }
        info!(reservation_id = id, "reservation cancelled");
        Ok(())
    }
}

// ── ListReservationsByUser ───────────────────────────────────────────────────

pub struct ListReservationsByUserUseCase<R: ReservationRepository> {
    pub reservations: R,
}

impl<R: ReservationRepository> ListReservationsByUserUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<Vec<Reservation>, LibraryServiceError> {
        self.reservations.list_by_user(user_id).await
    }
}

// ── AddReservation ───────────────────────────────────────────────────────────

pub struct AddReservationUseCase<U, B, R>
where
    U: UserRepository,
    B: BookRepository,
    R: ReservationRepository,
{
    pub users: U,
    pub books: B,
    pub reservations: R,
}

impl<U, B, R> AddReservationUseCase<U, B, R>
where
    U: UserRepository,
    B: BookRepository,
    R: ReservationRepository,
{
    pub async fn execute(&self, input: NewReservation) -> Result<Reservation, LibraryServiceError> {
        resolve_user(&self.users, input.user_id).await?;
        resolve_book(&self.books, input.book_id).await?;
        let reservation = self.reservations.create(&input).await?;
        info!(
            reservation_id = reservation.id,
            status = %reservation.status,
            "reservation added"
        );
        Ok(reservation)
    }
}

// ── GetReservation ───────────────────────────────────────────────────────────

pub struct GetReservationUseCase<R: ReservationRepository> {
    pub reservations: R,
}

impl<R: ReservationRepository> GetReservationUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Reservation, LibraryServiceError> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or(LibraryServiceError::ReservationNotFound)
    }
}

// ── ListReservations ─────────────────────────────────────────────────────────

pub struct ListReservationsUseCase<R: ReservationRepository> {
    pub reservations: R,
}

impl<R: ReservationRepository> ListReservationsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Reservation>, LibraryServiceError> {
        self.reservations.list().await
    }
}

// ── UpdateReservation ────────────────────────────────────────────────────────

pub struct UpdateReservationUseCase<U, B, R>
where
    U: UserRepository,
    B: BookRepository,
    R: ReservationRepository,
{
    pub users: U,
    pub books: B,
    pub reservations: R,
}

impl<U, B, R> UpdateReservationUseCase<U, B, R>
where
    U: UserRepository,
    B: BookRepository,
    R: ReservationRepository,
{
    pub async fn execute(
        &self,
        id: i32,
        input: NewReservation,
    ) -> Result<Reservation, LibraryServiceError> {
        resolve_user(&self.users, input.user_id).await?;
        resolve_book(&self.books, input.book_id).await?;
        if !self.reservations.update(id, &input).await? {
            return Err(LibraryServiceError::ReservationNotFound);
        }
        info!(reservation_id = id, status = %input.status, "reservation updated");
        Ok(Reservation {
            id,
            user_id: input.user_id,
            book_id: input.book_id,
            reservation_time: input.reservation_time,
            status: input.status,
        })
    }
}

// ── DeleteReservation ────────────────────────────────────────────────────────

pub struct DeleteReservationUseCase<R: ReservationRepository> {
    pub reservations: R,
}

impl<R: ReservationRepository> DeleteReservationUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), LibraryServiceError> {
        if !self.reservations.delete(id).await? {
            return Err(LibraryServiceError::ReservationNotFound);
        }
        info!(reservation_id = id, "reservation deleted");
        Ok(())
    }
}
