use chrono::{Duration, Utc};

use athenaeum_domain::lending::ReservationStatus;
use athenaeum_domain::user::UserRole;
use athenaeum_library::domain::repository::ReservationRepository;
use athenaeum_library::domain::types::NewReservation;
use athenaeum_library::error::LibraryServiceError;
use athenaeum_library::usecase::reservation::{
    CancelReservationUseCase, ListReservationsByUserUseCase, ReserveBookUseCase,
    UpdateReservationUseCase,
};

use crate::helpers::{available_copies, seed_book, seed_user, test_state};

#[tokio::test]
async fn should_confirm_reservation_without_holding_a_copy() {
    let state = test_state().await;
    let user = seed_user(&state, "reader01", UserRole::User).await;
    let book = seed_book(&state, "Dune", 2, 2).await;

    let usecase = ReserveBookUseCase {
        users: state.user_repo(),
        books: state.book_repo(),
        reservations: state.reservation_repo(),
    };
    let reservation = usecase.execute(user.id, book.id).await.unwrap();

    assert_eq!(reservation.status, ReservationStatus::Confirmed);
    assert_eq!(reservation.user_id, user.id);
    assert!(reservation.reservation_time <= Utc::now());
    assert_eq!(available_copies(&state, book.id).await, 2);
}

#[tokio::test]
async fn should_reject_reservation_for_unknown_book() {
    let state = test_state().await;
    let user = seed_user(&state, "reader01", UserRole::User).await;

    let usecase = ReserveBookUseCase {
        users: state.user_repo(),
        books: state.book_repo(),
        reservations: state.reservation_repo(),
    };
    let result = usecase.execute(user.id, 77).await;

    assert!(matches!(result, Err(LibraryServiceError::BookNotFound)));
    assert!(state.reservation_repo().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn should_remove_cancelled_reservation() {
    let state = test_state().await;
    let user = seed_user(&state, "reader01", UserRole::User).await;
    let book = seed_book(&state, "Dune", 1, 1).await;
    let reservation = ReserveBookUseCase {
        users: state.user_repo(),
        books: state.book_repo(),
        reservations: state.reservation_repo(),
    }
    .execute(user.id, book.id)
    .await
    .unwrap();

    let cancel = CancelReservationUseCase {
        reservations: state.reservation_repo(),
    };
    cancel.execute(reservation.id).await.unwrap();

    let stored = state.reservation_repo().find_by_id(reservation.id).await;
    assert!(stored.unwrap().is_none());

    let again = cancel.execute(reservation.id).await;
    assert!(matches!(again, Err(LibraryServiceError::ReservationNotFound)));
}

#[tokio::test]
async fn should_list_only_the_given_users_reservations() {
    let state = test_state().await;
    let alice = seed_user(&state, "alice01", UserRole::User).await;
    let bob = seed_user(&state, "bob0001", UserRole::User).await;
    let book = seed_book(&state, "Dune", 1, 1).await;
    let reserve = ReserveBookUseCase {
        users: state.user_repo(),
        books: state.book_repo(),
        reservations: state.reservation_repo(),
    };
    reserve.execute(alice.id, book.id).await.unwrap();
    reserve.execute(bob.id, book.id).await.unwrap();
    reserve.execute(alice.id, book.id).await.unwrap();

    let found = ListReservationsByUserUseCase {
        reservations: state.reservation_repo(),
    }
    .execute(alice.id)
    .await
    .unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|r| r.user_id == alice.id));
}

#[tokio::test]
async fn should_reach_cancelled_status_through_update() {
    let state = test_state().await;
    let user = seed_user(&state, "reader01", UserRole::User).await;
    let book = seed_book(&state, "Dune", 1, 1).await;
    let reservations = state.reservation_repo();
    let reservation = reservations
        .create(&NewReservation {
            user_id: user.id,
            book_id: book.id,
            reservation_time: Utc::now() - Duration::hours(1),
            status: ReservationStatus::Pending,
        })
        .await
        .unwrap();

    let updated = UpdateReservationUseCase {
        users: state.user_repo(),
        books: state.book_repo(),
        reservations: state.reservation_repo(),
    }
    .execute(
        reservation.id,
        NewReservation {
            user_id: reservation.user_id,
            book_id: reservation.book_id,
            reservation_time: reservation.reservation_time,
            status: ReservationStatus::Cancelled,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.id, reservation.id);

    let stored = reservations
        .find_by_id(reservation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, ReservationStatus::Cancelled);
}
