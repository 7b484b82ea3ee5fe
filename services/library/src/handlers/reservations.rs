use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use athenaeum_auth_types::identity::Identity;
use athenaeum_domain::lending::ReservationStatus;
use athenaeum_domain::user::UserRole;

use crate::domain::types::{NewReservation, Reservation};
use crate::error::LibraryServiceError;
use crate::handlers::{
    ValidJson, ValidPath, ValidQuery, not_in_future, require_role, require_self_or_moderator,
};
use crate::state::AppState;
use crate::usecase::reservation::{
    AddReservationUseCase, CancelReservationUseCase, DeleteReservationUseCase,
    GetReservationUseCase, ListReservationsByUserUseCase, ListReservationsUseCase,
    ReserveBookUseCase, UpdateReservationUseCase,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub user_id: i32,
    pub book_id: i32,
    #[validate(custom(function = "not_in_future"))]
    pub reservation_time: DateTime<Utc>,
    pub status: ReservationStatus,
}

impl From<ReservationRequest> for NewReservation {
    fn from(body: ReservationRequest) -> Self {
        Self {
            user_id: body.user_id,
            book_id: body.book_id,
            reservation_time: body.reservation_time,
            status: body.status,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: i32,
    pub user_id: i32,
    pub book_id: i32,
    #[serde(serialize_with = "athenaeum_core::serde::to_rfc3339_ms")]
    pub reservation_time: DateTime<Utc>,
    pub status: ReservationStatus,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            reservation_id: reservation.id,
            user_id: reservation.user_id,
            book_id: reservation.book_id,
            reservation_time: reservation.reservation_time,
            status: reservation.status,
        }
    }
}

fn to_responses(reservations: Vec<Reservation>) -> Json<Vec<ReservationResponse>> {
    Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    )
}

// ── POST /api/reservations/reserve ───────────────────────────────────────────

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReserveQuery {
    pub user_id: i32,
    pub book_id: i32,
}

pub async fn reserve_book(
    identity: Identity,
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<ReserveQuery>,
) -> Result<(StatusCode, Json<ReservationResponse>), LibraryServiceError> {
    require_self_or_moderator(&identity, query.user_id)?;
    let usecase = ReserveBookUseCase {
        users: state.user_repo(),
        books: state.book_repo(),
        reservations: state.reservation_repo(),
    };
    let reservation = usecase.execute(query.user_id, query.book_id).await?;
    Ok((StatusCode::CREATED, Json(reservation.into())))
}

// ── DELETE /api/reservations/cancel/{id} ─────────────────────────────────────

pub async fn cancel_reservation(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<StatusCode, LibraryServiceError> {
    let reservation = GetReservationUseCase {
        reservations: state.reservation_repo(),
    }
    .execute(id)
    .await?;
    require_self_or_moderator(&identity, reservation.user_id)?;
    let usecase = CancelReservationUseCase {
        reservations: state.reservation_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/reservations/user/{user_id} ─────────────────────────────────────

pub async fn list_reservations_by_user(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(user_id): ValidPath<i32>,
) -> Result<Json<Vec<ReservationResponse>>, LibraryServiceError> {
    require_self_or_moderator(&identity, user_id)?;
    let usecase = ListReservationsByUserUseCase {
        reservations: state.reservation_repo(),
    };
    Ok(to_responses(usecase.execute(user_id).await?))
}

// ── POST /api/reservations ───────────────────────────────────────────────────

pub async fn add_reservation(
    identity: Identity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<ReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = AddReservationUseCase {
        users: state.user_repo(),
        books: state.book_repo(),
        reservations: state.reservation_repo(),
    };
    let reservation = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(reservation.into())))
}

// ── GET /api/reservations ────────────────────────────────────────────────────

pub async fn list_reservations(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReservationResponse>>, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = ListReservationsUseCase {
        reservations: state.reservation_repo(),
    };
    Ok(to_responses(usecase.execute().await?))
}

// ── GET /api/reservations/{id} ───────────────────────────────────────────────

pub async fn get_reservation(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<ReservationResponse>, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = GetReservationUseCase {
        reservations: state.reservation_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT /api/reservations/{id} ───────────────────────────────────────────────

pub async fn update_reservation(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(body): ValidJson<ReservationRequest>,
) -> Result<Json<ReservationResponse>, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = UpdateReservationUseCase {
        users: state.user_repo(),
        books: state.book_repo(),
        reservations: state.reservation_repo(),
    };
    Ok(Json(usecase.execute(id, body.into()).await?.into()))
}

// ── DELETE /api/reservations/{id} ────────────────────────────────────────────

pub async fn delete_reservation(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<StatusCode, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = DeleteReservationUseCase {
        reservations: state.reservation_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
