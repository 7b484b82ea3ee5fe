use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use athenaeum_auth_types::identity::Identity;
use athenaeum_domain::lending::LoanStatus;
use athenaeum_domain::user::UserRole;

use crate::domain::types::{Loan, NewLoan};
use crate::error::LibraryServiceError;
use crate::handlers::{
    ValidJson, ValidPath, ValidQuery, not_in_future, not_in_past, require_role,
    require_self_or_moderator,
};
use crate::state::AppState;
use crate::usecase::loan::{
    AddLoanUseCase, CheckOverdueLoansUseCase, DeleteLoanUseCase, GetLoanUseCase,
    ListLoansByUserUseCase, ListLoansUseCase, LoanBookUseCase, ReturnBookUseCase,
    UpdateLoanUseCase,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub status: LoanStatus,
    #[validate(custom(function = "not_in_future"))]
    pub loan_date: DateTime<Utc>,
    #[validate(custom(function = "not_in_past"))]
    pub return_date: DateTime<Utc>,
    pub user_id: i32,
    pub book_id: i32,
}

impl From<LoanRequest> for NewLoan {
    fn from(body: LoanRequest) -> Self {
        Self {
            status: body.status,
            loan_date: body.loan_date,
            return_date: body.return_date,
            user_id: body.user_id,
            book_id: body.book_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
    pub loan_id: i32,
    pub status: LoanStatus,
    #[serde(serialize_with = "athenaeum_core::serde::to_rfc3339_ms")]
    pub loan_date: DateTime<Utc>,
    #[serde(serialize_with = "athenaeum_core::serde::to_rfc3339_ms")]
    pub return_date: DateTime<Utc>,
    pub user_id: i32,
    pub book_id: i32,
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        Self {
            loan_id: loan.id,
            status: loan.status,
            loan_date: loan.loan_date,
            return_date: loan.return_date,
            user_id: loan.user_id,
            book_id: loan.book_id,
        }
    }
}

fn to_responses(loans: Vec<Loan>) -> Json<Vec<LoanResponse>> {
    Json(loans.into_iter().map(LoanResponse::from).collect())
}

// ── POST /api/loans/loan ─────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoanBookQuery {
    pub user_id: i32,
    pub book_id: i32,
    /// Loan length in days.
    #[validate(range(min = 1, max = 365))]
    pub loan_time: i64,
}

pub async fn loan_book(
    identity: Identity,
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<LoanBookQuery>,
) -> Result<(StatusCode, Json<LoanResponse>), LibraryServiceError> {
    require_self_or_moderator(&identity, query.user_id)?;
    let usecase = LoanBookUseCase {
        users: state.user_repo(),
        lending: state.lending_port(),
    };
    let loan = usecase
        .execute(query.user_id, query.book_id, query.loan_time)
        .await?;
    Ok((StatusCode::CREATED, Json(loan.into())))
}

// ── POST /api/loans/return/{id} ──────────────────────────────────────────────

/// `true` when the loan moved to `RETURNED`, `false` when it already was.
pub async fn return_book(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<bool>, LibraryServiceError> {
    let loan = GetLoanUseCase {
        loans: state.loan_repo(),
    }
    .execute(id)
    .await?;
    require_self_or_moderator(&identity, loan.user_id)?;
    let usecase = ReturnBookUseCase {
        lending: state.lending_port(),
    };
    Ok(Json(usecase.execute(id).await?))
}

// ── GET /api/loans/user/{user_id} ────────────────────────────────────────────

pub async fn list_loans_by_user(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(user_id): ValidPath<i32>,
) -> Result<Json<Vec<LoanResponse>>, LibraryServiceError> {
    require_self_or_moderator(&identity, user_id)?;
    let usecase = ListLoansByUserUseCase {
        loans: state.loan_repo(),
    };
    Ok(to_responses(usecase.execute(user_id).await?))
}

// ── GET /api/loans/overdue ───────────────────────────────────────────────────

pub async fn list_overdue_loans(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<LoanResponse>>, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = CheckOverdueLoansUseCase {
        loans: state.loan_repo(),
    };
    Ok(to_responses(usecase.execute().await?))
}

// ── POST /api/loans ──────────────────────────────────────────────────────────

pub async fn add_loan(
    identity: Identity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<LoanRequest>,
) -> Result<(StatusCode, Json<LoanResponse>), LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = AddLoanUseCase {
        users: state.user_repo(),
        books: state.book_repo(),
        loans: state.loan_repo(),
    };
    let loan = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(loan.into())))
}

// ── GET /api/loans ───────────────────────────────────────────────────────────

pub async fn list_loans(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<LoanResponse>>, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = ListLoansUseCase {
        loans: state.loan_repo(),
    };
    Ok(to_responses(usecase.execute().await?))
}

// ── GET /api/loans/{id} ──────────────────────────────────────────────────────

pub async fn get_loan(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<LoanResponse>, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = GetLoanUseCase {
        loans: state.loan_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT /api/loans/{id} ──────────────────────────────────────────────────────

pub async fn update_loan(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(body): ValidJson<LoanRequest>,
) -> Result<Json<LoanResponse>, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = UpdateLoanUseCase {
        users: state.user_repo(),
        books: state.book_repo(),
        loans: state.loan_repo(),
    };
    Ok(Json(usecase.execute(id, body.into()).await?.into()))
}

// ── DELETE /api/loans/{id} ───────────────────────────────────────────────────

pub async fn delete_loan(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<StatusCode, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = DeleteLoanUseCase {
        loans: state.loan_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
