use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use athenaeum_auth_types::identity::JwtSecret;

use crate::infra::accounts::{DbUserProfileRepository, DbUserRepository};
use crate::infra::catalog::{
    DbAuthorRepository, DbBookAuthorRepository, DbBookCategoryRepository, DbBookRepository,
    DbCategoryRepository,
};
use crate::infra::lending::{
    DbLendingPort, DbLoanRepository, DbReservationRepository, DbReviewRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub token_ttl_secs: u64,
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}

impl AppState {
    pub fn book_repo(&self) -> DbBookRepository {
        DbBookRepository {
            db: self.db.clone(),
        }
    }

    pub fn author_repo(&self) -> DbAuthorRepository {
        DbAuthorRepository {
            db: self.db.clone(),
        }
    }

    pub fn category_repo(&self) -> DbCategoryRepository {
        DbCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn book_author_repo(&self) -> DbBookAuthorRepository {
        DbBookAuthorRepository {
            db: self.db.clone(),
        }
    }

    pub fn book_category_repo(&self) -> DbBookCategoryRepository {
        DbBookCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_profile_repo(&self) -> DbUserProfileRepository {
        DbUserProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn loan_repo(&self) -> DbLoanRepository {
        DbLoanRepository {
            db: self.db.clone(),
        }
    }

    pub fn lending_port(&self) -> DbLendingPort {
        DbLendingPort {
            db: self.db.clone(),
        }
    }

    pub fn reservation_repo(&self) -> DbReservationRepository {
        DbReservationRepository {
            db: self.db.clone(),
        }
    }

    pub fn review_repo(&self) -> DbReviewRepository {
        DbReviewRepository {
            db: self.db.clone(),
        }
    }
}
