use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::domain::repository::{BookRepository, LendingPort, LoanRepository, UserRepository};
use crate::domain::types::{CheckInOutcome, CheckoutOutcome, Loan, NewLoan};
use crate::error::LibraryServiceError;
use crate::usecase::{resolve_book, resolve_user};

// ── LoanBook ─────────────────────────────────────────────────────────────────

/// Lend one copy of a book for `loan_days` days.
///
/// The copy decrement and the loan insert commit together or not at all, and
/// the decrement only applies while `available_copies > 0`, so two borrowers
/// racing for the last copy cannot both win.
pub struct LoanBookUseCase<U: UserRepository, L: LendingPort> {
    pub users: U,
    pub lending: L,
}

impl<U: UserRepository, L: LendingPort> LoanBookUseCase<U, L> {
    pub async fn execute(
        &self,
        user_id: i32,
        book_id: i32,
        loan_days: i64,
    ) -> Result<Loan, LibraryServiceError> {
        if loan_days < 1 {
            return Err(LibraryServiceError::Validation(format!(
                "loanTime must be at least 1 day, got {loan_days}"
            )));
        }
        resolve_user(&self.users, user_id).await?;

        let loan_date = Utc::now();
        let return_date = Duration::try_days(loan_days)
            .and_then(|length| loan_date.checked_add_signed(length))
            .ok_or_else(|| {
                LibraryServiceError::Validation(format!(
                    "loanTime of {loan_days} days is out of range"
                ))
            })?;
        match self
            .lending
            .checkout(user_id, book_id, loan_date, return_date)
            .await?
        {
            CheckoutOutcome::Loaned(loan) => {
                info!(loan_id = loan.id, user_id, book_id, loan_days, "book loaned");
                Ok(loan)
            }
            CheckoutOutcome::BookMissing => Err(LibraryServiceError::BookNotFound),
            CheckoutOutcome::NoCopies => {
                info!(user_id, book_id, "loan refused, no copies left");
                Err(LibraryServiceError::NoAvailableCopies)
            }
        }
    }
}

// ── ReturnBook ───────────────────────────────────────────────────────────────

/// Returns `false` when the loan was already returned; nothing is mutated then.
pub struct ReturnBookUseCase<L: LendingPort> {
    pub lending: L,
}

impl<L: LendingPort> ReturnBookUseCase<L> {
    pub async fn execute(&self, loan_id: i32) -> Result<bool, LibraryServiceError> {
        match self.lending.check_in(loan_id).await? {
            CheckInOutcome::Returned { book_id, capped } => {
                if capped {
                    warn!(
                        loan_id,
                        book_id, "available copies already at total; counter left unchanged"
                    );
                }
                info!(loan_id, book_id, "book returned");
                Ok(true)
            }
            CheckInOutcome::AlreadyReturned => {
                info!(loan_id, "loan already returned");
                Ok(false)
            }
            CheckInOutcome::LoanMissing => Err(LibraryServiceError::LoanNotFound),
        }
    }
}

// ── CheckOverdueLoans ────────────────────────────────────────────────────────

/// Overdue is derived: `ACTIVE` with a return date in the past. No status is written.
pub struct CheckOverdueLoansUseCase<R: LoanRepository> {
    pub loans: R,
}

impl<R: LoanRepository> CheckOverdueLoansUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Loan>, LibraryServiceError> {
        self.loans.list_overdue(Utc::now()).await
    }
}

// ── AddLoan ──────────────────────────────────────────────────────────────────

/// Record a loan as given. Copy counters are not touched.
pub struct AddLoanUseCase<U: UserRepository, B: BookRepository, R: LoanRepository> {
    pub users: U,
    pub books: B,
    pub loans: R,
}

impl<U, B, R> AddLoanUseCase<U, B, R>
where
    U: UserRepository,
    B: BookRepository,
    R: LoanRepository,
{
    pub async fn execute(&self, input: NewLoan) -> Result<Loan, LibraryServiceError> {
        resolve_user(&self.users, input.user_id).await?;
        resolve_book(&self.books, input.book_id).await?;
        let loan = self.loans.create(&input).await?;
        info!(loan_id = loan.id, status = %loan.status, "loan record added");
        Ok(loan)
    }
}

// ── GetLoan ──────────────────────────────────────────────────────────────────

pub struct GetLoanUseCase<R: LoanRepository> {
    pub loans: R,
}

impl<R: LoanRepository> GetLoanUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Loan, LibraryServiceError> {
        self.loans
            .find_by_id(id)
            .await?
            .ok_or(LibraryServiceError::LoanNotFound)
    }
}

// ── ListLoans ────────────────────────────────────────────────────────────────

pub struct ListLoansUseCase<R: LoanRepository> {
    pub loans: R,
}

impl<R: LoanRepository> ListLoansUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Loan>, LibraryServiceError> {
        self.loans.list().await
    }
}

// ── ListLoansByUser ──────────────────────────────────────────────────────────

pub struct ListLoansByUserUseCase<R: LoanRepository> {
    pub loans: R,
}

impl<R: LoanRepository> ListLoansByUserUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<Vec<Loan>, LibraryServiceError> {
        self.loans.list_by_user(user_id).await
    }
}

// ── UpdateLoan ───────────────────────────────────────────────────────────────

pub struct UpdateLoanUseCase<U: UserRepository, B: BookRepository, R: LoanRepository> {
    pub users: U,
    pub books: B,
    pub loans: R,
}

impl<U, B, R> UpdateLoanUseCase<U, B, R>
where
    U: UserRepository,
    B: BookRepository,
    R: LoanRepository,
{
    pub async fn execute(&self, id: i32, input: NewLoan) -> Result<Loan, LibraryServiceError> {
        resolve_user(&self.users, input.user_id).await?;
        resolve_book(&self.books, input.book_id).await?;
        if !self.loans.update(id, &input).await? {
            return Err(LibraryServiceError::LoanNotFound);
        }
        info!(loan_id = id, status = %input.status, "loan record updated");
        Ok(Loan {
            id,
            status: input.status,
            loan_date: input.loan_date,
            return_date: input.return_date,
            user_id: input.user_id,
            book_id: input.book_id,
        })
    }
}

// ── DeleteLoan ───────────────────────────────────────────────────────────────

pub struct DeleteLoanUseCase<R: LoanRepository> {
    pub loans: R,
}

impl<R: LoanRepository> DeleteLoanUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), LibraryServiceError> {
        if !self.loans.delete(id).await? {
            return Err(LibraryServiceError::LoanNotFound);
        }
        info!(loan_id = id, "loan record deleted");
        Ok(())
    }
}
