use chrono::{Duration, Utc};

use athenaeum_domain::lending::LoanStatus;
use athenaeum_domain::user::UserRole;
use athenaeum_library::domain::repository::{LoanRepository, UserRepository};
use athenaeum_library::domain::types::{NewLoan, NewUserProfile};
use athenaeum_library::error::LibraryServiceError;
use athenaeum_library::usecase::auth::{SignInInput, SignInUseCase, verify_password};
use athenaeum_library::usecase::user::{
    AddUserUseCase, DeleteUserUseCase, UpdateUserUseCase, UserInput,
};
use athenaeum_library::usecase::user_profile::{AddUserProfileUseCase, UpdateUserProfileUseCase};

use crate::helpers::{TEST_PASSWORD, seed_book, seed_user, test_state};

fn input(username: &str, email: &str) -> UserInput {
    UserInput {
        username: username.to_owned(),
        email: email.to_owned(),
        password: "s3cret-pass".to_owned(),
        role: UserRole::Moderator,
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_hashed_password_and_role() {
    let state = test_state().await;
    let user = AddUserUseCase {
        repo: state.user_repo(),
    }
    .execute(input("librarian", "lib@example.com"))
    .await
    .unwrap();

    let stored = state.user_repo().find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.role, UserRole::Moderator);
    assert_ne!(stored.password_hash, "s3cret-pass");
    assert!(verify_password("s3cret-pass", &stored.password_hash));
}

#[tokio::test]
async fn should_reject_duplicate_username_or_email() {
    let state = test_state().await;
    let usecase = AddUserUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(input("librarian", "lib@example.com"))
        .await
        .unwrap();

    let same_name = usecase
        .execute(input("librarian", "other@example.com"))
        .await;
    assert!(matches!(same_name, Err(LibraryServiceError::UserAlreadyExists)));

    let same_email = usecase.execute(input("archivist", "lib@example.com")).await;
    assert!(matches!(same_email, Err(LibraryServiceError::UserAlreadyExists)));
}

#[tokio::test]
async fn should_reject_update_that_collides_with_another_user() {
    let state = test_state().await;
    seed_user(&state, "reader01", UserRole::User).await;
    let other = seed_user(&state, "reader02", UserRole::User).await;

    let result = UpdateUserUseCase {
        repo: state.user_repo(),
    }
    .execute(other.id, input("reader01", "fresh@example.com"))
    .await;

    assert!(matches!(result, Err(LibraryServiceError::UserAlreadyExists)));
}

#[tokio::test]
async fn should_refuse_deleting_user_with_loans() {
    let state = test_state().await;
    let user = seed_user(&state, "reader01", UserRole::User).await;
    let book = seed_book(&state, "Dune", 1, 1).await;
    let now = Utc::now();
    state
        .loan_repo()
        .create(&NewLoan {
            status: LoanStatus::Active,
            loan_date: now,
            return_date: now + Duration::days(7),
            user_id: user.id,
            book_id: book.id,
        })
        .await
        .unwrap();

    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    let result = usecase.execute(user.id).await;
    assert!(matches!(result, Err(LibraryServiceError::UserInUse)));

    let missing = usecase.execute(user.id + 100).await;
    assert!(matches!(missing, Err(LibraryServiceError::UserNotFound)));
}

// ── Sign-in ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_in_seeded_user_and_reject_wrong_password() {
    let state = test_state().await;
    let user = seed_user(&state, "reader01", UserRole::User).await;
    let usecase = SignInUseCase {
        users: state.user_repo(),
        jwt_secret: "integration-secret".to_owned(),
        token_ttl_secs: 60,
    };

    let output = usecase
        .execute(SignInInput {
            username: "reader01".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(output.user.id, user.id);
    assert!(!output.access_token.is_empty());

    let wrong = usecase
        .execute(SignInInput {
            username: "reader01".to_owned(),
            password: "not-the-password".to_owned(),
        })
        .await;
    assert!(matches!(wrong, Err(LibraryServiceError::InvalidCredentials)));
}

// ── Profiles ─────────────────────────────────────────────────────────────────

fn profile(user_id: i32) -> NewUserProfile {
    NewUserProfile {
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        phone: "555-0100".to_owned(),
        address: "12 St James's Square".to_owned(),
        user_id,
    }
}

#[tokio::test]
async fn should_require_existing_user_for_profile() {
    let state = test_state().await;
    let usecase = AddUserProfileUseCase {
        users: state.user_repo(),
        profiles: state.user_profile_repo(),
    };

    let result = usecase.execute(profile(31)).await;
    assert!(matches!(result, Err(LibraryServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_replace_profile_fields_on_update() {
    let state = test_state().await;
    let user = seed_user(&state, "reader01", UserRole::User).await;
    let created = AddUserProfileUseCase {
        users: state.user_repo(),
        profiles: state.user_profile_repo(),
    }
    .execute(profile(user.id))
    .await
    .unwrap();

    let usecase = UpdateUserProfileUseCase {
        users: state.user_repo(),
        profiles: state.user_profile_repo(),
    };
    let updated = usecase
        .execute(
            created.id,
            NewUserProfile {
                phone: "555-0199".to_owned(),
                ..profile(user.id)
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.phone, "555-0199");
    assert_eq!(updated.first_name, "Ada");

    let missing = usecase.execute(created.id + 1, profile(user.id)).await;
    assert!(matches!(missing, Err(LibraryServiceError::UserProfileNotFound)));
}
