use axum::{
    Router,
    routing::{delete, get, post},
};

use athenaeum_core::health::{healthz, readyz};
use athenaeum_core::middleware::{http_trace_layer, propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{sign_in, sign_up},
    authors::{add_author, delete_author, get_author, list_authors, update_author},
    book_authors::{add_book_author, delete_book_author, get_book_author, list_book_authors},
    book_categories::{
        add_book_category, delete_book_category, get_book_category, list_book_categories,
    },
    books::{
        add_book, delete_book, get_book, list_books, search_by_author,
        search_by_available_copies, search_by_category, search_by_title, update_book,
    },
    categories::{add_category, delete_category, get_category, list_categories, update_category},
    loans::{
        add_loan, delete_loan, get_loan, list_loans, list_loans_by_user, list_overdue_loans,
        loan_book, return_book, update_loan,
    },
    reservations::{
        add_reservation, cancel_reservation, delete_reservation, get_reservation,
        list_reservations, list_reservations_by_user, reserve_book, update_reservation,
    },
    reviews::{
        add_review, delete_review, get_review, list_reviews, list_reviews_by_book, update_review,
    },
    user_profiles::{
        add_user_profile, delete_user_profile, get_user_profile, list_user_profiles,
        update_user_profile,
    },
    users::{add_user, delete_user, get_user, list_users, update_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/sign-up", post(sign_up))
        .route("/api/auth/sign-in", post(sign_in))
        // Books
        .route("/api/books", get(list_books).post(add_book))
        .route(
            "/api/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/books/search/title", get(search_by_title))
        .route("/api/books/search/available", get(search_by_available_copies))
        .route("/api/books/search/author", get(search_by_author))
        .route("/api/books/search/category", get(search_by_category))
        // Authors
        .route("/api/authors", get(list_authors).post(add_author))
        .route(
            "/api/authors/{id}",
            get(get_author).put(update_author).delete(delete_author),
        )
        // Categories
        .route("/api/categories", get(list_categories).post(add_category))
        .route(
            "/api/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        // Book ↔ author links
        .route(
            "/api/book-authors",
            get(list_book_authors).post(add_book_author),
        )
        .route(
            "/api/book-authors/{book_id}/{author_id}",
            get(get_book_author).delete(delete_book_author),
        )
        // Book ↔ category links
        .route(
            "/api/book-categories",
            get(list_book_categories).post(add_book_category),
        )
        .route(
            "/api/book-categories/{book_id}/{category_id}",
            get(get_book_category).delete(delete_book_category),
        )
        // Users
        .route("/api/users", get(list_users).post(add_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        // User profiles
        .route(
            "/api/user-profiles",
            get(list_user_profiles).post(add_user_profile),
        )
        .route(
            "/api/user-profiles/{id}",
            get(get_user_profile)
                .put(update_user_profile)
                .delete(delete_user_profile),
        )
        // Loans
        .route("/api/loans/loan", post(loan_book))
        .route("/api/loans/return/{id}", post(return_book))
        .route("/api/loans/user/{user_id}", get(list_loans_by_user))
        .route("/api/loans/overdue", get(list_overdue_loans))
        .route("/api/loans", get(list_loans).post(add_loan))
        .route(
            "/api/loans/{id}",
            get(get_loan).put(update_loan).delete(delete_loan),
        )
        // Reservations
        .route("/api/reservations/reserve", post(reserve_book))
        .route("/api/reservations/cancel/{id}", delete(cancel_reservation))
        .route(
            "/api/reservations/user/{user_id}",
            get(list_reservations_by_user),
        )
        .route(
            "/api/reservations",
            get(list_reservations).post(add_reservation),
        )
        .route(
            "/api/reservations/{id}",
            get(get_reservation)
                .put(update_reservation)
                .delete(delete_reservation),
        )
        // Reviews
        .route("/api/reviews", get(list_reviews).post(add_review))
        .route("/api/reviews/book/{book_id}", get(list_reviews_by_book))
        .route(
            "/api/reviews/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
        .layer(propagate_request_id_layer())
        .layer(http_trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
