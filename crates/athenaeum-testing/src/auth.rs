//! Mock auth helpers for integration tests.
//!
//! `MockAuth` signs a real bearer token with [`TEST_JWT_SECRET`], so router
//! tests exercise the same `Identity` extractor production requests hit.

use athenaeum_auth_types::token::issue_access_token;
use athenaeum_domain::user::UserRole;
use axum::http::{HeaderMap, HeaderName, HeaderValue, header};

/// Secret test routers must be built with.
pub const TEST_JWT_SECRET: &str = "athenaeum-test-secret";

/// Configurable identity injected into test requests.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: i32,
    pub user_role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: i32, user_role: UserRole) -> Self {
        Self { user_id, user_role }
    }

    pub fn user(user_id: i32) -> Self {
        Self::new(user_id, UserRole::User)
    }

    pub fn moderator(user_id: i32) -> Self {
        Self::new(user_id, UserRole::Moderator)
    }

    pub fn admin(user_id: i32) -> Self {
        Self::new(user_id, UserRole::Admin)
    }

    /// `Authorization: Bearer <jwt>` as a single header pair.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let issued = issue_access_token(self.user_id, self.user_role, TEST_JWT_SECRET, 3600)
            .expect("sign test token");
        let value = HeaderValue::from_str(&format!("Bearer {}", issued.token))
            .expect("bearer header value");
        (header::AUTHORIZATION, value)
    }

    pub fn headers(&self) -> HeaderMap {
        let (name, value) = self.header();
        let mut map = HeaderMap::new();
        map.insert(name, value);
        map
    }
}
