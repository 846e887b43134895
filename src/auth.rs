//! Caller identity. The auth gateway in front of this service verifies the
//! session token and injects `x-auth-user` / `x-auth-role`; per the
//! collaborator contract those headers are trusted unconditionally here.
//! Ownership of SAR data is always resolved from this identity on every
//! request, never from ids in the payload.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::AppError;

pub const USER_HEADER: &str = "x-auth-user";
pub const ROLE_HEADER: &str = "x-auth-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Admin,
}

#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), AppError> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Student => Err(AppError::Forbidden),
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or(AppError::Unauthorized)?;

        let role = match parts.headers.get(ROLE_HEADER).and_then(|v| v.to_str().ok()) {
            Some("admin") => Role::Admin,
            Some("student") => Role::Student,
            _ => return Err(AppError::Unauthorized),
        };

        Ok(AuthUser { id, role })
    }
}
