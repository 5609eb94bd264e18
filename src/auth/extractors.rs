use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::error::AuthError;
use super::jwt::JwtKeys;

/// Extracts and validates the bearer token, rejecting the request with a 401
/// before the handler runs. Carries the authenticated user id.
pub struct AuthUser(pub Uuid);

/// Pull the token out of an `Authorization: Bearer <token>` header value.
/// An absent or ill-formed header is a distinct failure from a token that is
/// present but does not verify.
pub(crate) fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::NoToken)?;
    let token = header.strip_prefix("Bearer ").ok_or(AuthError::NoToken)?;
    if token.is_empty() {
        return Err(AuthError::NoToken);
    }
    Ok(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let token = bearer_token(header)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!("invalid or expired token");
            e
        })?;
        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_is_no_token() {
        assert!(matches!(bearer_token(None), Err(AuthError::NoToken)));
    }

    #[test]
    fn wrong_scheme_is_no_token() {
        assert!(matches!(
            bearer_token(Some("Basic dXNlcjpwYXNz")),
            Err(AuthError::NoToken)
        ));
    }

    #[test]
    fn empty_bearer_is_no_token() {
        assert!(matches!(bearer_token(Some("Bearer ")), Err(AuthError::NoToken)));
    }

    #[test]
    fn well_formed_bearer_yields_token() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }
}
