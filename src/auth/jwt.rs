use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::auth::error::AuthError;
use crate::state::AppState;

/// Fixed validity window from issuance. There is no refresh mechanism and no
/// revocation state; a token simply expires.
const TOKEN_TTL: Duration = Duration::hours(6);

/// Session token payload. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
}

/// HS256 signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt_secret)
    }
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn sign(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.sign_with_ttl(user_id, TOKEN_TTL)
    }

    fn sign_with_ttl(&self, user_id: Uuid, ttl: Duration) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: (now + ttl).unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "session token signed");
        Ok(token)
    }

    /// Decode and validate signature and expiry. Validity is solely a
    /// function of the token itself; no store access happens here.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AuthError::InvalidToken
            })?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        JwtKeys::from_ref(&AppState::fake())
    }

    #[tokio::test]
    async fn sign_and_verify_roundtrip() {
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
    }

    #[tokio::test]
    async fn token_expiry_is_six_hours_from_issuance() {
        let keys = make_keys();
        let token = keys.sign(Uuid::new_v4()).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.exp - claims.iat, 6 * 3600);
    }

    #[tokio::test]
    async fn verify_rejects_wrong_secret() {
        let keys = make_keys();
        let other = JwtKeys::new("a-different-secret");
        let token = keys.sign(Uuid::new_v4()).expect("sign");
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn verify_rejects_malformed_token() {
        let keys = make_keys();
        assert!(matches!(keys.verify("not.a.token"), Err(AuthError::InvalidToken)));
        assert!(matches!(keys.verify(""), Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn verify_rejects_expired_token() {
        let keys = make_keys();
        // Expired well past the default validation leeway.
        let token = keys
            .sign_with_ttl(Uuid::new_v4(), Duration::hours(-2))
            .expect("sign");
        assert!(matches!(keys.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn verify_rejects_spliced_payload() {
        let keys = make_keys();
        let a = keys.sign(Uuid::new_v4()).expect("sign");
        let b = keys.sign(Uuid::new_v4()).expect("sign");
        let a_parts: Vec<&str> = a.split('.').collect();
        let b_parts: Vec<&str> = b.split('.').collect();
        // Payload of one token with the signature of another.
        let forged = format!("{}.{}.{}", a_parts[0], a_parts[1], b_parts[2]);
        assert!(matches!(keys.verify(&forged), Err(AuthError::InvalidToken)));
    }
}
