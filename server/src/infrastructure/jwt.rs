use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

/// Bearer-token claims: the acting user plus expiry bookkeeping. The id is
/// what the policy layer consumes; the username is carried for log context.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

/// HS256 issuer/verifier. Both keys are derived from the secret up front;
/// the secret itself is not retained.
pub(crate) struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    const DEFAULT_TTL_SECONDS: i64 = 24 * 60 * 60;
    const LEEWAY_SECONDS: u64 = 10;

    pub(crate) fn new(secret: &str, ttl_seconds: i64) -> Self {
        let ttl = if ttl_seconds > 0 {
            Duration::seconds(ttl_seconds)
        } else {
            Duration::seconds(Self::DEFAULT_TTL_SECONDS)
        };

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub(crate) fn issue_token(&self, user_id: i64, username: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(JwtError::Encode)
    }

    pub(crate) fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = Self::LEEWAY_SECONDS;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(JwtError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::JwtService;

    #[test]
    fn issued_token_verifies_round_trip() {
        let jwt = JwtService::new("0123456789abcdef0123456789abcdef", 60);
        let token = jwt.issue_token(42, "someone").expect("must encode");

        let claims = jwt.verify_token(&token).expect("must verify");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "someone");
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let jwt = JwtService::new("0123456789abcdef0123456789abcdef", 60);
        let other = JwtService::new("fedcba9876543210fedcba9876543210", 60);
        let token = other.issue_token(42, "someone").expect("must encode");

        assert!(jwt.verify_token(&token).is_err());
    }

    #[test]
    fn non_positive_ttl_falls_back_to_default() {
        let jwt = JwtService::new("0123456789abcdef0123456789abcdef", 0);
        let token = jwt.issue_token(1, "someone").expect("must encode");

        let claims = jwt.verify_token(&token).expect("must verify");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }
}
