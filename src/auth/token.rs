//! HS256 bearer tokens.
//!
//! Tokens are opaque signed credentials carrying the subject identity,
//! issue time, and a fixed validity window. Nothing is stored server-side;
//! validity is determined entirely by signature and expiry at
//! verification time.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identity (username).
    pub sub: String,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

/// Issues and verifies bearer tokens with a shared HS256 secret.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Creates an issuer from the signing secret and validity window.
    #[must_use]
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is the contract; no grace period.
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    /// Issues a token for `subject`, valid for the configured window.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if signing fails.
    pub fn issue(&self, subject: &str) -> Result<String, GatewayError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| GatewayError::Internal(format!("token signing failed: {e}")))
    }

    /// Verifies signature and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Forbidden`] for any invalid, tampered, or
    /// expired token.
    pub fn verify(&self, token: &str) -> Result<Claims, GatewayError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| GatewayError::Forbidden(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let issuer = TokenIssuer::new("test-secret", 60);
        let Ok(token) = issuer.issue("dana") else {
            panic!("issue should succeed");
        };
        let Ok(claims) = issuer.verify(&token) else {
            panic!("verify should succeed");
        };
        assert_eq!(claims.sub, "dana");
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn tampered_token_is_forbidden() {
        let issuer = TokenIssuer::new("test-secret", 60);
        let Ok(token) = issuer.issue("dana") else {
            panic!("issue should succeed");
        };
        let tampered = format!("{token}x");
        assert!(matches!(
            issuer.verify(&tampered),
            Err(GatewayError::Forbidden(_))
        ));
    }

    #[test]
    fn wrong_secret_is_forbidden() {
        let issuer = TokenIssuer::new("test-secret", 60);
        let other = TokenIssuer::new("other-secret", 60);
        let Ok(token) = issuer.issue("dana") else {
            panic!("issue should succeed");
        };
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_forbidden() {
        // Negative TTL puts the expiry in the past; leeway is zero.
        let issuer = TokenIssuer::new("test-secret", -30);
        let Ok(token) = issuer.issue("dana") else {
            panic!("issue should succeed");
        };
        assert!(matches!(
            issuer.verify(&token),
            Err(GatewayError::Forbidden(_))
        ));
    }
}
