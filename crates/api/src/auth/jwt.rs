//! JWT access-token issuing and verification.
//!
//! Tokens are HMAC-signed JWTs carrying a [`Claims`] payload. Verification
//! accepts only the HMAC family (HS256/HS384/HS512) and applies no clock-skew
//! leeway: a token whose `exp` is at or before the current second is expired.

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use notes_core::types::{DbId, Timestamp};

use crate::config::{env_or, ConfigError};

/// Default token lifetime in minutes.
pub const DEFAULT_TOKEN_LIFETIME_MINS: i64 = 30;
/// Longest accepted token lifetime (ten years) in minutes. Keeps `exp`
/// arithmetic and timestamp conversion well inside `i64`/chrono range.
pub const MAX_TOKEN_LIFETIME_MINS: i64 = 10 * 366 * 24 * 60;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's internal database id.
    pub id: DbId,
    /// The username at registration time.
    pub user_name: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// The verified contents of an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: DbId,
    pub username: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Configuration for token issuing and verification.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes (default: 30).
    pub token_lifetime_mins: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_lifetime_mins", &self.token_lifetime_mins)
            .finish()
    }
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `JWT_SECRET`              | **yes**  | --      |
    /// | `JWT_TOKEN_LIFETIME_MINS` | no       | `30`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`JwtConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let token_lifetime_mins = env_or(&lookup, "JWT_TOKEN_LIFETIME_MINS", DEFAULT_TOKEN_LIFETIME_MINS)?;

        Ok(Self {
            secret,
            token_lifetime_mins,
        })
    }
}

/// Errors from building a [`TokenManager`] or issuing/verifying tokens.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT secret must not be empty")]
    EmptySecret,

    #[error("Token lifetime must be between 1 and {max} minutes, got {0}", max = MAX_TOKEN_LIFETIME_MINS)]
    InvalidLifetime(i64),

    #[error("Failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    /// Any verification failure. The detail is for logs only.
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Issues and verifies access tokens with a fixed secret and lifetime.
///
/// Keys are derived once at construction. The manager is immutable and meant
/// to be shared behind an `Arc`.
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime_secs: i64,
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    pub fn new(config: JwtConfig) -> Result<Self, TokenError> {
        if config.secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }
        if !(1..=MAX_TOKEN_LIFETIME_MINS).contains(&config.token_lifetime_mins) {
            return Err(TokenError::InvalidLifetime(config.token_lifetime_mins));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            lifetime_secs: config.token_lifetime_mins * 60,
        })
    }

    /// Issue an HS256 token for the given user, expiring one lifetime from now.
    pub fn issue(&self, user_id: DbId, username: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            id: user_id,
            user_name: username.to_string(),
            iat: now,
            exp: now + self.lifetime_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Signing)
    }

    /// Verify signature, algorithm, and expiry, returning the embedded identity.
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))?
            .claims;

        // The library only rejects `exp < now`; a token is already dead at `exp`.
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::InvalidToken("token has expired".into()));
        }

        Ok(Identity {
            user_id: claims.id,
            username: claims.user_name,
            issued_at: to_timestamp(claims.iat, "iat")?,
            expires_at: to_timestamp(claims.exp, "exp")?,
        })
    }
}

fn to_timestamp(secs: i64, claim: &str) -> Result<Timestamp, TokenError> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| TokenError::InvalidToken(format!("{claim} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    /// `{"alg":"none","typ":"JWT"}`
    const NONE_HEADER: &str = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0";
    /// `{"alg":"RS256","typ":"JWT"}`
    const RS256_HEADER: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9";
    /// `{"id":1,"user_name":"alice","iat":1700000000,"exp":4102444800}`
    const FAR_FUTURE_PAYLOAD: &str =
        "eyJpZCI6MSwidXNlcl9uYW1lIjoiYWxpY2UiLCJpYXQiOjE3MDAwMDAwMDAsImV4cCI6NDEwMjQ0NDgwMH0";

    fn manager() -> TokenManager {
        TokenManager::new(JwtConfig {
            secret: SECRET.to_string(),
            token_lifetime_mins: 30,
        })
        .expect("valid config")
    }

    fn sign(header: Header, payload: &serde_json::Value) -> String {
        encode(&header, payload, &EncodingKey::from_secret(SECRET.as_bytes()))
            .expect("encoding should succeed")
    }

    #[test]
    fn issued_token_verifies() {
        let tokens = manager();
        let token = tokens.issue(42, "alice").expect("issue should succeed");

        let identity = tokens.verify(&token).expect("verify should succeed");
        assert_eq!(identity.user_id, 42);
        assert_eq!(identity.username, "alice");
        assert_eq!(
            (identity.expires_at - identity.issued_at).num_minutes(),
            30,
            "lifetime is applied from the issue time"
        );
    }

    #[test]
    fn token_from_other_secret_rejected() {
        let other = TokenManager::new(JwtConfig {
            secret: "secret-bravo".to_string(),
            token_lifetime_mins: 30,
        })
        .unwrap();
        let token = other.issue(1, "alice").unwrap();

        assert_matches!(manager().verify(&token), Err(TokenError::InvalidToken(_)));
    }

    #[test]
    fn expired_token_rejected() {
        let now = Utc::now().timestamp();
        let token = sign(
            Header::default(),
            &json!({"id": 1, "user_name": "alice", "iat": now - 600, "exp": now - 1}),
        );
        assert_matches!(manager().verify(&token), Err(TokenError::InvalidToken(_)));
    }

    #[test]
    fn token_expiring_this_second_rejected() {
        let now = Utc::now().timestamp();
        let token = sign(
            Header::default(),
            &json!({"id": 1, "user_name": "alice", "iat": now - 600, "exp": now}),
        );
        assert_matches!(manager().verify(&token), Err(TokenError::InvalidToken(_)));
    }

    #[test]
    fn other_hmac_algorithms_accepted() {
        let now = Utc::now().timestamp();
        let payload = json!({"id": 7, "user_name": "bob", "iat": now, "exp": now + 600});

        for alg in [Algorithm::HS384, Algorithm::HS512] {
            let token = sign(Header::new(alg), &payload);
            let identity = manager().verify(&token).expect("HMAC family is accepted");
            assert_eq!(identity.user_id, 7);
        }
    }

    #[test]
    fn unsigned_token_rejected() {
        let token = format!("{NONE_HEADER}.{FAR_FUTURE_PAYLOAD}.");
        assert_matches!(manager().verify(&token), Err(TokenError::InvalidToken(_)));
    }

    #[test]
    fn asymmetric_algorithm_rejected() {
        let token = format!("{RS256_HEADER}.{FAR_FUTURE_PAYLOAD}.c2lnbmF0dXJl");
        assert_matches!(manager().verify(&token), Err(TokenError::InvalidToken(_)));
    }

    #[test]
    fn missing_or_mistyped_claims_rejected() {
        let now = Utc::now().timestamp();
        let missing_name = sign(
            Header::default(),
            &json!({"id": 1, "iat": now, "exp": now + 600}),
        );
        let string_id = sign(
            Header::default(),
            &json!({"id": "1", "user_name": "alice", "iat": now, "exp": now + 600}),
        );

        assert_matches!(manager().verify(&missing_name), Err(TokenError::InvalidToken(_)));
        assert_matches!(manager().verify(&string_id), Err(TokenError::InvalidToken(_)));
    }

    #[test]
    fn garbage_rejected() {
        for token in ["", "not-a-token", "a.b.c"] {
            assert_matches!(manager().verify(token), Err(TokenError::InvalidToken(_)));
        }
    }

    #[test]
    fn empty_secret_refused() {
        let result = TokenManager::new(JwtConfig {
            secret: String::new(),
            token_lifetime_mins: 30,
        });
        assert_matches!(result, Err(TokenError::EmptySecret));
    }

    #[test]
    fn out_of_range_lifetime_refused() {
        for mins in [0, -5, MAX_TOKEN_LIFETIME_MINS + 1, i64::MAX / 60, i64::MAX] {
            let result = TokenManager::new(JwtConfig {
                secret: SECRET.to_string(),
                token_lifetime_mins: mins,
            });
            assert_matches!(result, Err(TokenError::InvalidLifetime(m)) if m == mins);
        }
    }

    #[test]
    fn longest_lifetime_still_issues_verifiable_tokens() {
        let tokens = TokenManager::new(JwtConfig {
            secret: SECRET.to_string(),
            token_lifetime_mins: MAX_TOKEN_LIFETIME_MINS,
        })
        .unwrap();
        let token = tokens.issue(5, "erin").unwrap();
        assert_eq!(tokens.verify(&token).unwrap().user_id, 5);
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = JwtConfig {
            secret: SECRET.to_string(),
            token_lifetime_mins: 30,
        };
        assert!(!format!("{config:?}").contains(SECRET));
        assert!(!format!("{:?}", TokenManager::new(config).unwrap()).contains(SECRET));
    }

    #[test]
    fn config_requires_secret() {
        let result = JwtConfig::from_lookup(|_| None);
        assert_matches!(result, Err(ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn config_defaults_lifetime() {
        let config = JwtConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some("s3cret".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.token_lifetime_mins, DEFAULT_TOKEN_LIFETIME_MINS);
    }
}
