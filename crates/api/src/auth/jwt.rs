//! Identity token issuance and validation.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. They are not
//! persisted: validity depends only on the signature, the timestamps and the
//! configured secret.

use bookstore_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// How long an issued token stays valid.
pub const TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's database id, as a decimal string.
    pub sub: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Not-before time (UTC Unix timestamp).
    pub nbf: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Failures from [`TokenService`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The signing secret is empty.
    #[error("secret is required")]
    Configuration,

    /// The identity id passed to [`TokenService::issue`] is unusable.
    #[error("{0}")]
    InvalidInput(String),

    /// Bad signature, unexpected algorithm, unparsable payload, or not yet valid.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// `now >= exp`.
    #[error("token expired")]
    TokenExpired,

    /// The encoder refused to sign the claims.
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Issues and validates identity tokens with a single HMAC secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    /// Same claim requirements as `validation`, signature check disabled.
    /// Only used to read `exp` before the signature is verified.
    unverified: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build a service around `secret`. An empty secret is rejected.
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::Configuration);
        }

        // Time-based checks are done by hand in `validate_at` so that expiry
        // and not-before map to distinct errors with zero leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp", "nbf"]);

        let mut unverified = validation.clone();
        unverified.insecure_disable_signature_validation();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            unverified,
        })
    }

    /// Issue a token for `user_id`, valid from now for 24 hours.
    pub fn issue(&self, user_id: DbId) -> Result<String, TokenError> {
        self.issue_at(user_id, chrono::Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (Unix seconds).
    pub fn issue_at(&self, user_id: DbId, now: i64) -> Result<String, TokenError> {
        if user_id == 0 {
            return Err(TokenError::InvalidInput("id is required".into()));
        }

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            nbf: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Validate `token` against the current time and return its subject.
    pub fn validate(&self, token: &str) -> Result<DbId, TokenError> {
        self.validate_at(token, chrono::Utc::now().timestamp())
    }

    /// Validate `token` as if the current time were `now` (Unix seconds).
    ///
    /// Expiry is checked before the signature: a token whose `exp` has
    /// passed is [`TokenError::TokenExpired`] even when it was signed with
    /// another secret. A payload that cannot be read at all is
    /// [`TokenError::InvalidToken`].
    pub fn validate_at(&self, token: &str, now: i64) -> Result<DbId, TokenError> {
        let unverified = decode::<Claims>(token, &self.decoding_key, &self.unverified)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))?
            .claims;
        if now >= unverified.exp {
            return Err(TokenError::TokenExpired);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))?
            .claims;

        if now < claims.nbf {
            return Err(TokenError::InvalidToken("token is not valid yet".into()));
        }

        claims
            .sub
            .parse::<DbId>()
            .map_err(|e| TokenError::InvalidToken(format!("subject is not an id: {e}")))
    }
}
