//! Credential codec - signed, time-bounded bearer tokens
//!
//! Tokens are JWTs signed with a symmetric key. Only the HMAC-SHA2 family is
//! accepted on the way in; expiry is checked against an explicit `now` so the
//! validity window can be exercised deterministically.
//!
//! Claims carry Unix seconds, so a token is issued at `now` truncated to the
//! whole second and expires exactly `ttl` later.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::UserId;

/// Algorithm used when signing
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Algorithms accepted when verifying
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl Claims {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at
    }
}

/// Only the `alg` field, read as a plain string so names `jsonwebtoken`
/// cannot represent (`none`, made-up ones) still reach classification
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Encodes and verifies bearer tokens
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(signing_key: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
            ttl,
        }
    }

    /// Issue a token for `user_id` valid from now
    pub fn issue(&self, user_id: UserId) -> Result<String> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token for `user_id` valid on `[now, now + ttl)`, with `now`
    /// truncated to the second
    pub fn issue_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String> {
        let issued_at = now.trunc_subsecs(0);
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| Error::internal("token expiry out of range"))?;

        let claims = Claims {
            user_id,
            issued_at: issued_at.timestamp(),
            expires_at: expires_at.timestamp(),
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| Error::internal(format!("failed to sign token: {}", e)))
    }

    /// Verify a token against the current time
    pub fn parse(&self, token: &str) -> Result<Claims> {
        self.parse_at(token, Utc::now())
    }

    /// Verify signature and algorithm family, then check expiry against `now`
    pub fn parse_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        // Expiry lives in our own claim and is checked below
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| classify(e, token))?;

        if data.claims.is_expired_at(now) {
            return Err(Error::Expired);
        }

        Ok(data.claims)
    }
}

fn classify(err: jsonwebtoken::errors::Error, token: &str) -> Error {
    match err.kind() {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName => Error::InvalidSignature,
        ErrorKind::ExpiredSignature => Error::Expired,
        _ if names_foreign_algorithm(token) => Error::InvalidSignature,
        _ => Error::malformed(err.to_string()),
    }
}

/// True when the header decodes and its `alg` is outside the HMAC-SHA2 family
fn names_foreign_algorithm(token: &str) -> bool {
    let Some(segment) = token.split('.').next() else {
        return false;
    };
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(segment) else {
        return false;
    };
    let Ok(header) = serde_json::from_slice::<RawHeader>(&bytes) else {
        return false;
    };
    header
        .alg
        .parse::<Algorithm>()
        .map_or(true, |alg| !ACCEPTED_ALGORITHMS.contains(&alg))
}
