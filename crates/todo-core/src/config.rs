//! Authentication configuration
//!
//! The signing key and password salt are process-wide settings injected at
//! startup rather than compiled-in constants, so they can be rotated and
//! replaced in tests.

use chrono::Duration;
use rand::Rng;

use crate::error::{Error, Result};

/// Environment variable holding the token signing key
pub const SIGNING_KEY_ENV: &str = "TODO_SIGNING_KEY";

/// Environment variable holding the password salt
pub const PASSWORD_SALT_ENV: &str = "TODO_PASSWORD_SALT";

/// Default token lifetime
pub const TOKEN_TTL_HOURS: i64 = 12;

const MIN_SIGNING_KEY_LEN: usize = 32;

/// Secrets and limits consumed by the authentication service.
#[derive(Clone)]
pub struct AuthConfig {
    pub signing_key: Vec<u8>,
    pub password_salt: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(signing_key: impl Into<Vec<u8>>, password_salt: impl Into<String>) -> Self {
        Self {
            signing_key: signing_key.into(),
            password_salt: password_salt.into(),
            token_ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Build the configuration from `TODO_SIGNING_KEY` and `TODO_PASSWORD_SALT`.
    ///
    /// A missing signing key is replaced by a random one for this process only,
    /// which means issued tokens will not survive a restart. A missing salt is an
    /// error because every stored digest depends on it.
    pub fn from_env() -> Result<Self> {
        let password_salt = match std::env::var(PASSWORD_SALT_ENV) {
            Ok(salt) if !salt.is_empty() => salt,
            _ => return Err(Error::config(format!("{} must be set", PASSWORD_SALT_ENV))),
        };

        let signing_key = match std::env::var(SIGNING_KEY_ENV) {
            Ok(key) if key.len() >= MIN_SIGNING_KEY_LEN => key.into_bytes(),
            Ok(key) if !key.is_empty() => {
                log::warn!(
                    "{} is shorter than {} characters. Consider using a longer key.",
                    SIGNING_KEY_ENV,
                    MIN_SIGNING_KEY_LEN
                );
                key.into_bytes()
            }
            _ => {
                log::warn!(
                    "{} not set. Generating random key. Tokens won't persist across restarts.",
                    SIGNING_KEY_ENV
                );
                let mut rng = rand::thread_rng();
                (0..64).map(|_| rng.gen::<u8>()).collect()
            }
        };

        Ok(Self::new(signing_key, password_salt))
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_key", &"<redacted>")
            .field("password_salt", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
