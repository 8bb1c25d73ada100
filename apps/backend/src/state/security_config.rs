use std::time::Duration;

use jsonwebtoken::Algorithm;

/// Default access-token lifetime. Deliberately short: there is no refresh
/// endpoint, callers re-authenticate after expiry.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Configuration for token signing and password hashing.
///
/// Owned by the process root and injected by reference into the token
/// codec and identity extractor; there is no ambient/static lookup.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Token signing algorithm (HS256)
    pub algorithm: Algorithm,
    /// Access-token lifetime
    pub token_ttl: Duration,
    /// bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given secret and defaults for
    /// everything else.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        // Cost 4 is the lowest bcrypt accepts and keeps the test suite
        // fast; main.rs always constructs its config explicitly.
        Self::new(b"default_secret_for_tests_only".to_vec()).with_bcrypt_cost(4)
    }
}
