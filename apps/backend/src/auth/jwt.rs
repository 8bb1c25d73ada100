use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Claims included in our backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Owning user's database id
    pub user_id: i64,
    pub email: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Mint an HS256 access token for the given user.
///
/// Expiry is `now + security.token_ttl`; the lifetime is deliberately
/// short and there is no refresh endpoint, so callers re-authenticate
/// after expiry. Tokens are never stored server-side and cannot be
/// revoked before they expire.
pub fn mint_access_token(
    user_id: i64,
    email: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let exp = iat + security.token_ttl.as_secs() as i64;

    let claims = Claims {
        user_id,
        email: email.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token's signature and expiry and return its claims.
///
/// Malformed structure, signature mismatch, and expiry all collapse into
/// the same `AppError::Unauthorized` so the response never acts as an
/// oracle for which check failed. The cause is logged at debug level only.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    // No grace period: a token one second past exp is invalid.
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(kind = ?e.kind(), "token verification failed");
        AppError::unauthorized()
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{mint_access_token, verify_access_token};
    use crate::error::AppError;
    use crate::state::security_config::SecurityConfig;

    fn test_security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn mint_and_verify_roundtrip() {
        let security = test_security();
        let now = SystemTime::now();

        let token = mint_access_token(42, "reader@example.com", now, &security).unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "reader@example.com");
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(
            claims.exp,
            claims.iat + security.token_ttl.as_secs() as i64
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let security = test_security();
        // Minted 20 minutes ago, so the 15-minute token is past exp.
        let then = SystemTime::now() - Duration::from_secs(20 * 60);

        let token = mint_access_token(7, "late@example.com", then, &security).unwrap();
        let result = verify_access_token(&token, &security);

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let security = test_security();
        let token = mint_access_token(7, "sig@example.com", SystemTime::now(), &security).unwrap();

        // Flip one byte inside the signature segment.
        let (head, sig) = token.rsplit_once('.').unwrap();
        let mut sig_bytes = sig.as_bytes().to_vec();
        sig_bytes[0] = if sig_bytes[0] == b'A' { b'B' } else { b'A' };
        let tampered = format!("{head}.{}", String::from_utf8(sig_bytes).unwrap());

        let result = verify_access_token(&tampered, &security);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn token_signed_with_other_key_is_rejected() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());

        let token =
            mint_access_token(7, "keys@example.com", SystemTime::now(), &security_a).unwrap();
        let result = verify_access_token(&token, &security_b);

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn garbage_token_is_rejected_with_same_error() {
        let security = test_security();
        let result = verify_access_token("definitely.not.a-jwt", &security);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn ttl_is_configurable() {
        let security = test_security().with_token_ttl(Duration::from_secs(60));
        let now = SystemTime::now();

        let token = mint_access_token(1, "ttl@example.com", now, &security).unwrap();
        let claims = verify_access_token(&token, &security).unwrap();
        assert_eq!(claims.exp - claims.iat, 60);
    }
}
