use actix_web::dev::Payload;
use actix_web::{http::header, web, FromRequest, HttpRequest};
use serde::Serialize;

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::extractors::auth_token::parse_bearer;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Verified identity of the requesting user, decoded from the bearer
/// token. Lives only for the request being handled; nothing is cached or
/// shared across requests.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CurrentUser {
    pub user_id: i64,
    pub email: String,
}

/// Turn a raw Authorization header value into a verified identity.
///
/// Non-bearer schemes fail before the token codec is ever invoked; bearer
/// tokens that fail verification surface the same uniform `Unauthorized`.
pub fn identity_from_header(
    header_value: Option<&str>,
    security: &SecurityConfig,
) -> Result<CurrentUser, AppError> {
    let value = header_value.ok_or_else(AppError::unauthorized)?;
    let token = parse_bearer(value)?;
    let claims = verify_access_token(token, security)?;

    Ok(CurrentUser {
        user_id: claims.user_id,
        email: claims.email,
    })
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available".to_string()))?;

            let header_value = match req.headers().get(header::AUTHORIZATION) {
                Some(value) => Some(value.to_str().map_err(|_| AppError::unauthorized())?),
                None => None,
            };

            identity_from_header(header_value, &app_state.security)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::identity_from_header;
    use crate::auth::jwt::mint_access_token;
    use crate::error::AppError;
    use crate::state::security_config::SecurityConfig;

    fn test_security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn valid_bearer_token_yields_identity() {
        let security = test_security();
        let token =
            mint_access_token(5, "author@example.com", SystemTime::now(), &security).unwrap();

        let identity =
            identity_from_header(Some(&format!("Bearer {token}")), &security).unwrap();
        assert_eq!(identity.user_id, 5);
        assert_eq!(identity.email, "author@example.com");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let result = identity_from_header(None, &test_security());
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn basic_scheme_is_unauthorized() {
        let result = identity_from_header(Some("Basic abc123"), &test_security());
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn empty_header_is_unauthorized() {
        let result = identity_from_header(Some(""), &test_security());
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn forged_token_is_unauthorized() {
        let other = SecurityConfig::new("some-other-secret".as_bytes());
        let token =
            mint_access_token(5, "forger@example.com", SystemTime::now(), &other).unwrap();

        let result = identity_from_header(Some(&format!("Bearer {token}")), &test_security());
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
