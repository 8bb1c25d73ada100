use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};

use crate::error::AppError;

/// Bearer token extracted from the Authorization header.
///
/// Only the `Bearer <token>` scheme is accepted. A missing header, another
/// scheme, or an empty token is rejected here, before any token
/// verification is attempted.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
}

/// Parse a raw Authorization header value into the bearer token it carries.
pub fn parse_bearer(header_value: &str) -> Result<&str, AppError> {
    let parts: Vec<&str> = header_value.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return Err(AppError::unauthorized());
    }

    let token = parts[1];
    if token.is_empty() {
        return Err(AppError::unauthorized());
    }

    Ok(token)
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .ok_or_else(AppError::unauthorized)?;

            let auth_value = auth_header.to_str().map_err(|_| AppError::unauthorized())?;

            let token = parse_bearer(auth_value)?;

            Ok(AuthToken {
                token: token.to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::parse_bearer;
    use crate::error::AppError;

    #[test]
    fn accepts_bearer_scheme() {
        assert_eq!(parse_bearer("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(matches!(
            parse_bearer("Basic abc123"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn rejects_empty_value() {
        assert!(matches!(parse_bearer(""), Err(AppError::Unauthorized)));
    }

    #[test]
    fn rejects_bare_scheme_and_extra_parts() {
        assert!(matches!(parse_bearer("Bearer"), Err(AppError::Unauthorized)));
        assert!(matches!(
            parse_bearer("Bearer a b"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn scheme_is_case_sensitive() {
        assert!(matches!(
            parse_bearer("bearer abc"),
            Err(AppError::Unauthorized)
        ));
    }
}
