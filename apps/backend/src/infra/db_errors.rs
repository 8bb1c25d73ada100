//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it here so higher
//! layers only ever see `DomainError`. Detail strings are sanitized and
//! PII-safe.

use tracing::warn;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::redact;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column"
/// error messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let rest = error_msg
        .split("UNIQUE constraint failed: ")
        .nth(1)?;
    rest.split_whitespace().next()
}

/// Map a unique-violation site to the matching domain conflict.
fn map_unique_site_to_conflict(site: &str) -> Option<(ConflictKind, &'static str)> {
    if site.contains("users.email") || site.contains("users_email_key")
        || site.contains("idx_users_email_unique")
    {
        return Some((ConflictKind::UniqueEmail, "Email already registered"));
    }
    if site.contains("users.username") || site.contains("users_username_key")
        || site.contains("idx_users_username_unique")
    {
        return Some((ConflictKind::UniqueUsername, "Username already taken"));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %redact(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %redact(&error_msg), "Unique constraint violation");

        // SQLite names table.column; Postgres names the constraint.
        if let Some(site) = extract_sqlite_table_column(&error_msg) {
            if let Some((kind, detail)) = map_unique_site_to_conflict(site) {
                return DomainError::conflict(kind, detail);
            }
        }
        if let Some((kind, detail)) = map_unique_site_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") {
        warn!(trace_id = %trace_id, raw_error = %redact(&error_msg), "Foreign key constraint violation");
        return DomainError::validation("Foreign key constraint violation");
    }

    warn!(trace_id = %trace_id, raw_error = %redact(&error_msg), "Unmapped database error");
    DomainError::infra(InfraErrorKind::Other("Db".into()), "Database error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_unique_email_maps_to_email_conflict() {
        let err = sea_orm::DbErr::Custom(
            "Execution Error: UNIQUE constraint failed: users.email".to_string(),
        );
        let mapped = map_db_err(err);
        assert_eq!(
            mapped,
            DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered")
        );
    }

    #[test]
    fn sqlite_unique_username_maps_to_username_conflict() {
        let err = sea_orm::DbErr::Custom(
            "Execution Error: UNIQUE constraint failed: users.username".to_string(),
        );
        let mapped = map_db_err(err);
        assert_eq!(
            mapped,
            DomainError::conflict(ConflictKind::UniqueUsername, "Username already taken")
        );
    }

    #[test]
    fn postgres_constraint_name_maps_to_email_conflict() {
        let err = sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"idx_users_email_unique\""
                .to_string(),
        );
        let mapped = map_db_err(err);
        assert_eq!(
            mapped,
            DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered")
        );
    }

    #[test]
    fn unknown_unique_violation_falls_back_to_generic_conflict() {
        let err = sea_orm::DbErr::Custom("UNIQUE constraint failed: widgets.name".to_string());
        let mapped = map_db_err(err);
        assert!(matches!(
            mapped,
            DomainError::Conflict(ConflictKind::Other(_), _)
        ));
    }

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = sea_orm::DbErr::RecordNotFound("posts".to_string());
        assert!(matches!(map_db_err(err), DomainError::NotFound(_, _)));
    }
}
