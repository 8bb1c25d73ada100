//! SeaORM adapters. Functions here speak `DbErr`; the repos layer maps
//! that to `DomainError` via `infra::db_errors::map_db_err`.

pub mod posts_sea;
pub mod users_sea;
