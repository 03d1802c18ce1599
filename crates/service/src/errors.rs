use thiserror::Error;

/// Failures surfaced by repositories and services.
///
/// Lookup misses are not errors: they come back as `Ok(None)`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn db(err: impl std::fmt::Display) -> Self { Self::Db(err.to_string()) }
}
