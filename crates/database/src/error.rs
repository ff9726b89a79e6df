use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Seeding failed while {stage}: {source}")]
    SeedFailed {
        stage: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("The requested data was not found in the database.")]
    NotFound,
}
