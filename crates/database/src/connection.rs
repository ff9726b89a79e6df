use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

/// Table definitions, in dependency order.
const SCHEMA: [&str; 5] = [
    r#"
    CREATE TABLE IF NOT EXISTS treatment_options (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(100) NOT NULL,
        brief_description TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attributes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(100) NOT NULL,
        order_index INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS treatment_details (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        treatment_id INTEGER NOT NULL REFERENCES treatment_options (id),
        attribute_id INTEGER NOT NULL REFERENCES attributes (id),
        pros_text TEXT,
        cons_text TEXT,
        UNIQUE (treatment_id, attribute_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS understanding_questions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        treatment_id INTEGER NOT NULL REFERENCES treatment_options (id),
        text TEXT NOT NULL,
        order_index INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS understanding_choices (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        question_id INTEGER NOT NULL REFERENCES understanding_questions (id),
        label VARCHAR(100) NOT NULL,
        score INTEGER NOT NULL
    )
    "#,
];

/// Establishes a connection pool to the SQLite store.
///
/// The database file is created if it does not exist. An in-memory store lives
/// only as long as its connection, so such pools are pinned to a single
/// connection that is never reaped.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .map_err(|e| DbError::ConnectionConfigError(format!("'{}': {e}", settings.url)))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if settings.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(settings.max_connections)
    };

    let pool = pool_options
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    tracing::debug!(url = %settings.url, "Connected to the database.");
    Ok(pool)
}

/// Creates the five tables if they are absent, on one connection which may be
/// inside an open transaction.
pub(crate) async fn create_tables(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    Ok(())
}
