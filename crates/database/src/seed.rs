use crate::connection::create_tables;
use crate::error::DbError;
use crate::repository::{TableCounts, count_tables};
use crate::seed_data::{ATTRIBUTES, CHOICES, DETAILS, QUESTIONS, TREATMENTS};
use sqlx::{SqliteConnection, SqlitePool};

/// What `initialize` found and did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and now holds the fixed content.
    Seeded(TableCounts),
    /// The store already had treatments; nothing was written.
    AlreadySeeded(TableCounts),
}

impl SeedOutcome {
    pub fn counts(&self) -> TableCounts {
        match self {
            SeedOutcome::Seeded(counts) | SeedOutcome::AlreadySeeded(counts) => *counts,
        }
    }
}

fn failed(stage: &'static str) -> impl FnOnce(sqlx::Error) -> DbError {
    move |source| DbError::SeedFailed { stage, source }
}

/// Creates the schema and, if no treatment exists yet, inserts the fixed seed content.
///
/// Everything runs in one transaction, including the emptiness check, so an
/// interrupted or failed seed leaves no rows behind. SQLite allows a single
/// writer, so a second process seeding at the same moment fails with an error
/// instead of inserting a duplicate set.
pub async fn initialize(pool: &SqlitePool) -> Result<SeedOutcome, DbError> {
    let mut tx = pool.begin().await.map_err(failed("opening the seed transaction"))?;

    create_tables(&mut tx).await.map_err(failed("creating the schema"))?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM treatment_options")
        .fetch_one(&mut *tx)
        .await
        .map_err(failed("counting treatments"))?;

    if existing > 0 {
        let counts = count_tables(&mut tx).await.map_err(failed("counting rows"))?;
        tx.commit().await.map_err(failed("committing the schema"))?;
        tracing::info!(treatments = counts.treatments, "Store already seeded; skipping.");
        return Ok(SeedOutcome::AlreadySeeded(counts));
    }

    let treatment_ids = insert_treatments(&mut tx).await?;
    let attribute_ids = insert_attributes(&mut tx).await?;
    insert_details(&mut tx, &treatment_ids, &attribute_ids).await?;
    insert_questions(&mut tx, &treatment_ids).await?;

    let counts = count_tables(&mut tx).await.map_err(failed("counting rows"))?;
    tx.commit().await.map_err(failed("committing the seed"))?;

    tracing::info!(
        treatments = counts.treatments,
        attributes = counts.attributes,
        details = counts.details,
        questions = counts.questions,
        choices = counts.choices,
        "Seeded the store."
    );
    Ok(SeedOutcome::Seeded(counts))
}

async fn insert_treatments(conn: &mut SqliteConnection) -> Result<Vec<i64>, DbError> {
    let mut ids = Vec::with_capacity(TREATMENTS.len());
    for (name, brief_description) in TREATMENTS {
        let id = sqlx::query("INSERT INTO treatment_options (name, brief_description) VALUES (?, ?)")
            .bind(name)
            .bind(brief_description)
            .execute(&mut *conn)
            .await
            .map_err(failed("inserting treatments"))?
            .last_insert_rowid();
        ids.push(id);
    }
    Ok(ids)
}

async fn insert_attributes(conn: &mut SqliteConnection) -> Result<Vec<i64>, DbError> {
    let mut ids = Vec::with_capacity(ATTRIBUTES.len());
    for (name, order_index) in ATTRIBUTES {
        let id = sqlx::query("INSERT INTO attributes (name, order_index) VALUES (?, ?)")
            .bind(name)
            .bind(order_index)
            .execute(&mut *conn)
            .await
            .map_err(failed("inserting attributes"))?
            .last_insert_rowid();
        ids.push(id);
    }
    Ok(ids)
}

async fn insert_details(
    conn: &mut SqliteConnection,
    treatment_ids: &[i64],
    attribute_ids: &[i64],
) -> Result<(), DbError> {
    for (treatment_id, rows) in treatment_ids.iter().zip(DETAILS) {
        for (attribute_id, (pros_text, cons_text)) in attribute_ids.iter().zip(rows) {
            sqlx::query(
                r#"
                INSERT INTO treatment_details (treatment_id, attribute_id, pros_text, cons_text)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(*treatment_id)
            .bind(*attribute_id)
            .bind(pros_text)
            .bind(cons_text)
            .execute(&mut *conn)
            .await
            .map_err(failed("inserting treatment details"))?;
        }
    }
    Ok(())
}

async fn insert_questions(conn: &mut SqliteConnection, treatment_ids: &[i64]) -> Result<(), DbError> {
    for treatment_id in treatment_ids {
        for (order_index, text) in (1_i64..).zip(QUESTIONS) {
            let question_id = sqlx::query(
                "INSERT INTO understanding_questions (treatment_id, text, order_index) VALUES (?, ?, ?)",
            )
            .bind(*treatment_id)
            .bind(text)
            .bind(order_index)
            .execute(&mut *conn)
            .await
            .map_err(failed("inserting questions"))?
            .last_insert_rowid();

            for (label, score) in CHOICES {
                sqlx::query(
                    "INSERT INTO understanding_choices (question_id, label, score) VALUES (?, ?, ?)",
                )
                .bind(question_id)
                .bind(label)
                .bind(score)
                .execute(&mut *conn)
                .await
                .map_err(failed("inserting choices"))?;
            }
        }
    }
    Ok(())
}
