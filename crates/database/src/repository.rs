use crate::DbError;
use core_types::{
    Attribute, DetailMatrix, QuestionWithChoices, TreatmentDetail, TreatmentOption,
    UnderstandingChoice, UnderstandingQuestion,
};
use sqlx::{SqliteConnection, SqlitePool};

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

/// Row counts of the five tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub treatments: i64,
    pub attributes: i64,
    pub details: i64,
    pub questions: i64,
    pub choices: i64,
}

pub(crate) async fn count_tables(conn: &mut SqliteConnection) -> Result<TableCounts, sqlx::Error> {
    let (treatments, attributes, details, questions, choices) =
        sqlx::query_as::<_, (i64, i64, i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM treatment_options),
                (SELECT COUNT(*) FROM attributes),
                (SELECT COUNT(*) FROM treatment_details),
                (SELECT COUNT(*) FROM understanding_questions),
                (SELECT COUNT(*) FROM understanding_choices)
            "#,
        )
        .fetch_one(&mut *conn)
        .await?;

    Ok(TableCounts {
        treatments,
        attributes,
        details,
        questions,
        choices,
    })
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn table_counts(&self) -> Result<TableCounts, DbError> {
        let mut conn = self.pool.acquire().await?;
        Ok(count_tables(&mut conn).await?)
    }

    /// Fetches every treatment option in storage order.
    pub async fn get_all_treatments(&self) -> Result<Vec<TreatmentOption>, DbError> {
        let treatments = sqlx::query_as::<_, TreatmentOption>(
            "SELECT id, name, brief_description FROM treatment_options ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(treatments)
    }

    /// Fetches a single treatment, or `DbError::NotFound` if the id is unknown.
    pub async fn get_treatment(&self, treatment_id: i64) -> Result<TreatmentOption, DbError> {
        sqlx::query_as::<_, TreatmentOption>(
            "SELECT id, name, brief_description FROM treatment_options WHERE id = ?",
        )
        .bind(treatment_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }

    /// Fetches all comparison attributes in display order.
    pub async fn get_attributes(&self) -> Result<Vec<Attribute>, DbError> {
        let attributes = sqlx::query_as::<_, Attribute>(
            "SELECT id, name, order_index FROM attributes ORDER BY order_index, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(attributes)
    }

    /// Fetches the pros/cons rows belonging to one treatment.
    pub async fn get_details_for_treatment(
        &self,
        treatment_id: i64,
    ) -> Result<Vec<TreatmentDetail>, DbError> {
        let details = sqlx::query_as::<_, TreatmentDetail>(
            r#"
            SELECT id, treatment_id, attribute_id, pros_text, cons_text
            FROM treatment_details
            WHERE treatment_id = ?
            ORDER BY id
            "#,
        )
        .bind(treatment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(details)
    }

    pub async fn get_all_details(&self) -> Result<Vec<TreatmentDetail>, DbError> {
        let details = sqlx::query_as::<_, TreatmentDetail>(
            "SELECT id, treatment_id, attribute_id, pros_text, cons_text FROM treatment_details ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(details)
    }

    /// Builds the `(treatment, attribute) -> detail` matrix from every stored row.
    pub async fn get_detail_matrix(&self) -> Result<DetailMatrix, DbError> {
        Ok(self.get_all_details().await?.into_iter().collect())
    }

    /// Fetches a treatment's quiz questions in display order.
    pub async fn get_questions_for_treatment(
        &self,
        treatment_id: i64,
    ) -> Result<Vec<UnderstandingQuestion>, DbError> {
        let questions = sqlx::query_as::<_, UnderstandingQuestion>(
            r#"
            SELECT id, treatment_id, text, order_index
            FROM understanding_questions
            WHERE treatment_id = ?
            ORDER BY order_index, id
            "#,
        )
        .bind(treatment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    /// Fetches the answer options of one question, lowest score first.
    pub async fn get_choices_for_question(
        &self,
        question_id: i64,
    ) -> Result<Vec<UnderstandingChoice>, DbError> {
        let choices = sqlx::query_as::<_, UnderstandingChoice>(
            r#"
            SELECT id, question_id, label, score
            FROM understanding_choices
            WHERE question_id = ?
            ORDER BY score, id
            "#,
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(choices)
    }

    /// Fetches a treatment's questions, each paired with its choices.
    pub async fn get_questions_with_choices(
        &self,
        treatment_id: i64,
    ) -> Result<Vec<QuestionWithChoices>, DbError> {
        let questions = self.get_questions_for_treatment(treatment_id).await?;
        let mut result = Vec::with_capacity(questions.len());
        for question in questions {
            let choices = self.get_choices_for_question(question.id).await?;
            result.push(QuestionWithChoices { question, choices });
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{connect, initialize};
    use configuration::DatabaseSettings;

    async fn seeded_repo() -> DbRepository {
        let pool = connect(&DatabaseSettings::in_memory()).await.unwrap();
        initialize(&pool).await.unwrap();
        DbRepository::new(pool)
    }

    #[tokio::test]
    async fn unknown_treatment_is_not_found() {
        let repo = seeded_repo().await;
        for id in [0, 4, 99, -1] {
            assert!(matches!(repo.get_treatment(id).await, Err(DbError::NotFound)));
        }
        assert_eq!(repo.get_treatment(1).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn matrix_covers_exactly_the_stored_pairs() {
        let repo = seeded_repo().await;
        sqlx::query("DELETE FROM treatment_details WHERE treatment_id = 2 AND attribute_id = 4")
            .execute(repo.pool())
            .await
            .unwrap();

        let matrix = repo.get_detail_matrix().await.unwrap();
        let treatments = repo.get_all_treatments().await.unwrap();
        let attributes = repo.get_attributes().await.unwrap();

        assert_eq!(matrix.len(), 14);
        for treatment in &treatments {
            let stored = repo.get_details_for_treatment(treatment.id).await.unwrap();
            for attribute in &attributes {
                let has_row = stored.iter().any(|d| d.attribute_id == attribute.id);
                assert_eq!(matrix.contains(treatment.id, attribute.id), has_row);
            }
        }
        assert!(!matrix.contains(2, 4));
    }

    #[tokio::test]
    async fn attributes_follow_order_index() {
        let repo = seeded_repo().await;
        sqlx::query("INSERT INTO attributes (name, order_index) VALUES ('first', 0)")
            .execute(repo.pool())
            .await
            .unwrap();

        let attributes = repo.get_attributes().await.unwrap();
        assert_eq!(attributes[0].name, "first");
        assert_eq!(attributes.len(), 6);
    }

    #[tokio::test]
    async fn duplicate_detail_pair_is_rejected() {
        let repo = seeded_repo().await;
        let result = sqlx::query(
            "INSERT INTO treatment_details (treatment_id, attribute_id, pros_text) VALUES (1, 1, 'dup')",
        )
        .execute(repo.pool())
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn questions_come_with_ordered_choices() {
        let repo = seeded_repo().await;
        let questions = repo.get_questions_with_choices(1).await.unwrap();
        let orders: Vec<_> = questions.iter().map(|q| q.question.order_index).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert!(questions.iter().all(|q| q.question.treatment_id == 1));
        assert!(repo.get_questions_with_choices(42).await.unwrap().is_empty());
    }
}
