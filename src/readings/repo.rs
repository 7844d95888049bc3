use sqlx::PgExecutor;
use time::OffsetDateTime;

use crate::readings::repo_types::{Glucose, Weight};

impl Weight {
    pub async fn record<'e>(
        db: impl PgExecutor<'e>,
        user_id: i32,
        current_weight: i32,
        recorded_at: OffsetDateTime,
    ) -> anyhow::Result<Weight> {
        let row = sqlx::query_as::<_, Weight>(
            r#"
            INSERT INTO weight (user_id, current_weight, recorded_at)
            VALUES ($1, $2, $3)
            RETURNING weight_id, user_id, current_weight, recorded_at
            "#,
        )
        .bind(user_id)
        .bind(current_weight)
        .bind(recorded_at)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Readings for one user, oldest first.
    pub async fn list_by_user<'e>(db: impl PgExecutor<'e>, user_id: i32) -> anyhow::Result<Vec<Weight>> {
        let rows = sqlx::query_as::<_, Weight>(
            r#"
            SELECT weight_id, user_id, current_weight, recorded_at
            FROM weight
            WHERE user_id = $1
            ORDER BY recorded_at ASC, weight_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

impl Glucose {
    pub async fn record<'e>(
        db: impl PgExecutor<'e>,
        user_id: i32,
        current_glucose: i32,
        recorded_at: OffsetDateTime,
    ) -> anyhow::Result<Glucose> {
        let row = sqlx::query_as::<_, Glucose>(
            r#"
            INSERT INTO glucose (user_id, current_glucose, recorded_at)
            VALUES ($1, $2, $3)
            RETURNING glucose_id, user_id, current_glucose, recorded_at
            "#,
        )
        .bind(user_id)
        .bind(current_glucose)
        .bind(recorded_at)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Readings for one user, oldest first.
    pub async fn list_by_user<'e>(db: impl PgExecutor<'e>, user_id: i32) -> anyhow::Result<Vec<Glucose>> {
        let rows = sqlx::query_as::<_, Glucose>(
            r#"
            SELECT glucose_id, user_id, current_glucose, recorded_at
            FROM glucose
            WHERE user_id = $1
            ORDER BY recorded_at ASC, glucose_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
