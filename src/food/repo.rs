use sqlx::PgExecutor;

use crate::food::repo_types::{Food, NewSugarIntake, SugarIntake, SugarIntakeEntry};

impl Food {
    pub async fn create<'e>(db: impl PgExecutor<'e>, name: &str, cost: i32) -> anyhow::Result<Food> {
        let food = sqlx::query_as::<_, Food>(
            r#"
            INSERT INTO food (name, cost)
            VALUES ($1, $2)
            RETURNING food_id, name, cost
            "#,
        )
        .bind(name)
        .bind(cost)
        .fetch_one(db)
        .await?;
        Ok(food)
    }

    pub(crate) async fn insert_with_id<'e>(db: impl PgExecutor<'e>, food: &Food) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO food (food_id, name, cost)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(food.food_id)
        .bind(&food.name)
        .bind(food.cost)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn find<'e>(db: impl PgExecutor<'e>, food_id: i32) -> anyhow::Result<Option<Food>> {
        let food = sqlx::query_as::<_, Food>(
            r#"
            SELECT food_id, name, cost
            FROM food
            WHERE food_id = $1
            "#,
        )
        .bind(food_id)
        .fetch_optional(db)
        .await?;
        Ok(food)
    }

    pub async fn list<'e>(db: impl PgExecutor<'e>) -> anyhow::Result<Vec<Food>> {
        let rows = sqlx::query_as::<_, Food>(
            r#"
            SELECT food_id, name, cost
            FROM food
            ORDER BY name, food_id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

impl SugarIntake {
    pub async fn record<'e>(db: impl PgExecutor<'e>, new: &NewSugarIntake) -> anyhow::Result<SugarIntake> {
        let row = sqlx::query_as::<_, SugarIntake>(
            r#"
            INSERT INTO sugar_consumption (user_id, food_id, consumed_at, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING consumption_id, user_id, food_id, consumed_at, notes
            "#,
        )
        .bind(new.user_id)
        .bind(new.food_id)
        .bind(new.consumed_at)
        .bind(&new.notes)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Intake events for one user, oldest first, each carrying the catalog cost.
    pub async fn list_by_user<'e>(
        db: impl PgExecutor<'e>,
        user_id: i32,
    ) -> anyhow::Result<Vec<SugarIntakeEntry>> {
        let rows = sqlx::query_as::<_, SugarIntakeEntry>(
            r#"
            SELECT s.consumption_id, s.user_id, s.food_id, f.name AS food_name, f.cost,
                   s.consumed_at, s.notes
            FROM sugar_consumption s
            JOIN food f ON f.food_id = s.food_id
            WHERE s.user_id = $1
            ORDER BY s.consumed_at ASC, s.consumption_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
