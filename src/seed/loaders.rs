use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};

use crate::food::{Food, NewSugarIntake, SugarIntake};
use crate::readings::{Glucose, Weight};
use crate::schema::Table;
use crate::seed::fixtures::{GlucoseFixture, UserFixture, WeightFixture};
use crate::seed::SeedLoader;
use crate::users::{Gender, User};

const WEIGHT_BATCHES: [(&str, &[&str]); 3] = [
    ("weight_1", &["users"]),
    ("weight_2", &["users", "weight_1"]),
    ("weight_3", &["users", "weight_2"]),
];

const GLUCOSE_BATCHES: [(&str, &[&str]); 3] = [
    ("glucose_1", &["users"]),
    ("glucose_2", &["users", "glucose_1"]),
    ("glucose_3", &["users", "glucose_2"]),
];

/// Move a serial sequence past rows inserted with explicit ids.
async fn advance_sequence<'e>(db: impl PgExecutor<'e>, table: &str, column: &str) -> anyhow::Result<()> {
    let sql = format!(
        "SELECT setval(pg_get_serial_sequence('{table}', '{column}'), \
         COALESCE((SELECT MAX({column}) FROM {table}), 0) + 1, false)"
    );
    sqlx::query(&sql).execute(db).await?;
    Ok(())
}

pub struct GenderLoader {
    pub rows: Vec<Gender>,
}

#[async_trait]
impl SeedLoader for GenderLoader {
    fn name(&self) -> &'static str {
        Gender::NAME
    }

    async fn load(&self, db: &PgPool) -> anyhow::Result<u64> {
        let mut tx = db.begin().await?;
        for gender in &self.rows {
            Gender::insert(&mut *tx, gender).await?;
        }
        tx.commit().await?;
        Ok(self.rows.len() as u64)
    }
}

pub struct UserLoader {
    pub rows: Vec<UserFixture>,
}

#[async_trait]
impl SeedLoader for UserLoader {
    fn name(&self) -> &'static str {
        User::NAME
    }

    fn depends_on(&self) -> &[&'static str] {
        &[Gender::NAME]
    }

    async fn load(&self, db: &PgPool) -> anyhow::Result<u64> {
        let mut tx = db.begin().await?;
        for user in &self.rows {
            User::insert_with_id(&mut *tx, user.user_id, &user.to_new_user()).await?;
        }
        advance_sequence(&mut *tx, User::NAME, "user_id").await?;
        tx.commit().await?;
        Ok(self.rows.len() as u64)
    }
}

pub struct FoodLoader {
    pub rows: Vec<Food>,
}

#[async_trait]
impl SeedLoader for FoodLoader {
    fn name(&self) -> &'static str {
        Food::NAME
    }

    async fn load(&self, db: &PgPool) -> anyhow::Result<u64> {
        let mut tx = db.begin().await?;
        for food in &self.rows {
            Food::insert_with_id(&mut *tx, food).await?;
        }
        advance_sequence(&mut *tx, Food::NAME, "food_id").await?;
        tx.commit().await?;
        Ok(self.rows.len() as u64)
    }
}

pub struct SugarIntakeLoader {
    pub rows: Vec<NewSugarIntake>,
}

#[async_trait]
impl SeedLoader for SugarIntakeLoader {
    fn name(&self) -> &'static str {
        SugarIntake::NAME
    }

    fn depends_on(&self) -> &[&'static str] {
        &[User::NAME, Food::NAME]
    }

    async fn load(&self, db: &PgPool) -> anyhow::Result<u64> {
        let mut tx = db.begin().await?;
        for intake in &self.rows {
            SugarIntake::record(&mut *tx, intake).await?;
        }
        tx.commit().await?;
        Ok(self.rows.len() as u64)
    }
}

pub struct WeightLoader {
    name: &'static str,
    depends_on: &'static [&'static str],
    rows: Vec<WeightFixture>,
}

impl WeightLoader {
    /// One loader per batch, each ordered after the one before it.
    pub fn batches(batches: [Vec<WeightFixture>; 3]) -> Vec<WeightLoader> {
        WEIGHT_BATCHES
            .into_iter()
            .zip(batches)
            .map(|((name, depends_on), rows)| WeightLoader {
                name,
                depends_on,
                rows,
            })
            .collect()
    }
}

#[async_trait]
impl SeedLoader for WeightLoader {
    fn name(&self) -> &'static str {
        self.name
    }

    fn depends_on(&self) -> &[&'static str] {
        self.depends_on
    }

    async fn load(&self, db: &PgPool) -> anyhow::Result<u64> {
        let mut tx = db.begin().await?;
        for w in &self.rows {
            Weight::record(&mut *tx, w.user_id, w.current_weight, w.recorded_at).await?;
        }
        tx.commit().await?;
        Ok(self.rows.len() as u64)
    }
}

pub struct GlucoseLoader {
    name: &'static str,
    depends_on: &'static [&'static str],
    rows: Vec<GlucoseFixture>,
}

impl GlucoseLoader {
    pub fn batches(batches: [Vec<GlucoseFixture>; 3]) -> Vec<GlucoseLoader> {
        GLUCOSE_BATCHES
            .into_iter()
            .zip(batches)
            .map(|((name, depends_on), rows)| GlucoseLoader {
                name,
                depends_on,
                rows,
            })
            .collect()
    }
}

#[async_trait]
impl SeedLoader for GlucoseLoader {
    fn name(&self) -> &'static str {
        self.name
    }

    fn depends_on(&self) -> &[&'static str] {
        self.depends_on
    }

    async fn load(&self, db: &PgPool) -> anyhow::Result<u64> {
        let mut tx = db.begin().await?;
        for g in &self.rows {
            Glucose::record(&mut *tx, g.user_id, g.current_glucose, g.recorded_at).await?;
        }
        tx.commit().await?;
        Ok(self.rows.len() as u64)
    }
}
