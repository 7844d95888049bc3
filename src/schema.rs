use sqlx::{migrate::Migrator, PgExecutor, PgPool};

use crate::food::repo_types::{Food, SugarIntake};
use crate::readings::repo_types::{Glucose, Weight};
use crate::users::repo_types::{Gender, User};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// A persistent entity backed by one table.
pub trait Table {
    const NAME: &'static str;
    /// Tables this one holds foreign keys into.
    const REFERENCES: &'static [&'static str] = &[];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub references: &'static [&'static str],
}

const fn def<T: Table>() -> TableDef {
    TableDef {
        name: T::NAME,
        references: T::REFERENCES,
    }
}

/// Every declared table, referenced tables first.
pub const TABLES: &[TableDef] = &[
    def::<Gender>(),
    def::<User>(),
    def::<Weight>(),
    def::<Glucose>(),
    def::<Food>(),
    def::<SugarIntake>(),
];

/// Creates every declared table. Migrations already applied are skipped.
pub async fn create_all(db: &PgPool) -> anyhow::Result<()> {
    MIGRATOR.run(db).await?;
    Ok(())
}

pub async fn row_count<'e>(db: impl PgExecutor<'e>, table: &TableDef) -> anyhow::Result<i64> {
    // table names come from TABLES, never from input
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table.name))
        .fetch_one(db)
        .await?;
    Ok(count)
}

pub async fn row_counts(db: &PgPool) -> anyhow::Result<Vec<(&'static str, i64)>> {
    let mut counts = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        counts.push((table.name, row_count(db, table).await?));
    }
    Ok(counts)
}
