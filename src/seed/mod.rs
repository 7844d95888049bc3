//! Development seed data.
//!
//! Loaders declare which loaders must run before them. [`SeedPlan`] orders
//! them with a stable topological sort, so the declared order wins whenever
//! it already satisfies every dependency.

use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

pub mod fixtures;
pub mod loaders;

pub use fixtures::{FixtureError, Fixtures};

use loaders::{FoodLoader, GenderLoader, GlucoseLoader, SugarIntakeLoader, UserLoader, WeightLoader};

/// Inserts one batch of fixture rows and commits it.
#[async_trait]
pub trait SeedLoader: Send + Sync {
    fn name(&self) -> &'static str;

    fn depends_on(&self) -> &[&'static str] {
        &[]
    }

    /// Returns the number of rows inserted.
    async fn load(&self, db: &PgPool) -> anyhow::Result<u64>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeedPlanError {
    #[error("seed loader {0:?} declared more than once")]
    Duplicate(&'static str),
    #[error("seed loader {loader:?} depends on unknown loader {dependency:?}")]
    UnknownDependency {
        loader: &'static str,
        dependency: &'static str,
    },
    #[error("seed loaders form a dependency cycle: {0:?}")]
    Cycle(Vec<&'static str>),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// `(loader, rows inserted)` in execution order.
    pub batches: Vec<(&'static str, u64)>,
}

pub struct SeedPlan {
    loaders: Vec<Box<dyn SeedLoader>>,
}

impl std::fmt::Debug for SeedPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl SeedPlan {
    pub fn new(loaders: Vec<Box<dyn SeedLoader>>) -> Result<Self, SeedPlanError> {
        let mut index = HashMap::with_capacity(loaders.len());
        for (i, loader) in loaders.iter().enumerate() {
            if index.insert(loader.name(), i).is_some() {
                return Err(SeedPlanError::Duplicate(loader.name()));
            }
        }
        for loader in &loaders {
            if let Some(dep) = loader
                .depends_on()
                .iter()
                .find(|dep| !index.contains_key(*dep))
            {
                return Err(SeedPlanError::UnknownDependency {
                    loader: loader.name(),
                    dependency: *dep,
                });
            }
        }

        let mut placed = vec![false; loaders.len()];
        let mut order = Vec::with_capacity(loaders.len());
        while order.len() < loaders.len() {
            let next = loaders.iter().enumerate().position(|(i, loader)| {
                !placed[i] && loader.depends_on().iter().all(|dep| placed[index[dep]])
            });
            match next {
                Some(i) => {
                    placed[i] = true;
                    order.push(i);
                }
                None => {
                    let stuck = loaders
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| !placed[*i])
                        .map(|(_, l)| l.name())
                        .collect();
                    return Err(SeedPlanError::Cycle(stuck));
                }
            }
        }

        let mut slots: Vec<Option<Box<dyn SeedLoader>>> = loaders.into_iter().map(Some).collect();
        let loaders = order
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect();
        Ok(Self { loaders })
    }

    /// Gender, users, food, sugar intake, then three weight and three glucose batches.
    pub fn development(fixtures: Fixtures) -> Result<Self, SeedPlanError> {
        let Fixtures {
            gender,
            users,
            food,
            sugar_consumption,
            weight,
            glucose,
        } = fixtures;

        let mut loaders: Vec<Box<dyn SeedLoader>> = vec![
            Box::new(GenderLoader { rows: gender }),
            Box::new(UserLoader { rows: users }),
            Box::new(FoodLoader { rows: food }),
            Box::new(SugarIntakeLoader {
                rows: sugar_consumption,
            }),
        ];
        for loader in WeightLoader::batches(weight) {
            loaders.push(Box::new(loader));
        }
        for loader in GlucoseLoader::batches(glucose) {
            loaders.push(Box::new(loader));
        }
        Self::new(loaders)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.loaders.iter().map(|l| l.name()).collect()
    }

    /// Runs every loader in order and stops at the first failure.
    pub async fn run(&self, db: &PgPool) -> anyhow::Result<SeedReport> {
        let mut report = SeedReport::default();
        for loader in &self.loaders {
            let name = loader.name();
            let rows = loader
                .load(db)
                .await
                .with_context(|| format!("seed loader {name}"))?;
            info!(loader = name, rows, "seed batch loaded");
            report.batches.push((name, rows));
        }
        Ok(report)
    }
}
