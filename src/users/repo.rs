use sqlx::PgExecutor;
use tracing::debug;

use crate::users::{
    is_valid_email, normalize_email,
    password::{hash_password, verify_password},
    repo_types::{Gender, NewUser, User},
};

impl Gender {
    pub async fn list<'e>(db: impl PgExecutor<'e>) -> anyhow::Result<Vec<Gender>> {
        let rows = sqlx::query_as::<_, Gender>(
            r#"
            SELECT gender_code, allowance
            FROM gender
            ORDER BY gender_code
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find<'e>(db: impl PgExecutor<'e>, code: &str) -> anyhow::Result<Option<Gender>> {
        let row = sqlx::query_as::<_, Gender>(
            r#"
            SELECT gender_code, allowance
            FROM gender
            WHERE gender_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn insert<'e>(db: impl PgExecutor<'e>, gender: &Gender) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO gender (gender_code, allowance)
            VALUES ($1, $2)
            "#,
        )
        .bind(&gender.gender_code)
        .bind(gender.allowance)
        .execute(db)
        .await?;
        Ok(())
    }
}

impl User {
    pub async fn find_by_id<'e>(db: impl PgExecutor<'e>, user_id: i32) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, phone, password_hash, gender_code, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email<'e>(db: impl PgExecutor<'e>, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, phone, password_hash, gender_code, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a user, storing an argon2 hash of the password.
    pub async fn create<'e>(db: impl PgExecutor<'e>, new: &NewUser) -> anyhow::Result<User> {
        let email = normalize_email(&new.email);
        if !is_valid_email(&email) {
            anyhow::bail!("invalid email: {}", new.email);
        }
        let password_hash = hash_password(&new.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, phone, password_hash, gender_code)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id, name, email, phone, password_hash, gender_code, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&email)
        .bind(&new.phone)
        .bind(&password_hash)
        .bind(&new.gender_code)
        .fetch_one(db)
        .await?;
        debug!(user_id = user.user_id, "user created");
        Ok(user)
    }

    /// Insert with a caller-chosen id. Used by fixtures that reference users by id.
    pub(crate) async fn insert_with_id<'e>(
        db: impl PgExecutor<'e>,
        user_id: i32,
        new: &NewUser,
    ) -> anyhow::Result<()> {
        let password_hash = hash_password(&new.password)?;
        sqlx::query(
            r#"
            INSERT INTO users (user_id, name, email, phone, password_hash, gender_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user_id)
        .bind(&new.name)
        .bind(normalize_email(&new.email))
        .bind(&new.phone)
        .bind(&password_hash)
        .bind(&new.gender_code)
        .execute(db)
        .await?;
        Ok(())
    }

    pub fn verify_password(&self, plain: &str) -> anyhow::Result<bool> {
        Ok(verify_password(plain, &self.password_hash)?)
    }
}
