use async_trait::async_trait;
use sqlx::PgPool;

use crate::user::{
    repo_types::{Credentials, User, STATE_ACTIVE},
    store::UserStore,
};

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_active(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT account, name, role
            FROM "user"
            WHERE id = $1 AND state = $2
            "#,
        )
        .bind(id)
        .bind(STATE_ACTIVE)
        .fetch_optional(&self.db)
        .await
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, account, name, email, role, create_time, update_time
            FROM "user"
            ORDER BY id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM "user""#)
            .fetch_one(&self.db)
            .await?;
        Ok(total)
    }

    async fn insert(&self, user: &User) -> Result<i64, sqlx::Error> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO "user" (account, password, name, email, role, create_time, update_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&user.account)
        .bind(&user.password)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.role)
        .bind(user.create_time)
        .bind(user.update_time)
        .fetch_one(&self.db)
        .await?;
        Ok(id)
    }

    async fn find_credentials(&self, account: &str) -> Result<Option<Credentials>, sqlx::Error> {
        sqlx::query_as::<_, Credentials>(
            r#"
            SELECT id, password
            FROM "user"
            WHERE account = $1
            "#,
        )
        .bind(account)
        .fetch_optional(&self.db)
        .await
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(r#"UPDATE "user" SET password = $1 WHERE id = $2"#)
            .bind(password_hash)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
