use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::error::{DatabaseError, ErrorKind};
use tokio::sync::RwLock;

use crate::user::{
    repo_types::{Credentials, User, STATE_ACTIVE},
    store::UserStore,
};

/// What PostgreSQL reports when `account` is already taken.
#[derive(Debug, thiserror::Error)]
#[error("duplicate key value violates unique constraint \"user_account_key\"")]
pub(crate) struct UniqueViolation;

impl DatabaseError for UniqueViolation {
    fn message(&self) -> &str {
        "duplicate key value violates unique constraint \"user_account_key\""
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("23505"))
    }

    fn constraint(&self) -> Option<&str> {
        Some("user_account_key")
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::UniqueViolation
    }
}

/// In-process stand-in for the `user` table.
#[derive(Clone, Default)]
pub(crate) struct MemoryUserStore {
    rows: Arc<RwLock<BTreeMap<i64, User>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryUserStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail like a dropped connection.
    pub(crate) fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Raw row, including the stored hash.
    pub(crate) async fn row(&self, id: i64) -> Option<User> {
        self.rows.read().await.get(&id).cloned()
    }

    pub(crate) async fn set_state(&self, id: i64, state: i16) {
        if let Some(user) = self.rows.write().await.get_mut(&id) {
            user.state = state;
        }
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_active(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        self.check()?;
        Ok(self
            .rows
            .read()
            .await
            .get(&id)
            .filter(|u| u.state == STATE_ACTIVE)
            .map(|u| User {
                account: u.account.clone(),
                name: u.name.clone(),
                role: u.role.clone(),
                ..Default::default()
            }))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
        self.check()?;
        Ok(self
            .rows
            .read()
            .await
            .values()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|u| User {
                password: String::new(),
                state: 0,
                ..u.clone()
            })
            .collect())
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        self.check()?;
        Ok(self.rows.read().await.len() as i64)
    }

    async fn insert(&self, user: &User) -> Result<i64, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.write().await;
        if rows.values().any(|u| u.account == user.account) {
            return Err(sqlx::Error::Database(Box::new(UniqueViolation)));
        }
        let id = rows.keys().next_back().map_or(1, |last| last + 1);
        rows.insert(
            id,
            User {
                id,
                state: STATE_ACTIVE,
                ..user.clone()
            },
        );
        Ok(id)
    }

    async fn find_credentials(&self, account: &str) -> Result<Option<Credentials>, sqlx::Error> {
        self.check()?;
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|u| u.account == account)
            .map(|u| Credentials {
                id: u.id,
                password: u.password.clone(),
            }))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<u64, sqlx::Error> {
        self.check()?;
        match self.rows.write().await.get_mut(&id) {
            Some(user) => {
                user.password = password_hash.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
