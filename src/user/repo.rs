//! All reads and writes of the `user` table go through [`UserRepository`].

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::auth::password::PasswordHasher;
use crate::user::{
    errors::UserError,
    repo_types::{Pagination, User, Users},
    store::UserStore,
};

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// Active user by id. Only `account`, `name` and `role` are loaded.
    #[instrument(skip(self))]
    pub async fn fetch_by_id(&self, id: i64) -> Result<User, UserError> {
        let user = self
            .store
            .find_active(id)
            .await
            .map_err(UserError::Query)?
            .ok_or(UserError::NotFound)?;
        debug!("user loaded");
        Ok(User { id, ..user })
    }

    /// One page of users, newest first, plus the total row count.
    ///
    /// The page and the count are separate statements and may disagree
    /// under concurrent writes.
    #[instrument(skip(self))]
    pub async fn list_page(
        &self,
        mut pagination: Pagination,
    ) -> Result<(Users, Pagination), UserError> {
        if pagination.page < 1 {
            return Err(UserError::InvalidPagination(format!(
                "page must be >= 1, got {}",
                pagination.page
            )));
        }
        if pagination.rows < 1 {
            return Err(UserError::InvalidPagination(format!(
                "rows must be >= 1, got {}",
                pagination.rows
            )));
        }

        let offset = pagination.offset().ok_or_else(|| {
            UserError::InvalidPagination(format!(
                "page {} with {} rows is out of range",
                pagination.page, pagination.rows
            ))
        })?;

        let users = self
            .store
            .list(pagination.rows, offset)
            .await
            .map_err(UserError::Query)?;
        pagination.total = self.store.count().await.map_err(UserError::Query)?;

        debug!(returned = users.len(), total = pagination.total, "page loaded");
        Ok((users, pagination))
    }

    /// Hash the password, insert the row and store the assigned id in `user.id`.
    #[instrument(skip(self, user), fields(account = %user.account))]
    pub async fn create(&self, user: &mut User) -> Result<i64, UserError> {
        user.password = self.hasher.hash(&user.password).map_err(UserError::Hashing)?;

        let id = self.store.insert(user).await.map_err(UserError::Storage)?;
        user.id = id;

        info!(user_id = id, "user created");
        Ok(id)
    }

    /// Check a password and return the account's id.
    ///
    /// A missing account and a wrong password fail the same way.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, account: &str, password: &str) -> Result<i64, UserError> {
        let Some(credentials) = self
            .store
            .find_credentials(account)
            .await
            .map_err(UserError::Query)?
        else {
            self.hasher.verify_dummy(password);
            warn!("unknown account");
            return Err(UserError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify(password, &credentials.password)
            .map_err(UserError::Hashing)?
        {
            warn!(user_id = credentials.id, "wrong password");
            return Err(UserError::InvalidCredentials);
        }

        Ok(credentials.id)
    }

    /// Replace the stored hash. The old password is not checked here.
    #[instrument(skip(self, new_password))]
    pub async fn change_password(&self, id: i64, new_password: &str) -> Result<(), UserError> {
        let hash = self.hasher.hash(new_password).map_err(UserError::Hashing)?;

        let updated = self
            .store
            .update_password(id, &hash)
            .await
            .map_err(UserError::Storage)?;
        if updated == 0 {
            return Err(UserError::NotFound);
        }

        info!("password changed");
        Ok(())
    }
}
