//! In-memory repository, for tests and local development without Postgres.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::user_repository::UserRepository;
use common::{AppError, AppResult};
use domain::{Address, KycStatus, User, UserRole};

/// HashMap-backed implementation of [`UserRepository`].
///
/// Keeps the relational adapter's contract: unique email on create, an
/// address row always present after create, email and created_at immutable
/// under update, newest-first listing.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn with_address(user: &User, address: Option<Address>) -> User {
    User::from_parts(
        user.id(),
        user.email().to_string(),
        user.password_hash().to_string(),
        user.firstname().to_string(),
        user.lastname().to_string(),
        user.phone().to_string(),
        address,
        user.role(),
        user.kyc_status(),
        user.created_at(),
        user.updated_at(),
    )
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email() == email).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(all)
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email() == user.email()) {
            return Err(AppError::conflict("Email"));
        }

        let stored = match user.address() {
            Some(_) => user.clone(),
            None => with_address(
                user,
                Some(Address::new(
                    user.id(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                )),
            ),
        };
        users.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.write().await;
        let existing = users.get(&user.id()).ok_or(AppError::NotFound)?;

        // The stored email and created_at win; the stored address is not
        // part of this operation and stays as it is.
        let updated = User::from_parts(
            user.id(),
            existing.email().to_string(),
            user.password_hash().to_string(),
            user.firstname().to_string(),
            user.lastname().to_string(),
            user.phone().to_string(),
            existing.address().cloned(),
            user.role(),
            user.kyc_status(),
            existing.created_at(),
            user.updated_at(),
        );
        users.insert(updated.id(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<User> {
        let mut users = self.users.write().await;
        users.remove(&id).ok_or(AppError::NotFound)
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(AppError::NotFound)?;
        user.update_role(role);
        Ok(user.clone())
    }

    async fn update_kyc_status(&self, id: Uuid, status: KycStatus) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(AppError::NotFound)?;
        user.update_kyc_status(status);
        Ok(user.clone())
    }

    async fn update_address(&self, address: &Address) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&address.user_id()).ok_or(AppError::NotFound)?;
        if user.address().is_none() {
            return Err(AppError::NotFound);
        }

        let updated = with_address(user, Some(address.clone()));
        *user = updated.clone();
        Ok(updated)
    }
}
