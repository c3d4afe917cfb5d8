//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Address, CreateUser, KycStatus, Password, UpdateUser, User, UserRole};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Get user by email (case-sensitive)
    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    /// List all users, newest first
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Register a new user from an inbound payload
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Merge a partial update into an existing user
    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User>;

    /// Delete user, returning the removed snapshot
    async fn delete_user(&self, id: Uuid) -> AppResult<User>;

    /// Overwrite a user's role
    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User>;

    /// Overwrite a user's KYC status
    async fn update_kyc_status(&self, id: Uuid, status: KycStatus) -> AppResult<User>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.repo.find_by_email(email).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.find_all().await
    }

    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        // Check if email already exists. The unique index on users.email
        // stays as the backstop for concurrent registrations.
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let password = Password::new(&input.password)?;
        let id = Uuid::new_v4();
        let address = Address::new(
            id,
            input.street,
            input.city,
            input.state,
            input.zip_code,
            input.country,
        );
        let user = User::new(
            id,
            input.email,
            password.into_string(),
            input.firstname,
            input.lastname,
            input.phone,
            address,
        );

        self.repo.create(&user).await
    }

    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User> {
        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found()?;

        // A changed email must stay unique. The comparison is case-sensitive,
        // the same address spelled differently is a different address.
        if let Some(email) = &input.email {
            if email != user.email() {
                if let Some(existing) = self.repo.find_by_email(email).await? {
                    if existing.id() != id {
                        return Err(AppError::conflict("Email"));
                    }
                }
            }
        }

        user.apply_update(input);
        self.repo.update(&user).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.delete(id).await
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User> {
        self.repo.update_role(id, role).await
    }

    async fn update_kyc_status(&self, id: Uuid, status: KycStatus) -> AppResult<User> {
        self.repo.update_kyc_status(id, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;

    fn create_input() -> CreateUser {
        CreateUser {
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
            firstname: "ana".to_string(),
            lastname: "lee".to_string(),
            phone: "+15550001111".to_string(),
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            country: "USA".to_string(),
        }
    }

    fn stored_user(id: Uuid, email: &str) -> User {
        User::new(
            id,
            email.to_string(),
            "hashed".to_string(),
            "ana".to_string(),
            "lee".to_string(),
            "+15550001111".to_string(),
            Address::new(
                id,
                "1 Main St".to_string(),
                "Springfield".to_string(),
                "IL".to_string(),
                "62701".to_string(),
                "USA".to_string(),
            ),
        )
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "ana@example.com")
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|user| {
                user.password_hash() != "secret"
                    && Password::from_hash(user.password_hash().to_string()).verify("secret")
                    && user.role() == UserRole::User
                    && user.kyc_status() == KycStatus::NotVerified
                    && user.address().is_some()
            })
            .returning(|user| Ok(user.clone()));

        let service = UserManager::new(Arc::new(repo));
        let created = service.create_user(create_input()).await.unwrap();

        assert_eq!(created.email(), "ana@example.com");
        assert_eq!(created.fullname(), "Ana Lee");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let existing_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "ana@example.com")
            .returning(move |email| Ok(Some(stored_user(existing_id, email))));
        repo.expect_create().times(0);

        let service = UserManager::new(Arc::new(repo));
        let result = service.create_user(create_input()).await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let result = service.get_user(Uuid::new_v4()).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_list_users_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all().returning(|| {
            Ok(vec![
                stored_user(Uuid::new_v4(), "a@example.com"),
                stored_user(Uuid::new_v4(), "b@example.com"),
            ])
        });

        let service = UserManager::new(Arc::new(repo));
        let result = service.list_users().await;

        assert_eq!(result.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_user_merges_supplied_fields() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(user_id))
            .returning(|id| Ok(Some(stored_user(id, "ana@example.com"))));
        repo.expect_update()
            .withf(|user| user.firstname() == "maria" && user.lastname() == "lee")
            .returning(|user| Ok(user.clone()));

        let service = UserManager::new(Arc::new(repo));
        let updated = service
            .update_user(
                user_id,
                UpdateUser {
                    firstname: Some("maria".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.firstname(), "maria");
    }

    #[tokio::test]
    async fn test_update_user_rejects_taken_email() {
        let user_id = Uuid::new_v4();
        let other_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "ana@example.com"))));
        repo.expect_find_by_email()
            .withf(|email| email == "taken@example.com")
            .returning(move |email| Ok(Some(stored_user(other_id, email))));
        repo.expect_update().times(0);

        let service = UserManager::new(Arc::new(repo));
        let result = service
            .update_user(
                user_id,
                UpdateUser {
                    email: Some("taken@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_user_own_email_is_not_a_conflict() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "ana@example.com"))));
        repo.expect_find_by_email().times(0);
        repo.expect_update().returning(|user| Ok(user.clone()));

        let service = UserManager::new(Arc::new(repo));
        let result = service
            .update_user(
                user_id,
                UpdateUser {
                    email: Some("ana@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_role_propagates_not_found() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_update_role()
            .with(eq(user_id), eq(UserRole::Admin))
            .returning(|_, _| Err(AppError::NotFound));

        let service = UserManager::new(Arc::new(repo));
        let result = service.update_role(user_id, UserRole::Admin).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_user_returns_snapshot() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_delete()
            .with(eq(user_id))
            .returning(|id| Ok(stored_user(id, "ana@example.com")));

        let service = UserManager::new(Arc::new(repo));
        let deleted = service.delete_user(user_id).await.unwrap();

        assert_eq!(deleted.id(), user_id);
    }
}
