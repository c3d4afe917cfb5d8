//! User repository: persistence boundary for the user aggregate.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use super::entities::address::{self, Entity as AddressEntity};
use super::entities::user::{self, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{Address, KycStatus, User, UserRole};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups return `Ok(None)` for missing records; mutations signal a missing
/// target as [`AppError::NotFound`]. No storage error code ever crosses this
/// boundary unclassified.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID, with its address
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address (case-sensitive, as stored)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List all users, newest first. Always a possibly-empty collection.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Persist a new user together with its address
    async fn create(&self, user: &User) -> AppResult<User>;

    /// Write the aggregate snapshot back. The email column is out of this
    /// operation's contract and is never modified.
    async fn update(&self, user: &User) -> AppResult<User>;

    /// Delete user by ID, returning the deleted snapshot
    async fn delete(&self, id: Uuid) -> AppResult<User>;

    /// Overwrite the role
    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User>;

    /// Overwrite the KYC status
    async fn update_kyc_status(&self, id: Uuid, status: KycStatus) -> AppResult<User>;

    /// Replace the address of an existing user, keyed by the owning user id
    async fn update_address(&self, address: &Address) -> AppResult<User>;
}

/// Classify a storage failure into the application taxonomy.
///
/// Unique violations become conflicts (the backstop behind the service-level
/// email pre-check), a vanished update target becomes NotFound, anything
/// else stays a database failure carrying the cause.
fn classify(err: DbErr) -> AppError {
    if matches!(err, DbErr::RecordNotUpdated) {
        return AppError::NotFound;
    }
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Email"),
        _ => AppError::from(err),
    }
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(e) = txn.rollback().await {
        tracing::error!("Failed to roll back transaction: {}", e);
    }
}

/// Concrete SeaORM implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .find_also_related(AddressEntity)
            .one(&self.db)
            .await
            .map_err(classify)?;

        Ok(result.map(|(user, address)| user.into_domain(address)))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .find_also_related(AddressEntity)
            .one(&self.db)
            .await
            .map_err(classify)?;

        Ok(result.map(|(user, address)| user.into_domain(address)))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .find_also_related(AddressEntity)
            .all(&self.db)
            .await
            .map_err(classify)?;

        Ok(rows
            .into_iter()
            .map(|(user, address)| user.into_domain(address))
            .collect())
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        // One transaction for both dependent writes: a user row must never
        // outlive a failed address insert.
        let txn = self.db.begin().await.map_err(classify)?;

        let user_row = match user::ActiveModel::from(user).insert(&txn).await {
            Ok(row) => row,
            Err(e) => {
                rollback(txn).await;
                return Err(classify(e));
            }
        };

        // An address row is always written; an aggregate without one gets
        // empty fields, keyed by the user id.
        let address = match user.address() {
            Some(address) => address.clone(),
            None => Address::new(
                user.id(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ),
        };
        let address_row = match address::ActiveModel::from(&address).insert(&txn).await {
            Ok(row) => row,
            Err(e) => {
                rollback(txn).await;
                return Err(classify(e));
            }
        };

        txn.commit().await.map_err(classify)?;

        tracing::info!(user_id = %user_row.id, "user created");
        Ok(user_row.into_domain(Some(address_row)))
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let (existing, address) = UserEntity::find_by_id(user.id())
            .find_also_related(AddressEntity)
            .one(&self.db)
            .await
            .map_err(classify)?
            .ok_or(AppError::NotFound)?;

        // The stored email wins; everything else comes from the snapshot
        let mut active: user::ActiveModel = existing.into();
        active.password_hash = Set(user.password_hash().to_string());
        active.firstname = Set(user.firstname().to_string());
        active.lastname = Set(user.lastname().to_string());
        active.phone = Set(user.phone().to_string());
        active.role = Set(user.role().to_string());
        active.kyc_status = Set(user.kyc_status().to_string());
        active.updated_at = Set(user.updated_at());

        let model = active.update(&self.db).await.map_err(classify)?;
        Ok(model.into_domain(address))
    }

    async fn delete(&self, id: Uuid) -> AppResult<User> {
        let (user, address) = UserEntity::find_by_id(id)
            .find_also_related(AddressEntity)
            .one(&self.db)
            .await
            .map_err(classify)?
            .ok_or(AppError::NotFound)?;

        // The cascade on addresses.user_id removes the address row
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(classify)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        tracing::info!(user_id = %id, "user deleted");
        Ok(user.into_domain(address))
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User> {
        let (user, address) = UserEntity::find_by_id(id)
            .find_also_related(AddressEntity)
            .one(&self.db)
            .await
            .map_err(classify)?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = user.into();
        active.role = Set(role.to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(classify)?;
        Ok(model.into_domain(address))
    }

    async fn update_kyc_status(&self, id: Uuid, status: KycStatus) -> AppResult<User> {
        let (user, address) = UserEntity::find_by_id(id)
            .find_also_related(AddressEntity)
            .one(&self.db)
            .await
            .map_err(classify)?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = user.into();
        active.kyc_status = Set(status.to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(classify)?;
        Ok(model.into_domain(address))
    }

    async fn update_address(&self, address: &Address) -> AppResult<User> {
        let (user, existing) = UserEntity::find_by_id(address.user_id())
            .find_also_related(AddressEntity)
            .one(&self.db)
            .await
            .map_err(classify)?
            .ok_or(AppError::NotFound)?;
        let existing = existing.ok_or(AppError::NotFound)?;

        let mut active: address::ActiveModel = existing.into();
        active.street = Set(address.street().to_string());
        active.city = Set(address.city().to_string());
        active.state = Set(address.state().to_string());
        active.zip_code = Set(address.zip_code().to_string());
        active.country = Set(address.country().to_string());

        let model = active.update(&self.db).await.map_err(classify)?;
        Ok(user.into_domain(Some(model)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SqlErr values only come out of a live driver, so the unique
    // violation arm is not constructible here.

    #[test]
    fn test_classify_maps_record_not_updated_to_not_found() {
        assert!(matches!(
            classify(DbErr::RecordNotUpdated),
            AppError::NotFound
        ));
    }

    #[test]
    fn test_classify_keeps_other_failures_as_database_errors() {
        let err = classify(DbErr::Custom("connection reset".to_owned()));
        assert!(matches!(err, AppError::Database(_)));
    }
}
