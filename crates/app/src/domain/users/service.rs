//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        optional, required,
        users::{
            data::{ProfileUpdate, UserUpdate},
            errors::UsersServiceError,
            records::{Role, UserRecord, UserUuid},
            repository::PgUsersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn list_users(&self, role: Option<Role>) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx, role).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    #[tracing::instrument(name = "users.update", skip(self, update), fields(user_uuid = %user), err)]
    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let update = UserUpdate {
            name: required(&update.name).ok_or(UsersServiceError::MissingRequiredData)?,
            phone: optional(update.phone),
            is_email_verified: update.is_email_verified,
        };

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_user(&mut tx, user, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let update = ProfileUpdate {
            name: required(&update.name).ok_or(UsersServiceError::MissingRequiredData)?,
            phone: optional(update.phone),
        };

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_profile(&mut tx, user, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(name = "users.set_active", skip(self), fields(user_uuid = %user), err)]
    async fn set_active(
        &self,
        user: UserUuid,
        is_active: bool,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.set_active(&mut tx, user, is_active).await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(name = "users.set_role", skip(self), fields(user_uuid = %user), err)]
    async fn set_role(&self, user: UserUuid, role: Role) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.set_role(&mut tx, user, role).await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(name = "users.delete", skip(self), fields(user_uuid = %user), err)]
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// List users, newest first, optionally restricted to one role.
    async fn list_users(&self, role: Option<Role>) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Admin update of a user's details.
    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Update the caller's own name and phone.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Activate or deactivate an account.
    async fn set_active(
        &self,
        user: UserUuid,
        is_active: bool,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Change a user's role.
    async fn set_role(&self, user: UserUuid, role: Role) -> Result<UserRecord, UsersServiceError>;

    /// Delete a user.
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::register_user};

    use super::*;

    #[tokio::test]
    async fn get_user_returns_registered_user() -> TestResult {
        let ctx = TestContext::new().await;
        let registered = register_user(&ctx, "asha@example.com", Role::User).await?;

        let user = ctx.users.get_user(registered.uuid).await?;

        assert_eq!(user.email, "asha@example.com");
        assert_eq!(user.role, Role::User);
        assert!(user.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn get_user_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_user(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_users_filters_by_role() -> TestResult {
        let ctx = TestContext::new().await;

        register_user(&ctx, "shopper@example.com", Role::User).await?;
        let vendor = register_user(&ctx, "seller@example.com", Role::Vendor).await?;

        let vendors = ctx.users.list_users(Some(Role::Vendor)).await?;
        let everyone = ctx.users.list_users(None).await?;

        assert_eq!(vendors.len(), 1);
        assert_eq!(vendors[0].uuid, vendor.uuid);
        assert_eq!(everyone.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_trims_and_clears_blank_phone() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "ravi@example.com", Role::User).await?;

        let updated = ctx
            .users
            .update_profile(
                user.uuid,
                ProfileUpdate {
                    name: "  Ravi Kumar ".to_string(),
                    phone: Some("   ".to_string()),
                },
            )
            .await?;

        assert_eq!(updated.name, "Ravi Kumar");
        assert_eq!(updated.phone, None);

        Ok(())
    }

    #[tokio::test]
    async fn update_user_rejects_blank_name() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "blank@example.com", Role::User).await?;

        let result = ctx
            .users
            .update_user(
                user.uuid,
                UserUpdate {
                    name: " ".to_string(),
                    phone: None,
                    is_email_verified: true,
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_active_and_role_are_persisted() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "meera@example.com", Role::User).await?;

        ctx.users.set_active(user.uuid, false).await?;
        let updated = ctx.users.set_role(user.uuid, Role::Vendor).await?;

        assert!(!updated.is_active);
        assert_eq!(updated.role, Role::Vendor);

        Ok(())
    }

    #[tokio::test]
    async fn delete_user_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "gone@example.com", Role::User).await?;

        ctx.users.delete_user(user.uuid).await?;

        let result = ctx.users.get_user(user.uuid).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_user_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.delete_user(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
