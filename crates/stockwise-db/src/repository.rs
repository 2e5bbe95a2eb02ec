use async_trait::async_trait;
use stockwise_core::AppError;
use stockwise_models::{User, UserId};
use stockwise_permissions::PermissionStore;

/// Persistence for back-office users.
///
/// Permission writes replace the whole store. There is no version check, so
/// concurrent editors resolve as last writer wins.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;

    /// All users ordered by name.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Stores a new user. Emails are unique.
    async fn insert(&self, user: User) -> Result<User, AppError>;

    /// Replaces the user's granular store. Returns `false` if the user does
    /// not exist.
    async fn save_permissions(
        &self,
        id: UserId,
        permissions: &PermissionStore,
    ) -> Result<bool, AppError>;
}
