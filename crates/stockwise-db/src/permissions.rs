//! Repository-level permission workflows shared by the API and the CLI.

use stockwise_core::AppError;
use stockwise_models::UserId;
use stockwise_permissions::{PermissionError, PermissionStore, clone_permissions};

use crate::repository::UserRepository;

/// Replaces `target`'s store with an exact copy of `source`'s and saves it.
///
/// The target is checked first, so a missing target is reported even when
/// the source is missing too. A target that disappears before the write is
/// also `NotFound`.
pub async fn clone_user_permissions(
    repo: &dyn UserRepository,
    source: UserId,
    target: UserId,
) -> Result<PermissionStore, AppError> {
    if source != target && repo.find_by_id(target).await?.is_none() {
        return Err(PermissionError::NotFound(target.to_string()).into());
    }

    let access = repo.find_by_id(source).await?.map(|u| u.access());
    let store = clone_permissions(&source, &target, access.as_ref())?;

    if !repo.save_permissions(target, &store).await? {
        return Err(PermissionError::NotFound(target.to_string()).into());
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use stockwise_models::User;
    use stockwise_permissions::{Role, builtin_structure};

    use crate::InMemoryUserRepository;

    fn manager(email: &str, permissions: Option<PermissionStore>) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            name: email.into(),
            email: email.into(),
            role: Role::Manager,
            permissions,
            module_access: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reads from an inner repository but reports every write as missing.
    struct VanishingWrites(InMemoryUserRepository);

    #[async_trait]
    impl UserRepository for VanishingWrites {
        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
            self.0.find_by_id(id).await
        }

        async fn list(&self) -> Result<Vec<User>, AppError> {
            self.0.list().await
        }

        async fn insert(&self, user: User) -> Result<User, AppError> {
            self.0.insert(user).await
        }

        async fn save_permissions(
            &self,
            _id: UserId,
            _permissions: &PermissionStore,
        ) -> Result<bool, AppError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_clone_copies_and_saves() {
        let structure = builtin_structure();
        let mut store = PermissionStore::all_denied(&structure);
        store.set("grn-entries", "approve", true);

        let a = manager("a@example.com", Some(store.clone()));
        let b = manager("b@example.com", Some(PermissionStore::all_denied(&structure)));
        let (a_id, b_id) = (a.id, b.id);
        let repo = InMemoryUserRepository::with_users([a, b]);

        let cloned = clone_user_permissions(&repo, a_id, b_id).await.unwrap();
        assert_eq!(cloned.to_value(), store.to_value());

        let saved = repo.find_by_id(b_id).await.unwrap().unwrap();
        assert_eq!(saved.permissions, Some(store));
    }

    #[tokio::test]
    async fn test_clone_errors() {
        let a = manager("a@example.com", Some(PermissionStore::new()));
        let a_id = a.id;
        let repo = InMemoryUserRepository::with_users([a]);

        let same = clone_user_permissions(&repo, a_id, a_id).await.unwrap_err();
        assert_eq!(same.status.as_u16(), 400);

        let missing_source = clone_user_permissions(&repo, UserId::new(), a_id)
            .await
            .unwrap_err();
        assert_eq!(missing_source.status.as_u16(), 404);

        let missing_target = clone_user_permissions(&repo, a_id, UserId::new())
            .await
            .unwrap_err();
        assert_eq!(missing_target.status.as_u16(), 404);
    }

    #[tokio::test]
    async fn test_clone_when_target_vanishes_is_not_found() {
        let a = manager("a@example.com", Some(PermissionStore::new()));
        let b = manager("b@example.com", None);
        let (a_id, b_id) = (a.id, b.id);
        let repo = VanishingWrites(InMemoryUserRepository::with_users([a, b]));

        let err = clone_user_permissions(&repo, a_id, b_id).await.unwrap_err();
        assert_eq!(err.status.as_u16(), 404);
        assert!(err.error.to_string().contains(&b_id.to_string()));
    }
}
