use crate::error::ServiceError;
use crate::models::{CreateUserRequest, NewUser};
use crate::store::RecordStore;
use entity::User;
use entity::user::DEFAULT_AVATAR_TYPE;
use tracing::debug;

/// Creates a user at the end of onboarding.
///
/// The existence check only gives a fast `Conflict`; two racing requests can
/// both pass it, in which case the store's unique index rejects the second
/// insert and that is reported as `Conflict` as well.
pub async fn create_user(
    store: &dyn RecordStore,
    request: CreateUserRequest,
) -> Result<User, ServiceError> {
    let new_user = validate(request)?;

    if store.find_user(&new_user.privy_id).await?.is_some() {
        debug!("User {} already exists", new_user.privy_id);
        return Err(ServiceError::Conflict("User already exists".to_string()));
    }

    store.insert_user(new_user).await
}

fn validate(request: CreateUserRequest) -> Result<NewUser, ServiceError> {
    let (Some(email_address), Some(username), Some(privy_id)) = (
        present(request.email_address),
        present(request.username),
        present(request.privy_id),
    ) else {
        return Err(ServiceError::Validation(
            "Missing required fields: email_address, username, privy_id".to_string(),
        ));
    };

    Ok(NewUser {
        privy_id,
        email_address,
        username,
        bio: present(request.bio),
        avatar_type: present(request.avatar_type)
            .unwrap_or_else(|| DEFAULT_AVATAR_TYPE.to_string()),
        avatar: request.avatar,
        wallet_address: request.wallet_address,
    })
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Failure, FakeStore, user};

    fn request(email: &str, username: &str, privy_id: &str) -> CreateUserRequest {
        CreateUserRequest {
            email_address: Some(email.to_string()),
            username: Some(username.to_string()),
            privy_id: Some(privy_id.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_defaults_avatar_type() {
        let store = FakeStore::default();

        let created = create_user(&store, request("a@b.com", "a", "p1")).await.unwrap();
        assert_eq!(created.privy_id, "p1");
        assert_eq!(created.avatar_type, "default");
        assert_eq!(created.bio, None);
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_create_keeps_optional_fields() {
        let store = FakeStore::default();
        let mut req = request("a@b.com", "a", "p1");
        req.bio = Some("gg".to_string());
        req.avatar_type = Some("custom".to_string());
        req.avatar = Some("pfp-earth".to_string());
        req.wallet_address = Some("0xabc".to_string());

        let created = create_user(&store, req).await.unwrap();
        assert_eq!(created.bio.as_deref(), Some("gg"));
        assert_eq!(created.avatar_type, "custom");
        assert_eq!(created.avatar.as_deref(), Some("pfp-earth"));
        assert_eq!(created.wallet_address.as_deref(), Some("0xabc"));
    }

    #[tokio::test]
    async fn test_duplicate_identity_conflicts_regardless_of_other_fields() {
        let store = FakeStore::default().with_user(user("p1"));

        let result = create_user(&store, request("other@b.com", "someone-else", "p1")).await;
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_or_blank_fields_are_rejected() {
        let store = FakeStore::default();

        for req in [
            CreateUserRequest::default(),
            request("", "a", "p1"),
            request("a@b.com", "   ", "p1"),
            CreateUserRequest {
                privy_id: None,
                ..request("a@b.com", "a", "p1")
            },
        ] {
            let result = create_user(&store, req).await;
            assert!(matches!(result, Err(ServiceError::Validation(_))));
        }
        assert_eq!(store.user_count(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = FakeStore::default().failing(Failure::Insert);

        let result = create_user(&store, request("a@b.com", "a", "p1")).await;
        assert!(matches!(result, Err(ServiceError::Database(_))));
    }
}
