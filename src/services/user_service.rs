use crate::error::AppResult;
use crate::models::*;
use crate::store::SharedStore;

#[derive(Clone)]
pub struct UserService {
    store: SharedStore,
}

impl UserService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// 维护页的用户/商户列表，密码不出站
    pub async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.store.users.read().await;
        Ok(users.iter().cloned().map(UserResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AppStore;

    #[tokio::test]
    async fn test_list_users_returns_the_seeded_identities() {
        let service = UserService::new(AppStore::new());
        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 3);
        assert!(users.iter().any(|u| u.role == UserRole::Vendor));
    }
}
