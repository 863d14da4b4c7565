use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::store::SharedStore;

#[derive(Clone)]
pub struct AuthService {
    store: SharedStore,
}

impl AuthService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// 凭 email + password 精确匹配身份库。成功即替换单活动会话；
    /// 不签发令牌，也没有过期时间。
    pub async fn login(&self, request: LoginRequest) -> AppResult<UserResponse> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AppError::ValidationError(
                "Both email and password are required".to_string(),
            ));
        }

        let user = {
            let users = self.store.users.read().await;
            users
                .iter()
                .find(|u| {
                    u.email == request.email && u.password.as_deref() == Some(&request.password)
                })
                .cloned()
        }
        .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

        let mut session = self.store.session.write().await;
        *session = Some(user.clone());
        log::info!("User {} ({}) logged in", user.id, user.role);
        Ok(user.into())
    }

    /// 结束会话并丢弃离开用户的购物车
    pub async fn logout(&self) -> AppResult<()> {
        let mut session = self.store.session.write().await;
        if let Some(user) = session.take() {
            let mut carts = self.store.carts.write().await;
            carts.remove(&user.id);
            log::info!("User {} logged out", user.id);
        }
        Ok(())
    }

    pub async fn current_user(&self) -> AppResult<UserResponse> {
        let session = self.store.session.read().await;
        session
            .clone()
            .map(UserResponse::from)
            .ok_or_else(|| AppError::AuthError("No active session".to_string()))
    }
}
