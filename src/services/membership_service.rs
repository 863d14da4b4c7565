use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::store::SharedStore;

#[derive(Clone)]
pub struct MembershipService {
    store: SharedStore,
}

impl MembershipService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list_memberships(&self) -> AppResult<Vec<Membership>> {
        let memberships = self.store.memberships.read().await;
        Ok(memberships.clone())
    }

    pub async fn add_membership(&self, request: CreateMembershipRequest) -> AppResult<Membership> {
        if request.membership_number.trim().is_empty() || request.user_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "All fields are mandatory".to_string(),
            ));
        }

        // 会员号必须挂在一个已存在的商户用户上
        let is_vendor = {
            let users = self.store.users.read().await;
            users
                .iter()
                .any(|u| u.id == request.user_id && u.role == UserRole::Vendor)
        };
        if !is_vendor {
            return Err(AppError::ValidationError(
                "User id does not reference a vendor".to_string(),
            ));
        }

        let mut memberships = self.store.memberships.write().await;
        // 注册表按会员号分键，重复会让后续更新产生歧义
        if memberships
            .iter()
            .any(|m| m.membership_number == request.membership_number)
        {
            return Err(AppError::ValidationError(
                "Membership number already exists".to_string(),
            ));
        }

        let membership = Membership {
            membership_number: request.membership_number,
            user_id: request.user_id,
            membership_type: request.membership_type,
            start_date: Utc::now(),
        };
        memberships.push(membership.clone());
        Ok(membership)
    }

    /// 只替换 type；user_id 与 start_date 保持不变
    pub async fn update_membership(
        &self,
        membership_number: &str,
        request: UpdateMembershipRequest,
    ) -> AppResult<Membership> {
        let mut memberships = self.store.memberships.write().await;
        let membership = memberships
            .iter_mut()
            .find(|m| m.membership_number == membership_number)
            .ok_or_else(|| AppError::NotFound("Membership Number not found".to_string()))?;

        membership.membership_type = request.membership_type;
        Ok(membership.clone())
    }
}
