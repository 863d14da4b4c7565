use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{CartItem, Membership, Order, Product, User, UserRole};

pub type SharedStore = Arc<AppStore>;

/// 进程内的全部应用状态。没有持久层，所有集合都只活在内存里，
/// 由各 service 通过同一个 Arc 共享。
pub struct AppStore {
    pub users: RwLock<Vec<User>>,
    pub products: RwLock<Vec<Product>>,
    /// 购物车按归属买家的用户 id 分键
    pub carts: RwLock<HashMap<String, Vec<CartItem>>>,
    pub orders: RwLock<Vec<Order>>,
    pub memberships: RwLock<Vec<Membership>>,
    /// 单活动会话：当前登录的身份
    pub session: RwLock<Option<User>>,
}

impl AppStore {
    pub fn new() -> SharedStore {
        Arc::new(Self {
            users: RwLock::new(seed_users()),
            products: RwLock::new(Vec::new()),
            carts: RwLock::new(HashMap::new()),
            orders: RwLock::new(Vec::new()),
            memberships: RwLock::new(Vec::new()),
            session: RwLock::new(None),
        })
    }
}

fn seed_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            name: "Admin User".to_string(),
            email: "admin@ems.com".to_string(),
            role: UserRole::Admin,
            password: Some("password".to_string()),
            category: None,
        },
        User {
            id: "2".to_string(),
            name: "Vendor 1".to_string(),
            email: "vendor1@ems.com".to_string(),
            role: UserRole::Vendor,
            password: Some("password".to_string()),
            category: Some("Catering".to_string()),
        },
        User {
            id: "3".to_string(),
            name: "John Doe".to_string(),
            email: "user@ems.com".to_string(),
            role: UserRole::User,
            password: Some("password".to_string()),
            category: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_users_roles() {
        let users = seed_users();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].role, UserRole::Admin);
        assert_eq!(users[1].role, UserRole::Vendor);
        assert_eq!(users[1].category.as_deref(), Some("Catering"));
        assert_eq!(users[2].role, UserRole::User);
    }

    #[test]
    fn test_seed_emails_unique() {
        let users = seed_users();
        let mut emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
        emails.sort_unstable();
        emails.dedup();
        assert_eq!(emails.len(), users.len());
    }
}
