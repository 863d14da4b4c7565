use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::cart_service::grand_total;
use crate::store::SharedStore;
use crate::utils::generate_order_id;

#[derive(Clone)]
pub struct OrderService {
    store: SharedStore,
}

impl OrderService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// 从当前购物车落一张订单。购物车在这里不清空，
    /// 清空发生在买家确认（`complete_order`）之后。
    pub async fn checkout(&self, user_id: &str, request: CheckoutRequest) -> AppResult<Order> {
        if request.address.trim().is_empty() || request.city.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Shipping address and city are mandatory".to_string(),
            ));
        }

        let items = {
            let carts = self.store.carts.read().await;
            carts.get(user_id).cloned().unwrap_or_default()
        };
        if items.is_empty() {
            return Err(AppError::ValidationError("Your cart is empty".to_string()));
        }

        let total = grand_total(&items);

        let mut orders = self.store.orders.write().await;
        let id = {
            let existing_ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
            generate_order_id(&existing_ids)
        };
        let order = Order {
            id,
            user_id: user_id.to_string(),
            items,
            total,
            status: OrderStatus::Received,
            address: request.address,
            city: request.city,
            payment_method: request.payment_method,
            created_at: Utc::now(),
        };
        orders.push(order.clone());

        log::info!("Order {} placed by user {} (total {})", order.id, user_id, order.total);
        Ok(order)
    }

    /// 下单确认步骤：买家在确认弹层点击后才清空购物车
    pub async fn complete_order(&self, user_id: &str) -> AppResult<()> {
        let mut carts = self.store.carts.write().await;
        carts.remove(user_id);
        Ok(())
    }

    /// 买家只看自己的订单，管理员看全量
    pub async fn list_orders(&self, actor: &User) -> AppResult<Vec<Order>> {
        let orders = self.store.orders.read().await;
        match actor.role {
            UserRole::Admin => Ok(orders.clone()),
            UserRole::User => Ok(orders
                .iter()
                .filter(|o| o.user_id == actor.id)
                .cloned()
                .collect()),
            UserRole::Vendor => Err(AppError::PermissionDenied),
        }
    }

    /// 状态机：买家只能把自己的 Received 订单转 Cancelled；
    /// 管理员可把状态设为 Received / Ready for Shipping / Out For Delivery
    /// 而不受当前状态约束（运营纠错的后门，Cancelled 不在其列）。
    pub async fn update_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
        actor: &User,
    ) -> AppResult<Order> {
        let mut orders = self.store.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        let allowed = match actor.role {
            UserRole::Admin => matches!(
                new_status,
                OrderStatus::Received | OrderStatus::ReadyForShipping | OrderStatus::OutForDelivery
            ),
            UserRole::User => {
                order.user_id == actor.id
                    && order.status == OrderStatus::Received
                    && new_status == OrderStatus::Cancelled
            }
            UserRole::Vendor => false,
        };
        if !allowed {
            return Err(AppError::PermissionDenied);
        }

        order.status = new_status;
        Ok(order.clone())
    }

    pub async fn delete_order(&self, order_id: &str, actor: &User) -> AppResult<()> {
        if actor.role != UserRole::Admin {
            return Err(AppError::PermissionDenied);
        }
        let mut orders = self.store.orders.write().await;
        let index = orders
            .iter()
            .position(|o| o.id == order_id)
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
        orders.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AppStore;

    fn cart_item(id: &str, price: f64, quantity: u32) -> CartItem {
        CartItem {
            id: id.to_string(),
            vendor_id: "2".to_string(),
            name: format!("Product {id}"),
            price,
            image: "img".to_string(),
            category: "Catering".to_string(),
            quantity,
        }
    }

    fn checkout_request() -> CheckoutRequest {
        CheckoutRequest {
            address: "12 Main St".to_string(),
            city: "Springfield".to_string(),
            payment_method: PaymentMethod::Cash,
        }
    }

    async fn seeded_user(store: &SharedStore, id: &str) -> User {
        store
            .users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .unwrap()
    }

    async fn store_with_cart() -> SharedStore {
        let store = AppStore::new();
        store.carts.write().await.insert(
            "3".to_string(),
            vec![cart_item("p1", 100.0, 2), cart_item("p2", 50.0, 1)],
        );
        store
    }

    #[tokio::test]
    async fn test_checkout_totals_and_snapshots_the_cart() {
        let store = store_with_cart().await;
        let service = OrderService::new(store.clone());

        let order = service.checkout("3", checkout_request()).await.unwrap();
        assert_eq!(order.total, 250.0);
        assert_eq!(order.status, OrderStatus::Received);
        assert_eq!(order.items.len(), 2);
        assert!(order.id.starts_with("ORD-"));

        // 之后的购物车改动不影响已落的订单
        store.carts.write().await.insert(
            "3".to_string(),
            vec![cart_item("p1", 100.0, 9)],
        );
        let admin = seeded_user(&store, "1").await;
        let ledger = service.list_orders(&admin).await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].items.len(), 2);
        assert_eq!(ledger[0].items[0].quantity, 2);
        assert_eq!(ledger[0].total, 250.0);
    }

    #[tokio::test]
    async fn test_checkout_does_not_clear_the_cart_until_confirmed() {
        let store = store_with_cart().await;
        let service = OrderService::new(store.clone());

        service.checkout("3", checkout_request()).await.unwrap();
        assert_eq!(store.carts.read().await.get("3").unwrap().len(), 2);

        service.complete_order("3").await.unwrap();
        assert!(store.carts.read().await.get("3").is_none());
    }

    #[tokio::test]
    async fn test_checkout_rejects_empty_cart_and_missing_fields() {
        let store = AppStore::new();
        let service = OrderService::new(store.clone());

        let err = service.checkout("3", checkout_request()).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let store = store_with_cart().await;
        let service = OrderService::new(store);
        let err = service
            .checkout(
                "3",
                CheckoutRequest {
                    address: " ".to_string(),
                    city: "Springfield".to_string(),
                    payment_method: PaymentMethod::Upi,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_shopper_can_cancel_own_received_order() {
        let store = store_with_cart().await;
        let service = OrderService::new(store.clone());
        let shopper = seeded_user(&store, "3").await;

        let order = service.checkout("3", checkout_request()).await.unwrap();
        let cancelled = service
            .update_status(&order.id, OrderStatus::Cancelled, &shopper)
            .await
            .unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_shopper_cannot_advance_to_delivery() {
        let store = store_with_cart().await;
        let service = OrderService::new(store.clone());
        let shopper = seeded_user(&store, "3").await;

        let order = service.checkout("3", checkout_request()).await.unwrap();
        let err = service
            .update_status(&order.id, OrderStatus::OutForDelivery, &shopper)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_shopper_cannot_cancel_someone_elses_order() {
        let store = store_with_cart().await;
        let service = OrderService::new(store.clone());
        let order = service.checkout("3", checkout_request()).await.unwrap();

        let stranger = User {
            id: "42".to_string(),
            name: "Other Shopper".to_string(),
            email: "other@ems.com".to_string(),
            role: UserRole::User,
            password: Some("password".to_string()),
            category: None,
        };
        let err = service
            .update_status(&order.id, OrderStatus::Cancelled, &stranger)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_update_status_unknown_order_is_not_found() {
        let store = AppStore::new();
        let service = OrderService::new(store.clone());
        let shopper = seeded_user(&store, "3").await;

        let err = service
            .update_status("ORD-missing", OrderStatus::Cancelled, &shopper)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_admin_escape_hatch_ignores_the_forward_graph() {
        let store = store_with_cart().await;
        let service = OrderService::new(store.clone());
        let admin = seeded_user(&store, "1").await;

        let order = service.checkout("3", checkout_request()).await.unwrap();
        service
            .update_status(&order.id, OrderStatus::OutForDelivery, &admin)
            .await
            .unwrap();
        // 倒着改回去也行，这是刻意留的运营后门
        let reverted = service
            .update_status(&order.id, OrderStatus::Received, &admin)
            .await
            .unwrap();
        assert_eq!(reverted.status, OrderStatus::Received);

        // 但 Cancelled 不是管理员的目标状态
        let err = service
            .update_status(&order.id, OrderStatus::Cancelled, &admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_vendor_can_transition_nothing() {
        let store = store_with_cart().await;
        let service = OrderService::new(store.clone());
        let vendor = seeded_user(&store, "2").await;

        let order = service.checkout("3", checkout_request()).await.unwrap();
        let err = service
            .update_status(&order.id, OrderStatus::ReadyForShipping, &vendor)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_delete_order_is_admin_only() {
        let store = store_with_cart().await;
        let service = OrderService::new(store.clone());
        let admin = seeded_user(&store, "1").await;
        let shopper = seeded_user(&store, "3").await;

        let order = service.checkout("3", checkout_request()).await.unwrap();

        let err = service.delete_order(&order.id, &shopper).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));

        service.delete_order(&order.id, &admin).await.unwrap();
        let err = service.delete_order(&order.id, &admin).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_visibility_is_filtered_for_shoppers() {
        let store = store_with_cart().await;
        store.carts.write().await.insert(
            "42".to_string(),
            vec![cart_item("p9", 10.0, 1)],
        );
        let service = OrderService::new(store.clone());
        let shopper = seeded_user(&store, "3").await;

        service.checkout("3", checkout_request()).await.unwrap();
        service.checkout("42", checkout_request()).await.unwrap();

        let mine = service.list_orders(&shopper).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user_id, "3");

        let admin = seeded_user(&store, "1").await;
        assert_eq!(service.list_orders(&admin).await.unwrap().len(), 2);

        let vendor = seeded_user(&store, "2").await;
        let err = service.list_orders(&vendor).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));
    }
}
