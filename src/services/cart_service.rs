use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::store::SharedStore;

#[derive(Clone)]
pub struct CartService {
    store: SharedStore,
}

impl CartService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn get_cart(&self, user_id: &str) -> AppResult<CartResponse> {
        let carts = self.store.carts.read().await;
        let items = carts.get(user_id).cloned().unwrap_or_default();
        Ok(CartResponse::from_items(items))
    }

    /// 已有同商品行项目则数量 +1，否则追加数量为 1 的新行项目。
    pub async fn add_to_cart(&self, user_id: &str, product_id: &str) -> AppResult<CartResponse> {
        let product = {
            let products = self.store.products.read().await;
            products
                .iter()
                .find(|p| p.id == product_id)
                .cloned()
                .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?
        };

        let mut carts = self.store.carts.write().await;
        let current = carts.get(user_id).cloned().unwrap_or_default();
        let next = add_item(current, &product);
        carts.insert(user_id.to_string(), next.clone());
        Ok(CartResponse::from_items(next))
    }

    pub async fn update_quantity(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> AppResult<CartResponse> {
        let mut carts = self.store.carts.write().await;
        let current = carts.get(user_id).cloned().unwrap_or_default();
        let next = set_quantity(current, product_id, quantity);
        carts.insert(user_id.to_string(), next.clone());
        Ok(CartResponse::from_items(next))
    }

    pub async fn remove_item(&self, user_id: &str, product_id: &str) -> AppResult<CartResponse> {
        let mut carts = self.store.carts.write().await;
        let current = carts.get(user_id).cloned().unwrap_or_default();
        let next = remove_line(current, product_id);
        carts.insert(user_id.to_string(), next.clone());
        Ok(CartResponse::from_items(next))
    }

    /// "Delete All"：整车清空
    pub async fn clear(&self, user_id: &str) -> AppResult<CartResponse> {
        let mut carts = self.store.carts.write().await;
        carts.insert(user_id.to_string(), Vec::new());
        Ok(CartResponse::from_items(Vec::new()))
    }
}

/// 返回替换后的新购物车，旧集合对持有者保持不变
fn add_item(cart: Vec<CartItem>, product: &Product) -> Vec<CartItem> {
    if cart.iter().any(|item| item.id == product.id) {
        cart.into_iter()
            .map(|mut item| {
                if item.id == product.id {
                    item.quantity += 1;
                }
                item
            })
            .collect()
    } else {
        let mut next = cart;
        next.push(CartItem::from_product(product, 1));
        next
    }
}

/// 数量下限为 1：小于 1 的请求静默拒绝，原车返回
fn set_quantity(cart: Vec<CartItem>, product_id: &str, quantity: u32) -> Vec<CartItem> {
    if quantity < 1 {
        return cart;
    }
    cart.into_iter()
        .map(|mut item| {
            if item.id == product_id {
                item.quantity = quantity;
            }
            item
        })
        .collect()
}

fn remove_line(cart: Vec<CartItem>, product_id: &str) -> Vec<CartItem> {
    cart.into_iter()
        .filter(|item| item.id != product_id)
        .collect()
}

pub fn grand_total(cart: &[CartItem]) -> f64 {
    cart.iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum()
}
