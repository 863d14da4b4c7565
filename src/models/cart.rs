use crate::models::Product;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: String,
    pub vendor_id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            vendor_id: product.vendor_id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddCartItemRequest {
    pub product_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    #[schema(example = 2)]
    pub quantity: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub grand_total: f64,
    /// 所有行项目数量之和，购物车角标用
    pub item_count: u32,
}

impl CartResponse {
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let grand_total = items.iter().map(|i| i.price * f64::from(i.quantity)).sum();
        let item_count = items.iter().map(|i| i.quantity).sum();
        Self {
            items,
            grand_total,
            item_count,
        }
    }
}
