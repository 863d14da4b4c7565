use crate::models::CartItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum OrderStatus {
    #[serde(rename = "Received")]
    Received,
    #[serde(rename = "Ready for Shipping")]
    ReadyForShipping,
    #[serde(rename = "Out For Delivery")]
    OutForDelivery,
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Received => write!(f, "Received"),
            OrderStatus::ReadyForShipping => write!(f, "Ready for Shipping"),
            OrderStatus::OutForDelivery => write!(f, "Out For Delivery"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum PaymentMethod {
    #[serde(rename = "Cash")]
    Cash,
    #[serde(rename = "UPI")]
    Upi,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    /// 下单时购物车的快照副本，之后的目录/购物车变更不影响它
    pub items: Vec<CartItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub address: String,
    pub city: String,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    #[schema(example = "12 Main St")]
    pub address: String,
    #[schema(example = "Springfield")]
    pub city: String,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}
