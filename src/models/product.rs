use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 商品目录中跨类目查询的哨兵值，不是真实类目
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub vendor_id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Rose Bouquet")]
    pub name: String,
    #[schema(example = 499.0)]
    pub price: f64,
    #[schema(example = "data:image/png;base64,...")]
    pub image: String,
    /// 省略时回落到商户自身的类目，无类目商户则为 "General"
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: f64,
    pub image: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub category: Option<String>,
}
