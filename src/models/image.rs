use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EditImageRequest {
    /// data URI 或裸 base64 的商品图
    #[schema(example = "data:image/png;base64,...")]
    pub image: String,
    #[schema(example = "Make the background white")]
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EditImageResponse {
    /// 编辑后的图片，data URI 形式
    pub image: String,
}
