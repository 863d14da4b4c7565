use crate::error::{AppError, AppResult};
use crate::external::GeminiService;
use crate::models::EditImageRequest;

#[derive(Clone)]
pub struct ImageService {
    gemini: GeminiService,
}

impl ImageService {
    pub fn new(gemini: GeminiService) -> Self {
        Self { gemini }
    }

    /// 商品图编辑。Ok(None) 表示模型没给图（区别于调用失败）。
    pub async fn edit_product_image(&self, request: EditImageRequest) -> AppResult<Option<String>> {
        if request.image.trim().is_empty() || request.prompt.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Image and prompt are mandatory".to_string(),
            ));
        }
        self.gemini.edit_image(&request.image, &request.prompt).await
    }
}
