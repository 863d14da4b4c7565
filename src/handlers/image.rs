use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::require_role;
use crate::models::*;
use crate::services::ImageService;

#[utoipa::path(
    post,
    path = "/images/edit",
    tag = "image",
    request_body = EditImageRequest,
    responses(
        (status = 200, description = "编辑后的图片（data URI）；模型没返回图片时 success=false、code=NO_IMAGE_RETURNED", body = EditImageResponse),
        (status = 403, description = "仅商户可编辑商品图"),
        (status = 502, description = "外部图片编辑服务调用失败")
    )
)]
pub async fn edit_image(
    image_service: web::Data<ImageService>,
    req: HttpRequest,
    request: web::Json<EditImageRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_role(&req, UserRole::Vendor) {
        return Ok(e.error_response());
    }

    match image_service.edit_product_image(request.into_inner()).await {
        Ok(Some(image)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": EditImageResponse { image }
        }))),
        // 模型应答正常但没有图片部件：与传输失败区分开
        Ok(None) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::error(
            "NO_IMAGE_RETURNED".to_string(),
            "The model did not return an edited image".to_string(),
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn image_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/images").route("/edit", web::post().to(edit_image)));
}
