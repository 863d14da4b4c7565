use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::require_role;
use crate::models::UserRole;
use crate::services::UserService;

#[utoipa::path(
    get,
    path = "/users",
    tag = "user",
    responses(
        (status = 200, description = "用户/商户列表（维护页）"),
        (status = 401, description = "没有活动会话"),
        (status = 403, description = "仅管理员可见")
    )
)]
pub async fn get_users(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_role(&req, UserRole::Admin) {
        return Ok(e.error_response());
    }

    match user_service.list_users().await {
        Ok(users) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": users
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/users").route("", web::get().to(get_users)));
}
