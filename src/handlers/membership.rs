use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::require_role;
use crate::models::*;
use crate::services::MembershipService;

#[utoipa::path(
    get,
    path = "/memberships",
    tag = "membership",
    responses(
        (status = 200, description = "会员注册表"),
        (status = 403, description = "仅管理员可见")
    )
)]
pub async fn get_memberships(
    membership_service: web::Data<MembershipService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_role(&req, UserRole::Admin) {
        return Ok(e.error_response());
    }

    match membership_service.list_memberships().await {
        Ok(memberships) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": memberships
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/memberships",
    tag = "membership",
    request_body = CreateMembershipRequest,
    responses(
        (status = 200, description = "会员已登记", body = Membership),
        (status = 400, description = "字段缺失、会员号重复或用户不是商户"),
        (status = 403, description = "仅管理员可操作")
    )
)]
pub async fn create_membership(
    membership_service: web::Data<MembershipService>,
    req: HttpRequest,
    request: web::Json<CreateMembershipRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_role(&req, UserRole::Admin) {
        return Ok(e.error_response());
    }

    match membership_service.add_membership(request.into_inner()).await {
        Ok(membership) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": membership
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/memberships/{number}",
    tag = "membership",
    request_body = UpdateMembershipRequest,
    params(
        ("number" = String, Path, description = "会员号")
    ),
    responses(
        (status = 200, description = "只替换 type，其余字段不动", body = Membership),
        (status = 403, description = "仅管理员可操作"),
        (status = 404, description = "会员号不存在")
    )
)]
pub async fn update_membership(
    membership_service: web::Data<MembershipService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<UpdateMembershipRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_role(&req, UserRole::Admin) {
        return Ok(e.error_response());
    }

    match membership_service
        .update_membership(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(membership) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": membership
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn membership_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/memberships")
            .route("", web::get().to(get_memberships))
            .route("", web::post().to(create_membership))
            .route("/{number}", web::put().to(update_membership)),
    );
}
