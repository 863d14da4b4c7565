use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::{get_current_user, require_role};
use crate::models::*;
use crate::services::OrderService;

fn no_session() -> crate::error::AppError {
    crate::error::AppError::AuthError("No active session".to_string())
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "order",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "从当前购物车落单；购物车要等确认步骤才清空", body = Order),
        (status = 400, description = "购物车为空或缺少地址/城市"),
        (status = 403, description = "仅买家可下单")
    )
)]
pub async fn checkout(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    request: web::Json<CheckoutRequest>,
) -> Result<HttpResponse> {
    let shopper = match require_role(&req, UserRole::User) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match order_service.checkout(&shopper.id, request.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order,
            "message": "Your order has been placed successfully."
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/orders/confirm",
    tag = "order",
    responses(
        (status = 200, description = "买家确认下单完成，此时才清空购物车"),
        (status = 403, description = "仅买家可确认")
    )
)]
pub async fn confirm_order(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let shopper = match require_role(&req, UserRole::User) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match order_service.complete_order(&shopper.id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Cart cleared"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    responses(
        (status = 200, description = "买家只看自己的订单，管理员看全量"),
        (status = 401, description = "没有活动会话"),
        (status = 403, description = "商户没有订单视图")
    )
)]
pub async fn get_orders(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let actor = match get_current_user(&req) {
        Some(user) => user,
        None => return Ok(no_session().error_response()),
    };

    match order_service.list_orders(&actor).await {
        Ok(orders) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": orders
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/orders/{id}/status",
    tag = "order",
    request_body = UpdateOrderStatusRequest,
    params(
        ("id" = String, Path, description = "订单号")
    ),
    responses(
        (status = 200, description = "状态已替换，其余字段不动", body = Order),
        (status = 403, description = "角色没有该转换的权限"),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn update_status(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse> {
    let actor = match get_current_user(&req) {
        Some(user) => user,
        None => return Ok(no_session().error_response()),
    };

    match order_service
        .update_status(&path.into_inner(), request.into_inner().status, &actor)
        .await
    {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "order",
    params(
        ("id" = String, Path, description = "订单号")
    ),
    responses(
        (status = 200, description = "订单记录已删除"),
        (status = 403, description = "仅管理员可删除"),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn delete_order(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let actor = match get_current_user(&req) {
        Some(user) => user,
        None => return Ok(no_session().error_response()),
    };

    match order_service.delete_order(&path.into_inner(), &actor).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(checkout))
            .route("", web::get().to(get_orders))
            .route("/confirm", web::post().to(confirm_order))
            .route("/{id}/status", web::put().to(update_status))
            .route("/{id}", web::delete().to(delete_order)),
    );
}
