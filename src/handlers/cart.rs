use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::require_role;
use crate::models::*;
use crate::services::CartService;

#[utoipa::path(
    get,
    path = "/cart",
    tag = "cart",
    responses(
        (status = 200, description = "当前购物车（行项目、总价、角标数量）", body = CartResponse),
        (status = 403, description = "仅买家有购物车")
    )
)]
pub async fn get_cart(cart_service: web::Data<CartService>, req: HttpRequest) -> Result<HttpResponse> {
    let shopper = match require_role(&req, UserRole::User) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service.get_cart(&shopper.id).await {
        Ok(cart) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": cart
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cart/items",
    tag = "cart",
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "同商品重复加车数量 +1", body = CartResponse),
        (status = 404, description = "商品不存在"),
        (status = 403, description = "仅买家有购物车")
    )
)]
pub async fn add_item(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    request: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse> {
    let shopper = match require_role(&req, UserRole::User) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service.add_to_cart(&shopper.id, &request.product_id).await {
        Ok(cart) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": cart
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/cart/items/{id}",
    tag = "cart",
    request_body = UpdateCartItemRequest,
    params(
        ("id" = String, Path, description = "商品 id")
    ),
    responses(
        (status = 200, description = "数量下限为 1，小于 1 的请求静默拒绝", body = CartResponse),
        (status = 403, description = "仅买家有购物车")
    )
)]
pub async fn update_item(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<UpdateCartItemRequest>,
) -> Result<HttpResponse> {
    let shopper = match require_role(&req, UserRole::User) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service
        .update_quantity(&shopper.id, &path.into_inner(), request.quantity)
        .await
    {
        Ok(cart) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": cart
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/cart/items/{id}",
    tag = "cart",
    params(
        ("id" = String, Path, description = "商品 id")
    ),
    responses(
        (status = 200, description = "移除行项目（不存在时 no-op）", body = CartResponse),
        (status = 403, description = "仅买家有购物车")
    )
)]
pub async fn remove_item(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let shopper = match require_role(&req, UserRole::User) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service.remove_item(&shopper.id, &path.into_inner()).await {
        Ok(cart) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": cart
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/cart",
    tag = "cart",
    responses(
        (status = 200, description = "Delete All：整车清空", body = CartResponse),
        (status = 403, description = "仅买家有购物车")
    )
)]
pub async fn clear_cart(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let shopper = match require_role(&req, UserRole::User) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service.clear(&shopper.id).await {
        Ok(cart) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": cart
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn cart_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .route("", web::get().to(get_cart))
            .route("", web::delete().to(clear_cart))
            .route("/items", web::post().to(add_item))
            .route("/items/{id}", web::put().to(update_item))
            .route("/items/{id}", web::delete().to(remove_item)),
    );
}
