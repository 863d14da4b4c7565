use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::require_role;
use crate::models::*;
use crate::services::CatalogService;

#[utoipa::path(
    get,
    path = "/products",
    tag = "product",
    params(
        ("category" = Option<String>, Query, description = "类目过滤，\"All\" 返回全量")
    ),
    responses(
        (status = 200, description = "买家视角的商品目录"),
        (status = 401, description = "没有活动会话")
    )
)]
pub async fn get_products(
    catalog_service: web::Data<CatalogService>,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse> {
    match catalog_service
        .list_by_category(query.category.as_deref())
        .await
    {
        Ok(products) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": products
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/products/categories",
    tag = "product",
    responses(
        (status = 200, description = "可选类目集合（含 \"All\" 哨兵）")
    )
)]
pub async fn get_categories(catalog_service: web::Data<CatalogService>) -> Result<HttpResponse> {
    match catalog_service.categories().await {
        Ok(categories) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": categories
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/products/mine",
    tag = "product",
    responses(
        (status = 200, description = "商户自己的商品"),
        (status = 403, description = "仅商户可见")
    )
)]
pub async fn get_my_products(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let vendor = match require_role(&req, UserRole::Vendor) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match catalog_service.list_for_vendor(&vendor.id).await {
        Ok(products) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": products
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "product",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "商品已上架", body = Product),
        (status = 400, description = "缺少名称/价格/图片"),
        (status = 403, description = "仅商户可操作")
    )
)]
pub async fn create_product(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse> {
    let vendor = match require_role(&req, UserRole::Vendor) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match catalog_service
        .add_product(&vendor, request.into_inner())
        .await
    {
        Ok(product) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": product
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "product",
    request_body = UpdateProductRequest,
    params(
        ("id" = String, Path, description = "商品 id")
    ),
    responses(
        (status = 200, description = "只替换 name/price/image；商户名下没有该 id 时 data 为 null"),
        (status = 403, description = "仅商户可操作")
    )
)]
pub async fn update_product(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse> {
    let vendor = match require_role(&req, UserRole::Vendor) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match catalog_service
        .update_product(&vendor.id, &path.into_inner(), request.into_inner())
        .await
    {
        Ok(updated) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": updated
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "product",
    params(
        ("id" = String, Path, description = "商品 id")
    ),
    responses(
        (status = 200, description = "已删除（不存在时同样成功）"),
        (status = 403, description = "仅商户可操作")
    )
)]
pub async fn delete_product(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let vendor = match require_role(&req, UserRole::Vendor) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match catalog_service
        .delete_product(&vendor.id, &path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn product_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(get_products))
            .route("", web::post().to(create_product))
            .route("/categories", web::get().to(get_categories))
            .route("/mine", web::get().to(get_my_products))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
