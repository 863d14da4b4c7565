use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::me,
        handlers::user::get_users,
        handlers::product::get_products,
        handlers::product::get_categories,
        handlers::product::get_my_products,
        handlers::product::create_product,
        handlers::product::update_product,
        handlers::product::delete_product,
        handlers::cart::get_cart,
        handlers::cart::add_item,
        handlers::cart::update_item,
        handlers::cart::remove_item,
        handlers::cart::clear_cart,
        handlers::order::checkout,
        handlers::order::confirm_order,
        handlers::order::get_orders,
        handlers::order::update_status,
        handlers::order::delete_order,
        handlers::membership::get_memberships,
        handlers::membership::create_membership,
        handlers::membership::update_membership,
        handlers::image::edit_image,
    ),
    components(
        schemas(
            User,
            UserRole,
            UserResponse,
            LoginRequest,
            Product,
            CreateProductRequest,
            UpdateProductRequest,
            ProductQuery,
            CartItem,
            AddCartItemRequest,
            UpdateCartItemRequest,
            CartResponse,
            Order,
            OrderStatus,
            PaymentMethod,
            CheckoutRequest,
            UpdateOrderStatusRequest,
            Membership,
            MembershipType,
            CreateMembershipRequest,
            UpdateMembershipRequest,
            EditImageRequest,
            EditImageResponse,
            ApiError,
        )
    ),
    tags(
        (name = "auth", description = "Session API"),
        (name = "user", description = "User/vendor maintenance API"),
        (name = "product", description = "Catalog API"),
        (name = "cart", description = "Shopping cart API"),
        (name = "order", description = "Order lifecycle API"),
        (name = "membership", description = "Vendor membership API"),
        (name = "image", description = "Product image editing API"),
    ),
    info(
        title = "EMS Backend API",
        version = "1.0.0",
        description = "Event Management System storefront REST API documentation",
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
