pub mod auth;
pub mod cart;
pub mod image;
pub mod membership;
pub mod order;
pub mod product;
pub mod user;

pub use auth::auth_config;
pub use cart::cart_config;
pub use image::image_config;
pub use membership::membership_config;
pub use order::order_config;
pub use product::product_config;
pub use user::user_config;
