pub mod auth_service;
pub mod cart_service;
pub mod catalog_service;
pub mod image_service;
pub mod membership_service;
pub mod order_service;
pub mod user_service;

pub use auth_service::*;
pub use cart_service::*;
pub use catalog_service::*;
pub use image_service::*;
pub use membership_service::*;
pub use order_service::*;
pub use user_service::*;
