pub mod cart;
pub mod common;
pub mod image;
pub mod membership;
pub mod order;
pub mod product;
pub mod user;

pub use cart::*;
pub use common::*;
pub use image::*;
pub use membership::*;
pub use order::*;
pub use product::*;
pub use user::*;
