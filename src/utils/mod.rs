pub mod id;

pub use id::{generate_order_id, generate_product_id};
