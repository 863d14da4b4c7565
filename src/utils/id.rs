use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

/// 生成时间派生的订单号（ORD-毫秒时间戳）。
/// 与账本中现有订单号撞车时追加三位随机后缀直至唯一。
pub fn generate_order_id(existing_ids: &[&str]) -> String {
    let base = format!("ORD-{}", Utc::now().timestamp_millis());
    if !existing_ids.contains(&base.as_str()) {
        return base;
    }

    let mut rng = rand::thread_rng();
    loop {
        let candidate = format!("{}-{:03}", base, rng.gen_range(0..1000));
        if !existing_ids.contains(&candidate.as_str()) {
            return candidate;
        }
    }
}

/// 生成商品 id
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}
