use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::store::SharedStore;
use crate::utils::generate_product_id;

#[derive(Clone)]
pub struct CatalogService {
    store: SharedStore,
}

impl CatalogService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// 买家视角的目录：按类目过滤，"All" 哨兵返回全量
    pub async fn list_by_category(&self, category: Option<&str>) -> AppResult<Vec<Product>> {
        let products = self.store.products.read().await;
        let items = match category {
            None => products.clone(),
            Some(c) if c == ALL_CATEGORIES => products.clone(),
            Some(c) => products.iter().filter(|p| p.category == c).cloned().collect(),
        };
        Ok(items)
    }

    /// 可选类目集合 = 目录中出现过的去重类目 + "All" 哨兵
    pub async fn categories(&self) -> AppResult<Vec<String>> {
        let products = self.store.products.read().await;
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for product in products.iter() {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        Ok(categories)
    }

    /// 商户管理视角：只看自己的商品
    pub async fn list_for_vendor(&self, vendor_id: &str) -> AppResult<Vec<Product>> {
        let products = self.store.products.read().await;
        Ok(products
            .iter()
            .filter(|p| p.vendor_id == vendor_id)
            .cloned()
            .collect())
    }

    pub async fn add_product(
        &self,
        vendor: &User,
        request: CreateProductRequest,
    ) -> AppResult<Product> {
        validate_product_fields(&request.name, request.price, &request.image)?;

        let category = request
            .category
            .filter(|c| !c.trim().is_empty())
            .or_else(|| vendor.category.clone())
            .unwrap_or_else(|| "General".to_string());

        let product = Product {
            id: generate_product_id(),
            vendor_id: vendor.id.clone(),
            name: request.name,
            price: request.price,
            image: request.image,
            category,
        };

        let mut products = self.store.products.write().await;
        products.push(product.clone());
        Ok(product)
    }

    /// 只替换 name/price/image；id、vendor_id、category 保持不变。
    /// 在该商户名下找不到 id 时为 no-op，返回 None。
    pub async fn update_product(
        &self,
        vendor_id: &str,
        product_id: &str,
        request: UpdateProductRequest,
    ) -> AppResult<Option<Product>> {
        validate_product_fields(&request.name, request.price, &request.image)?;

        let mut products = self.store.products.write().await;
        let updated = products
            .iter_mut()
            .find(|p| p.id == product_id && p.vendor_id == vendor_id)
            .map(|p| {
                p.name = request.name;
                p.price = request.price;
                p.image = request.image;
                p.clone()
            });
        Ok(updated)
    }

    /// 不存在（或不属于该商户）时为 no-op
    pub async fn delete_product(&self, vendor_id: &str, product_id: &str) -> AppResult<()> {
        let mut products = self.store.products.write().await;
        products.retain(|p| !(p.id == product_id && p.vendor_id == vendor_id));
        Ok(())
    }
}

fn validate_product_fields(name: &str, price: f64, image: &str) -> AppResult<()> {
    if name.trim().is_empty() || image.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Product name, price and image are mandatory".to_string(),
        ));
    }
    if !(price >= 0.0) {
        return Err(AppError::ValidationError(
            "Product price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AppStore;

    fn vendor_with_category() -> User {
        User {
            id: "2".to_string(),
            name: "Vendor 1".to_string(),
            email: "vendor1@ems.com".to_string(),
            role: UserRole::Vendor,
            password: Some("password".to_string()),
            category: Some("Catering".to_string()),
        }
    }

    fn vendor_without_category() -> User {
        User {
            id: "9".to_string(),
            name: "Vendor 9".to_string(),
            email: "vendor9@ems.com".to_string(),
            role: UserRole::Vendor,
            password: Some("password".to_string()),
            category: None,
        }
    }

    fn create_request(name: &str, price: f64, image: &str) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            price,
            image: image.to_string(),
            category: None,
        }
    }

    #[tokio::test]
    async fn test_add_product_defaults_to_vendor_category() {
        let service = CatalogService::new(AppStore::new());
        let product = service
            .add_product(&vendor_with_category(), create_request("Buffet", 1200.0, "img"))
            .await
            .unwrap();
        assert_eq!(product.category, "Catering");
        assert_eq!(product.vendor_id, "2");
    }

    #[tokio::test]
    async fn test_add_product_falls_back_to_general() {
        let service = CatalogService::new(AppStore::new());
        let product = service
            .add_product(&vendor_without_category(), create_request("Chairs", 80.0, "img"))
            .await
            .unwrap();
        assert_eq!(product.category, "General");
    }

    #[tokio::test]
    async fn test_add_product_empty_image_fails_and_leaves_catalog_unchanged() {
        let store = AppStore::new();
        let service = CatalogService::new(store.clone());
        let err = service
            .add_product(&vendor_with_category(), create_request("Buffet", 1200.0, ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(store.products.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_product_negative_price_fails() {
        let service = CatalogService::new(AppStore::new());
        let err = service
            .add_product(&vendor_with_category(), create_request("Buffet", -1.0, "img"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_product_preserves_identity_and_category() {
        let service = CatalogService::new(AppStore::new());
        let created = service
            .add_product(&vendor_with_category(), create_request("Buffet", 1200.0, "img"))
            .await
            .unwrap();

        let updated = service
            .update_product(
                "2",
                &created.id,
                UpdateProductRequest {
                    name: "Deluxe Buffet".to_string(),
                    price: 1500.0,
                    image: "img2".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.vendor_id, "2");
        assert_eq!(updated.category, "Catering");
        assert_eq!(updated.name, "Deluxe Buffet");
        assert_eq!(updated.price, 1500.0);
    }

    #[tokio::test]
    async fn test_update_product_unknown_id_is_a_no_op() {
        let service = CatalogService::new(AppStore::new());
        let updated = service
            .update_product(
                "2",
                "missing",
                UpdateProductRequest {
                    name: "X".to_string(),
                    price: 1.0,
                    image: "img".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_update_product_scoped_to_owning_vendor() {
        let service = CatalogService::new(AppStore::new());
        let created = service
            .add_product(&vendor_with_category(), create_request("Buffet", 1200.0, "img"))
            .await
            .unwrap();

        // 其他商户操作同一 id 视为不存在
        let updated = service
            .update_product(
                "9",
                &created.id,
                UpdateProductRequest {
                    name: "Hijacked".to_string(),
                    price: 1.0,
                    image: "img".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete_product_absent_is_a_no_op() {
        let store = AppStore::new();
        let service = CatalogService::new(store.clone());
        service.delete_product("2", "missing").await.unwrap();
        assert!(store.products.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_by_category_with_sentinel_returns_everything() {
        let service = CatalogService::new(AppStore::new());
        service
            .add_product(&vendor_with_category(), create_request("Buffet", 1200.0, "img"))
            .await
            .unwrap();
        service
            .add_product(&vendor_without_category(), create_request("Chairs", 80.0, "img"))
            .await
            .unwrap();

        let all = service.list_by_category(Some(ALL_CATEGORIES)).await.unwrap();
        assert_eq!(all.len(), 2);

        let catering = service.list_by_category(Some("Catering")).await.unwrap();
        assert_eq!(catering.len(), 1);
        assert_eq!(catering[0].name, "Buffet");

        let categories = service.categories().await.unwrap();
        assert!(categories.contains(&ALL_CATEGORIES.to_string()));
        assert!(categories.contains(&"Catering".to_string()));
        assert!(categories.contains(&"General".to_string()));
        assert_eq!(categories.len(), 3);
    }
}
