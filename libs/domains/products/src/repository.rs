use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, ordered by ascending id
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Store a new product; the id and both timestamps are assigned here
    async fn insert(&self, input: ProductInput) -> ProductResult<Product>;

    /// Get a product by ID
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Replace every editable field of an existing product
    async fn update(&self, id: i64, input: ProductInput) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether a row was removed
    async fn delete(&self, id: i64) -> ProductResult<bool>;
}

#[derive(Debug)]
struct Inner {
    products: BTreeMap<i64, Product>,
    next_id: i64,
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                products: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.values().cloned().collect())
    }

    async fn insert(&self, input: ProductInput) -> ProductResult<Product> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id += 1;

        let product = Product::new(id, input, Utc::now());
        inner.products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.get(&id).cloned())
    }

    async fn update(&self, id: i64, input: ProductInput) -> ProductResult<Product> {
        let mut inner = self.inner.write().await;

        let product = inner
            .products
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;
        product.apply_update(input, Utc::now());

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut inner = self.inner.write().await;

        if inner.products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: format!("{name} description"),
            price: 10.0,
            stock: 5,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repo = InMemoryProductRepository::new();

        let product = repo.insert(input("Laptop")).await.unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Laptop");
        assert_eq!(product.created_at, product.updated_at);

        let fetched = repo.find_by_id(product.id).await.unwrap();
        assert_eq!(fetched, Some(product));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = InMemoryProductRepository::new();
        for name in ["c", "a", "b"] {
            repo.insert(input(name)).await.unwrap();
        }

        let ids: Vec<i64> = repo.find_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryProductRepository::new();
        let first = repo.insert(input("first")).await.unwrap();

        assert!(repo.delete(first.id).await.unwrap());
        assert!(!repo.delete(first.id).await.unwrap());

        let second = repo.insert(input("second")).await.unwrap();
        assert_eq!(second.id, first.id + 1);
        assert_eq!(repo.find_by_id(first.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = InMemoryProductRepository::new();

        let result = repo.update(42, input("ghost")).await;
        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_created_at() {
        let repo = InMemoryProductRepository::new();
        let created = repo.insert(input("Laptop")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                ProductInput {
                    stock: 0,
                    ..input("Laptop Pro")
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Laptop Pro");
        assert_eq!(updated.stock, 0);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }
}
