//! In-process product store. Used by the test-suite and when running without a database.

use super::ProductStore;
use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductPatch};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    next_id: i32,
    rows: BTreeMap<i32, Product>,
}

#[derive(Default)]
pub struct MemoryProductStore {
    inner: RwLock<Inner>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Product>, AppError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, input: &NewProduct) -> Result<Product, AppError> {
        let mut inner = self.inner.write().await;
        // Ids start at 1 and are never reused, like a SERIAL column.
        inner.next_id += 1;
        let product = Product {
            id: inner.next_id,
            name: input.name.clone(),
            price: input.price,
            availability: input.availability.unwrap_or(true),
        };
        inner.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, patch: &ProductPatch) -> Result<Option<Product>, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.get_mut(&id).map(|product| {
            patch.apply(product);
            product.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.into(),
            price,
            availability: None,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_and_not_reused() {
        let store = MemoryProductStore::new();
        let a = store.create(&input("a", 1.0)).await.unwrap();
        let b = store.create(&input("b", 2.0)).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert!(a.availability);

        assert!(store.delete(b.id).await.unwrap());
        let c = store.create(&input("c", 3.0)).await.unwrap();
        assert_eq!(c.id, 3);
        assert!(!store.delete(b.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_missing_row_returns_none() {
        let store = MemoryProductStore::new();
        let patch = ProductPatch {
            price: Some(5.0),
            ..Default::default()
        };
        assert!(store.update(99, &patch).await.unwrap().is_none());
    }
}
