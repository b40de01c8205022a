//! Product persistence: the store trait the handlers depend on, plus Postgres and in-memory backends.

mod memory;
mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductPatch};
use async_trait::async_trait;

/// Persistence operations for products. Implementations must be safe to share across requests.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products ordered by id.
    async fn list(&self) -> Result<Vec<Product>, AppError>;

    async fn find(&self, id: i32) -> Result<Option<Product>, AppError>;

    /// Insert and return the stored row with its assigned id. `availability` defaults to true.
    async fn create(&self, input: &NewProduct) -> Result<Product, AppError>;

    /// Apply a partial update. Returns `None` when no row has this id.
    async fn update(&self, id: i32, patch: &ProductPatch) -> Result<Option<Product>, AppError>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;

    /// Cheap liveness probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
