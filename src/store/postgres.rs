//! PostgreSQL-backed product store.

use super::ProductStore;
use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductPatch};
use crate::migration::PRODUCTS_TABLE;
use async_trait::async_trait;
use sqlx::PgPool;

/// Columns exposed by the API; timestamps stay internal.
const PUBLIC_COLUMNS: &str = "id, name, price, availability";

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self) -> Result<Vec<Product>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", PUBLIC_COLUMNS, PRODUCTS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find(&self, id: i32) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", PUBLIC_COLUMNS, PRODUCTS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, input: &NewProduct) -> Result<Product, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, price, availability) VALUES ($1, $2, $3) RETURNING {}",
            PRODUCTS_TABLE, PUBLIC_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.availability.unwrap_or(true))
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, patch: &ProductPatch) -> Result<Option<Product>, AppError> {
        let sql = format!(
            "UPDATE {} SET \
                name = COALESCE($2, name), \
                price = COALESCE($3, price), \
                availability = COALESCE($4, availability), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            PRODUCTS_TABLE, PUBLIC_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(patch.name.as_deref())
            .bind(patch.price)
            .bind(patch.availability)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", PRODUCTS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
