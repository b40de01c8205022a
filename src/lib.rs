//! Product API: a small REST service exposing CRUD over products, backed by PostgreSQL.

pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreKind};
pub use error::{AppError, ConfigError};
pub use migration::{ensure_database_exists, ensure_products_table};
pub use model::{NewProduct, Product, ProductPatch};
pub use routes::{app, common_routes, product_routes, PRODUCTS_BASE_PATH};
pub use state::AppState;
pub use store::{MemoryProductStore, PgProductStore, ProductStore};
