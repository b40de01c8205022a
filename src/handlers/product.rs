//! Product handlers: create, list, read, update, delete. Input has already passed the
//! route's validation rules by the time these run.

use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductPatch};
use crate::response::{message_ok, success_one, success_one_ok};
use crate::service::ValidatedJson;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub const PRODUCT_DELETED: &str = "product deleted successfully";

// Validation admits any numeric string; ids that are not a valid integer key match nothing.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::NotFound(id_str.to_string()))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = crate::docs::ProductResponse),
        (status = 400, description = "Invalid input data"),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<NewProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.store.create(&body).await?;
    tracing::info!(id = product.id, "product created");
    Ok(success_one(product))
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses((status = 200, description = "All products", body = crate::docs::ProductListResponse))
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products: Vec<Product> = state.store.list().await?;
    Ok(success_one_ok(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = crate::docs::ProductResponse),
        (status = 400, description = "Invalid id or product not found"),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let product = state.store.find(id).await?.ok_or(AppError::NotFound(id_str))?;
    Ok(success_one_ok(product))
}

#[utoipa::path(
    put,
    path = "/api/products/update/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "Updated product", body = crate::docs::ProductResponse),
        (status = 400, description = "Invalid id, invalid input data or product not found"),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidatedJson(patch): ValidatedJson<ProductPatch>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let product = state
        .store
        .update(id, &patch)
        .await?
        .ok_or(AppError::NotFound(id_str))?;
    tracing::info!(id, "product updated");
    Ok(success_one_ok(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/delete/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = String),
        (status = 400, description = "Invalid id or product not found"),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(id_str));
    }
    tracing::info!(id, "product deleted");
    Ok(message_ok(PRODUCT_DELETED))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers_only() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("1.5"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_id("99999999999"), Err(AppError::NotFound(_))));
    }
}
