//! OpenAPI description of the product API, served as JSON at `/docs/openapi.json`.

use crate::handlers::product;
use crate::model::{NewProduct, Product, ProductPatch};
use axum::Json;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// `{ "data": Product }`
#[derive(Serialize, ToSchema)]
pub struct ProductResponse {
    pub data: Product,
}

/// `{ "data": [Product] }`
#[derive(Serialize, ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Products REST API", description = "CRUD over the product catalogue"),
    paths(
        product::list,
        product::read,
        product::create,
        product::update,
        product::delete,
    ),
    components(schemas(Product, NewProduct, ProductPatch, ProductResponse, ProductListResponse)),
    tags((name = "Products", description = "Product catalogue"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
