//! Static informational endpoint mounted next to the product routes.

use axum::Json;
use serde_json::{json, Value};

pub async fn api_info() -> Json<Value> {
    Json(json!({ "msg": "Desde api" }))
}
