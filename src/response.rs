//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// `{ "data": ... }`, the shape every successful product response uses.
#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub data: T,
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::CREATED, Json(SuccessOne { data }))
}

pub fn success_one_ok<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::OK, Json(SuccessOne { data }))
}

/// Bare JSON string body, e.g. a confirmation message.
pub fn message_ok(message: &'static str) -> (StatusCode, Json<&'static str>) {
    (StatusCode::OK, Json(message))
}
