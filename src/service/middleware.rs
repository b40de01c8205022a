//! Route-level validation middleware and the extractor handlers use to read the body it checked.

use super::validation::RuleSet;
use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Middleware state: a route's rules plus the largest body it will buffer.
#[derive(Clone, Copy, Debug)]
pub struct RouteRules {
    pub rules: RuleSet,
    pub body_limit: usize,
}

/// Body as parsed by [`validate_request`], handed on to the handler through request extensions.
#[derive(Clone, Debug)]
struct CheckedBody(Value);

/// Evaluate the rule set against path params and JSON body. On failure respond 400 with
/// the full error list; otherwise forward the request with its body restored.
pub async fn validate_request(State(route): State<RouteRules>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let params: HashMap<String, String> = Path::<HashMap<String, String>>::from_request_parts(&mut parts, &())
        .await
        .map(|Path(p)| p)
        .unwrap_or_default();

    let (body, value) = if route.rules.needs_body() {
        let bytes = match read_body(body, route.body_limit).await {
            Ok(b) => b,
            Err(e) => return e.into_response(),
        };
        let value = match parse_json_body(&bytes) {
            Ok(v) => v,
            Err(e) => return e.into_response(),
        };
        parts.extensions.insert(CheckedBody(value.clone()));
        (Body::from(bytes), value)
    } else {
        (body, Value::Null)
    };

    if let Err(errors) = route.rules.evaluate(&params, &value) {
        tracing::debug!(path = %parts.uri.path(), failures = errors.errors.len(), "request rejected by validation");
        return AppError::Validation(errors).into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, AppError> {
    to_bytes(body, limit).await.map_err(|e| {
        let mut source: Option<&(dyn std::error::Error + 'static)> = Some(&e);
        while let Some(err) = source {
            if err.is::<LengthLimitError>() {
                return AppError::PayloadTooLarge(limit);
            }
            source = err.source();
        }
        AppError::BadRequest(format!("unreadable body: {}", e))
    })
}

/// Empty (or whitespace-only) bodies read as `{}`. The Content-Type header is not consulted.
fn parse_json_body(bytes: &[u8]) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(bytes).map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))
}

/// JSON body extractor for validated routes. Reuses the value the middleware parsed, so
/// whatever passed validation deserializes the same way regardless of Content-Type.
/// Deserialization failures surface as [`AppError`] rather than axum's plain-text rejection.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(mut req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let value = match req.extensions_mut().remove::<CheckedBody>() {
            Some(CheckedBody(v)) => v,
            None => {
                let bytes = read_body(req.into_body(), usize::MAX).await?;
                parse_json_body(&bytes)?
            }
        };
        serde_json::from_value(value)
            .map(ValidatedJson)
            .map_err(|e| AppError::BadRequest(format!("invalid body: {}", e)))
    }
}
