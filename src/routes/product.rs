//! Product routes, each bound to the validation rules its handler relies on.
//! `/update/:id` answers both PUT and POST; older clients still use POST.

use crate::handlers::product::{create, delete as delete_handler, list, read, update};
use crate::service::{validate_request, RouteRules, RuleSet, PRODUCT_BODY, PRODUCT_ID, PRODUCT_UPDATE};
use crate::state::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};

/// Product routes; `body_limit` caps how much of a body validation will buffer.
pub fn product_routes(state: AppState, body_limit: usize) -> Router {
    let validated = |rules: RuleSet, route: MethodRouter<AppState>| {
        route.route_layer(from_fn_with_state(RouteRules { rules, body_limit }, validate_request))
    };
    Router::new()
        .route("/", get(list).merge(validated(PRODUCT_BODY, post(create))))
        .route("/:id", validated(PRODUCT_ID, get(read)))
        .route("/update/:id", validated(PRODUCT_UPDATE, put(update).post(update)))
        .route("/delete/:id", validated(PRODUCT_ID, delete(delete_handler)))
        .with_state(state)
}
