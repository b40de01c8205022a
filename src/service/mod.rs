//! Request validation rules and the middleware that enforces them.

mod middleware;
mod validation;
pub use middleware::{validate_request, RouteRules, ValidatedJson};
pub use validation::*;
