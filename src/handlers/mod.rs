//! HTTP handlers for the product resource and the API info endpoint.

pub mod info;
pub mod product;
pub use info::api_info;
