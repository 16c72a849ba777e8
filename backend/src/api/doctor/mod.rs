//! Doctor directory endpoints.

pub mod handlers;
pub mod routes;
