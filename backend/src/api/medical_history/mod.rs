//! Medical history endpoints.

pub mod handlers;
pub mod routes;
