//! Authentication module: registration, login, phone OTPs and the bearer
//! token gate that guards everything under `/protected`.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
