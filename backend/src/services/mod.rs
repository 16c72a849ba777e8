//! Module for core business logic services.
//!
//! Services sit between the HTTP handlers and the repositories: they own
//! validation that needs state, hashing, random record generation and the
//! storage time bounds.

pub mod doctor_service;
pub mod medical_history_service;
pub mod otp_service;
pub mod user_service;
