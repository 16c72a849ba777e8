//! Application API endpoints outside authentication: the protected records
//! surface and shared response helpers.

pub mod common;
pub mod dashboard;
pub mod doctor;
pub mod medical_history;
