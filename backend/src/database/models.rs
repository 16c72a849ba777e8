//! Rust structs that represent database table mappings.
//!
//! Users map onto columns one-to-one. Doctors and medical histories are stored
//! as JSON documents next to a few indexed columns, so their nested lists do
//! not need their own tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values needed to insert a user row. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Social {
    pub linkedin: String,
    pub twitter: String,
    pub facebook: String,
    pub instagram: String,
    pub website: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub speciality: String,
    pub phone: String,
    pub email: String,
    pub clinic_name: String,
    pub clinic_address: String,
    pub profile_picture: String,
    pub rating: f32,
    pub experience: i64,
    pub availability: Vec<String>,
    pub fee: f64,
    pub languages: Vec<String>,
    pub qualifications: Vec<String>,
    pub services: Vec<String>,
    pub about: String,
    pub social_links: Social,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub condition: String,
    pub severity: String,
    pub notes: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    pub medication_name: String,
    pub dosage: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub doctor_id: String,
    pub doctor_name: String,
    pub appointment_date: DateTime<Utc>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalHistory {
    pub id: String,
    pub user_id: String,
    pub medical_issues: Vec<Issue>,
    pub prescriptions: Vec<Prescription>,
    pub appointments: Vec<Appointment>,
    pub created_at: DateTime<Utc>,
}

/// Raw row for document-shaped tables.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub id: String,
    pub document: String,
}
