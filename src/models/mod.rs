//! Wire-contract types for the clinic backend.
//!
//! Rust field names are English; the `#[serde(rename)]` attributes map them to
//! the backend's Spanish column names (`nombre`, `historial`, `fecha_hora`, …).

pub mod appointment;
pub mod diagnosis;
pub mod patient;

pub use appointment::{Appointment, AppointmentPayload};
pub use diagnosis::DiagnosisResult;
pub use patient::{Patient, PatientPayload};

use chrono::NaiveDateTime;
use serde::Deserialize;

/// Create endpoints answer `201 {"id": N}` rather than the full record;
/// the console reloads the list afterwards instead of consuming the body.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreatedId {
    pub id: i64,
}

/// Human-readable timestamp for table cells. `None` renders as "N/A"
/// (a patient has no `updated_at` until its first edit).
pub fn format_timestamp(ts: Option<&NaiveDateTime>) -> String {
    match ts {
        Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        None => "N/A".to_string(),
    }
}
