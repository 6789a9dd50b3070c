use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::controller::Row;
use crate::models::format_timestamp;

/// An appointment as served by `GET /api/citas`. `patient_name` is
/// denormalized by the backend's JOIN for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    #[serde(rename = "paciente_id")]
    pub patient_id: i64,
    #[serde(rename = "paciente_nombre")]
    pub patient_name: String,
    #[serde(rename = "fecha_hora")]
    pub when: NaiveDateTime,
    #[serde(rename = "motivo")]
    pub reason: String,
    #[serde(rename = "creado_en")]
    pub created_at: NaiveDateTime,
}

/// Outbound body for `POST /api/citas`. `fecha_hora` serializes with an
/// explicit seconds component, which the backend requires.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentPayload {
    #[serde(rename = "paciente_id")]
    pub patient_id: i64,
    #[serde(rename = "fecha_hora")]
    pub when: NaiveDateTime,
    #[serde(rename = "motivo")]
    pub reason: String,
}

/// Parses a console date-time entry. The form input omits seconds
/// (`2024-05-01T09:30`), in which case construction zero-fills them; an
/// entry with explicit seconds is also accepted.
pub fn parse_datetime_local(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
}

impl Row for Appointment {
    const HEADERS: &'static [&'static str] = &["ID", "Patient", "Date & Time", "Reason", "Created"];
    const NOUN: &'static str = "appointment";
    const EMPTY_TEXT: &'static str = "No appointments registered";

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.patient_name.clone(),
            format_timestamp(Some(&self.when)),
            self.reason.clone(),
            format_timestamp(Some(&self.created_at)),
        ]
    }
}
