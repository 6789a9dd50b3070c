use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::controller::Row;
use crate::models::format_timestamp;

/// A patient record as served by `GET /api/pacientes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "historial")]
    pub history: String,
    #[serde(rename = "creado_en")]
    pub created_at: NaiveDateTime,
    /// Null until the record is first edited.
    #[serde(rename = "actualizado_en")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Outbound body for `POST`/`PUT /api/pacientes`.
#[derive(Debug, Clone, Serialize)]
pub struct PatientPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "historial")]
    pub history: String,
}

impl Row for Patient {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "History", "Created", "Updated"];
    const NOUN: &'static str = "patient";
    const EMPTY_TEXT: &'static str = "No patients registered";

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.history.clone(),
            format_timestamp(Some(&self.created_at)),
            format_timestamp(self.updated_at.as_ref()),
        ]
    }
}
