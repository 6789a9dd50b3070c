//! HTTP gateway to the clinic backend — the single choke point for outbound
//! calls. Transport failures and non-success responses are normalized into
//! one error taxonomy here; callers never see `reqwest` types.
//!
//! No implicit retries, no extra timeout beyond the transport default, no
//! cancellation: each call runs to completion or failure before its caller
//! proceeds.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    Appointment, AppointmentPayload, CreatedId, DiagnosisResult, Patient, PatientPayload,
};
use crate::symptoms::{DiagnosisRequest, SymptomVector};

/// Normalized outcome of a backend call.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// No response received at all.
    #[error("could not reach the server: {0}")]
    Network(String),
    /// Response outside the success range. The message is the body's `error`
    /// field when present, else a generic fallback.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// Success status with a body that did not parse as expected.
    #[error("unexpected response from the server: {0}")]
    Decode(String),
}

/// Backend operations consumed by the flows. `ApiGateway` is the real
/// implementation; `MockApi` stands in for tests.
pub trait ClinicApi {
    fn list_patients(&self) -> Result<Vec<Patient>, GatewayError>;
    fn get_patient(&self, id: i64) -> Result<Patient, GatewayError>;
    fn create_patient(&self, payload: &PatientPayload) -> Result<CreatedId, GatewayError>;
    fn update_patient(&self, id: i64, payload: &PatientPayload) -> Result<(), GatewayError>;
    fn delete_patient(&self, id: i64) -> Result<(), GatewayError>;
    fn list_appointments(&self) -> Result<Vec<Appointment>, GatewayError>;
    fn create_appointment(&self, payload: &AppointmentPayload) -> Result<CreatedId, GatewayError>;
    fn delete_appointment(&self, id: i64) -> Result<(), GatewayError>;
    fn predict_diagnosis(&self, symptoms: SymptomVector) -> Result<DiagnosisResult, GatewayError>;
}

/// Message for a non-success response: the backend convention is a JSON body
/// with an `error` string; anything else falls back to a generic message.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| format!("the server reported status {status}"))
}

/// Blocking HTTP client for the clinic REST API.
pub struct ApiGateway {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ApiGateway {
    /// Create a gateway for the backend at `base_url`.
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and applies the error taxonomy to the outcome.
    fn execute(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<reqwest::blocking::Response, GatewayError> {
        let response = request.send().map_err(|e| {
            if e.is_connect() {
                GatewayError::Network(format!("no connection to {}", self.base_url))
            } else {
                GatewayError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GatewayError::Server {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            });
        }
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        tracing::debug!(path, "GET");
        let response = self.execute(self.client.get(self.url(path)))?;
        response.json().map_err(|e| GatewayError::Decode(e.to_string()))
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        tracing::debug!(path, "POST");
        let response = self.execute(self.client.post(self.url(path)).json(body))?;
        response.json().map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// PUT whose success body (`{"mensaje": …}`) the console does not consume.
    fn put_ignoring_body<B: Serialize>(&self, path: &str, body: &B) -> Result<(), GatewayError> {
        tracing::debug!(path, "PUT");
        self.execute(self.client.put(self.url(path)).json(body))?;
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<(), GatewayError> {
        tracing::debug!(path, "DELETE");
        self.execute(self.client.delete(self.url(path)))?;
        Ok(())
    }
}

impl ClinicApi for ApiGateway {
    fn list_patients(&self) -> Result<Vec<Patient>, GatewayError> {
        self.get_json("/api/pacientes")
    }

    fn get_patient(&self, id: i64) -> Result<Patient, GatewayError> {
        self.get_json(&format!("/api/pacientes/{id}"))
    }

    fn create_patient(&self, payload: &PatientPayload) -> Result<CreatedId, GatewayError> {
        self.post_json("/api/pacientes", payload)
    }

    fn update_patient(&self, id: i64, payload: &PatientPayload) -> Result<(), GatewayError> {
        self.put_ignoring_body(&format!("/api/pacientes/{id}"), payload)
    }

    fn delete_patient(&self, id: i64) -> Result<(), GatewayError> {
        self.delete(&format!("/api/pacientes/{id}"))
    }

    fn list_appointments(&self) -> Result<Vec<Appointment>, GatewayError> {
        self.get_json("/api/citas")
    }

    fn create_appointment(&self, payload: &AppointmentPayload) -> Result<CreatedId, GatewayError> {
        self.post_json("/api/citas", payload)
    }

    fn delete_appointment(&self, id: i64) -> Result<(), GatewayError> {
        self.delete(&format!("/api/citas/{id}"))
    }

    fn predict_diagnosis(&self, symptoms: SymptomVector) -> Result<DiagnosisResult, GatewayError> {
        self.post_json("/api/diagnostico", &DiagnosisRequest { symptoms })
    }
}

// ═══════════════════════════════════════════════════════════
// MockApi — scripted backend for tests
// ═══════════════════════════════════════════════════════════

/// Scripted backend: serves configured collections, records every call, and
/// can be told to fail the next call with a given error.
#[derive(Default)]
pub struct MockApi {
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
    diagnosis: Option<DiagnosisResult>,
    failures: RefCell<VecDeque<GatewayError>>,
    calls: RefCell<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patients(mut self, patients: Vec<Patient>) -> Self {
        self.patients = patients;
        self
    }

    pub fn with_appointments(mut self, appointments: Vec<Appointment>) -> Self {
        self.appointments = appointments;
        self
    }

    pub fn with_diagnosis(mut self, diagnosis: DiagnosisResult) -> Self {
        self.diagnosis = Some(diagnosis);
        self
    }

    /// Queues an error for the next backend call, whichever it is.
    pub fn fail_next(&self, error: GatewayError) {
        self.failures.borrow_mut().push_back(error);
    }

    /// Every call made so far, as "METHOD path [payload]" strings.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) -> Result<(), GatewayError> {
        self.calls.borrow_mut().push(call);
        match self.failures.borrow_mut().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl ClinicApi for MockApi {
    fn list_patients(&self) -> Result<Vec<Patient>, GatewayError> {
        self.record("GET /api/pacientes".into())?;
        Ok(self.patients.clone())
    }

    fn get_patient(&self, id: i64) -> Result<Patient, GatewayError> {
        self.record(format!("GET /api/pacientes/{id}"))?;
        self.patients
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(GatewayError::Server {
                status: 404,
                message: "Paciente no encontrado".into(),
            })
    }

    fn create_patient(&self, payload: &PatientPayload) -> Result<CreatedId, GatewayError> {
        self.record(format!(
            "POST /api/pacientes nombre={} historial={}",
            payload.name, payload.history
        ))?;
        Ok(CreatedId {
            id: self.patients.len() as i64 + 1,
        })
    }

    fn update_patient(&self, id: i64, payload: &PatientPayload) -> Result<(), GatewayError> {
        self.record(format!(
            "PUT /api/pacientes/{id} nombre={} historial={}",
            payload.name, payload.history
        ))
    }

    fn delete_patient(&self, id: i64) -> Result<(), GatewayError> {
        self.record(format!("DELETE /api/pacientes/{id}"))
    }

    fn list_appointments(&self) -> Result<Vec<Appointment>, GatewayError> {
        self.record("GET /api/citas".into())?;
        Ok(self.appointments.clone())
    }

    fn create_appointment(&self, payload: &AppointmentPayload) -> Result<CreatedId, GatewayError> {
        self.record(format!(
            "POST /api/citas paciente_id={} fecha_hora={} motivo={}",
            payload.patient_id,
            payload.when.format("%Y-%m-%dT%H:%M:%S"),
            payload.reason
        ))?;
        Ok(CreatedId {
            id: self.appointments.len() as i64 + 1,
        })
    }

    fn delete_appointment(&self, id: i64) -> Result<(), GatewayError> {
        self.record(format!("DELETE /api/citas/{id}"))
    }

    fn predict_diagnosis(&self, symptoms: SymptomVector) -> Result<DiagnosisResult, GatewayError> {
        self.record(format!("POST /api/diagnostico sintomas={:?}", symptoms.0))?;
        Ok(self.diagnosis.clone().unwrap_or(DiagnosisResult {
            diagnosis: "Sano".into(),
            code: 0,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_trims_trailing_slash() {
        let gateway = ApiGateway::new("http://localhost:5000/");
        assert_eq!(gateway.base_url, "http://localhost:5000");
        assert_eq!(gateway.url("/api/pacientes"), "http://localhost:5000/api/pacientes");
    }

    #[test]
    fn server_message_comes_from_error_field() {
        assert_eq!(error_message(409, r#"{"error":"duplicate name"}"#), "duplicate name");
    }

    #[test]
    fn unparseable_body_falls_back_to_generic_message() {
        assert_eq!(error_message(502, "<html>Bad Gateway</html>"), "the server reported status 502");
    }

    #[test]
    fn body_without_error_field_falls_back() {
        assert_eq!(error_message(500, r#"{"detail":"boom"}"#), "the server reported status 500");
    }

    #[test]
    fn mock_records_calls_in_order() {
        let api = MockApi::new();
        api.list_patients().unwrap();
        api.delete_patient(4).unwrap();
        assert_eq!(api.calls(), vec!["GET /api/pacientes", "DELETE /api/pacientes/4"]);
    }

    #[test]
    fn mock_scripted_failure_hits_next_call_only() {
        let api = MockApi::new();
        api.fail_next(GatewayError::Server {
            status: 400,
            message: "duplicate name".into(),
        });
        let err = api.list_patients().unwrap_err();
        assert_eq!(err.to_string(), "duplicate name");
        assert!(api.list_patients().is_ok());
    }

    #[test]
    fn mock_get_patient_misses_with_404() {
        let api = MockApi::new();
        match api.get_patient(9) {
            Err(GatewayError::Server { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected 404, got {other:?}"),
        }
    }
}
