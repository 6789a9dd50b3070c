//! Per-action orchestration: one named handler for every user-invocable
//! action, composing the prompt, the gateway, and the two list controllers.
//!
//! `dispatch` is the error boundary. All four failure kinds — validation,
//! missing selection, network, server — become a single user-facing
//! notification there; nothing propagates further and the session stays
//! interactive. Declined confirmations and cancelled forms are normal
//! no-ops, not errors.

pub mod appointments;
pub mod diagnosis;
pub mod patients;

use thiserror::Error;

use crate::controller::{ListController, UnknownRow};
use crate::forms::{MissingField, Prompt};
use crate::gateway::{ClinicApi, GatewayError};
use crate::models::{Appointment, DiagnosisResult, Patient};

#[derive(Debug, Error)]
pub enum FlowError {
    /// Client-detected rejection, raised before any network call.
    #[error("{0}")]
    Validation(String),
    /// Action needs a selection that is absent.
    #[error("no {0} selected. Pick one from the list first")]
    SelectionRequired(&'static str),
    #[error(transparent)]
    Api(#[from] GatewayError),
}

impl From<MissingField> for FlowError {
    fn from(e: MissingField) -> Self {
        FlowError::Validation(e.to_string())
    }
}

impl From<UnknownRow> for FlowError {
    fn from(e: UnknownRow) -> Self {
        FlowError::Validation(e.to_string())
    }
}

/// Every user-invocable action, independent of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    RefreshPatients,
    AddPatient,
    EditPatient,
    DeletePatient,
    SelectPatient(i64),
    RefreshAppointments,
    AddAppointment,
    DeleteAppointment,
    SelectAppointment(i64),
    PredictDiagnosis,
}

/// The console's controller layer: owns both list controllers, the prompt,
/// and the gateway. One flow runs to completion (prompting and network
/// included) before the next starts, so no further synchronization is needed
/// around the controllers.
pub struct Flows<A: ClinicApi, P: Prompt> {
    pub(crate) api: A,
    pub(crate) prompt: P,
    pub patients: ListController<Patient>,
    pub appointments: ListController<Appointment>,
    pub last_diagnosis: Option<DiagnosisResult>,
}

impl<A: ClinicApi, P: Prompt> Flows<A, P> {
    pub fn new(api: A, prompt: P) -> Self {
        Self {
            api,
            prompt,
            patients: ListController::new(),
            appointments: ListController::new(),
            last_diagnosis: None,
        }
    }

    /// Initial session load: both lists, failures surfaced like any flow.
    pub fn startup(&mut self) {
        self.dispatch(Action::RefreshPatients);
        self.dispatch(Action::RefreshAppointments);
    }

    /// Runs one action to completion and turns any failure into a single
    /// notification.
    pub fn dispatch(&mut self, action: Action) {
        let result = match action {
            Action::RefreshPatients => self.reload_patients(),
            Action::AddPatient => self.add_patient(),
            Action::EditPatient => self.edit_patient(),
            Action::DeletePatient => self.delete_patient(),
            Action::SelectPatient(id) => self.select_patient(id),
            Action::RefreshAppointments => self.reload_appointments(),
            Action::AddAppointment => self.add_appointment(),
            Action::DeleteAppointment => self.delete_appointment(),
            Action::SelectAppointment(id) => self.select_appointment(id),
            Action::PredictDiagnosis => self.predict_diagnosis(),
        };
        if let Err(e) = result {
            tracing::warn!(?action, error = %e, "flow failed");
            self.prompt.error("Error", &e.to_string());
        }
    }

    pub(crate) fn reload_patients(&mut self) -> Result<(), FlowError> {
        let api = &self.api;
        self.patients.load(|| api.list_patients())?;
        Ok(())
    }

    pub(crate) fn reload_appointments(&mut self) -> Result<(), FlowError> {
        let api = &self.api;
        self.appointments.load(|| api.list_appointments())?;
        Ok(())
    }

    fn select_patient(&mut self, id: i64) -> Result<(), FlowError> {
        self.patients.select(id)?;
        Ok(())
    }

    fn select_appointment(&mut self, id: i64) -> Result<(), FlowError> {
        self.appointments.select(id)?;
        Ok(())
    }
}
