//! Patient flows: add, edit (selection-gated), delete (selection-gated,
//! confirm-gated). Every successful mutation reloads the patient list.

use crate::forms::{trimmed, validate_required, FieldKind, FieldSpec, Prompt};
use crate::gateway::ClinicApi;
use crate::models::{Patient, PatientPayload};

use super::{FlowError, Flows};

fn patient_fields(current: Option<&Patient>) -> Vec<FieldSpec> {
    let name = FieldSpec::new("name", "Name", FieldKind::Text)
        .placeholder("Full name")
        .required();
    let history = FieldSpec::new("history", "History", FieldKind::Textarea)
        .placeholder("Medical history")
        .required();
    match current {
        Some(p) => vec![name.initial(p.name.clone()), history.initial(p.history.clone())],
        None => vec![name, history],
    }
}

fn payload_from(values: &crate::forms::FormValues) -> PatientPayload {
    PatientPayload {
        name: trimmed(values, "name"),
        history: trimmed(values, "history"),
    }
}

impl<A: ClinicApi, P: Prompt> Flows<A, P> {
    pub(crate) fn add_patient(&mut self) -> Result<(), FlowError> {
        let fields = patient_fields(None);
        let Some(values) = self.prompt.form("Add patient", &fields) else {
            return Ok(());
        };
        validate_required(&fields, &values)?;

        let payload = payload_from(&values);
        self.api.create_patient(&payload)?;
        tracing::info!(name = %payload.name, "patient created");
        self.prompt.info("Done", "Patient created");
        self.reload_patients()
    }

    pub(crate) fn edit_patient(&mut self) -> Result<(), FlowError> {
        let id = self
            .patients
            .selected()
            .ok_or(FlowError::SelectionRequired("patient"))?;
        let current = self.api.get_patient(id)?;

        let fields = patient_fields(Some(&current));
        let Some(values) = self.prompt.form("Edit patient", &fields) else {
            return Ok(());
        };
        validate_required(&fields, &values)?;

        self.api.update_patient(id, &payload_from(&values))?;
        tracing::info!(id, "patient updated");
        self.prompt.info("Done", "Patient updated");
        self.reload_patients()
    }

    pub(crate) fn delete_patient(&mut self) -> Result<(), FlowError> {
        let id = self
            .patients
            .selected()
            .ok_or(FlowError::SelectionRequired("patient"))?;
        if !self.prompt.confirm(
            "Delete patient",
            "This patient will be removed permanently. Continue?",
        ) {
            return Ok(());
        }

        self.api.delete_patient(id)?;
        self.patients.clear_selection();
        tracing::info!(id, "patient deleted");
        self.prompt.info("Done", "Patient deleted");
        self.reload_patients()
    }
}
