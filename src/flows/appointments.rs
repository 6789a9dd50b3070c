//! Appointment flows. Adding an appointment fetches the patient list first to
//! build the patient selector, and refuses to open the form when the clinic
//! has no patients yet.

use crate::forms::{trimmed, validate_required, FieldKind, FieldSpec, Prompt, SelectOption};
use crate::gateway::ClinicApi;
use crate::models::appointment::parse_datetime_local;
use crate::models::{AppointmentPayload, Patient};

use super::{FlowError, Flows};

fn appointment_fields(patients: &[Patient]) -> Vec<FieldSpec> {
    let options = patients
        .iter()
        .map(|p| SelectOption {
            value: p.id.to_string(),
            label: format!("{} (ID: {})", p.name, p.id),
        })
        .collect();
    vec![
        FieldSpec::new("patient", "Patient", FieldKind::Select(options)).required(),
        FieldSpec::new("datetime", "Date & Time", FieldKind::DateTime)
            .placeholder("YYYY-MM-DDTHH:MM")
            .required(),
        FieldSpec::new("reason", "Reason", FieldKind::Textarea)
            .placeholder("Reason for the visit")
            .required(),
    ]
}

impl<A: ClinicApi, P: Prompt> Flows<A, P> {
    pub(crate) fn add_appointment(&mut self) -> Result<(), FlowError> {
        let patients = self.api.list_patients()?;
        if patients.is_empty() {
            return Err(FlowError::Validation(
                "No patients registered. Create a patient first.".into(),
            ));
        }

        let fields = appointment_fields(&patients);
        let Some(values) = self.prompt.form("Add appointment", &fields) else {
            return Ok(());
        };
        validate_required(&fields, &values)?;

        let patient_id: i64 = trimmed(&values, "patient")
            .parse()
            .map_err(|_| FlowError::Validation("Select a patient for the appointment".into()))?;
        let when = parse_datetime_local(&trimmed(&values, "datetime")).ok_or_else(|| {
            FlowError::Validation("Enter the date and time as YYYY-MM-DDTHH:MM".into())
        })?;

        let payload = AppointmentPayload {
            patient_id,
            when,
            reason: trimmed(&values, "reason"),
        };
        self.api.create_appointment(&payload)?;
        tracing::info!(patient_id, "appointment created");
        self.prompt.info("Done", "Appointment created");
        self.reload_appointments()
    }

    pub(crate) fn delete_appointment(&mut self) -> Result<(), FlowError> {
        let id = self
            .appointments
            .selected()
            .ok_or(FlowError::SelectionRequired("appointment"))?;
        if !self.prompt.confirm(
            "Delete appointment",
            "This appointment will be removed permanently. Continue?",
        ) {
            return Ok(());
        }

        self.api.delete_appointment(id)?;
        self.appointments.clear_selection();
        tracing::info!(id, "appointment deleted");
        self.prompt.info("Done", "Appointment deleted");
        self.reload_appointments()
    }
}

#[cfg(test)]
mod tests {
    use crate::flows::testutil::{appointment, flows, patient};
    use crate::flows::Action;
    use crate::forms::ScriptedPrompt;
    use crate::gateway::MockApi;

    #[test]
    fn add_aborts_with_guidance_when_no_patients_exist() {
        let prompt = ScriptedPrompt::new().submit(&[]);
        let mut flows = flows(MockApi::new(), prompt);
        flows.dispatch(Action::AddAppointment);

        assert_eq!(flows.api.calls(), vec!["GET /api/pacientes"]);
        assert_eq!(
            flows.prompt.errors,
            vec!["No patients registered. Create a patient first."]
        );
    }

    #[test]
    fn add_normalizes_datetime_without_seconds() {
        let api = MockApi::new().with_patients(vec![patient(3, "Ana")]);
        let prompt = ScriptedPrompt::new().submit(&[
            ("patient", "3"),
            ("datetime", "2024-05-01T09:30"),
            ("reason", "Follow-up"),
        ]);
        let mut flows = flows(api, prompt);

        flows.dispatch(Action::AddAppointment);
        assert_eq!(
            flows.api.calls()[1],
            "POST /api/citas paciente_id=3 fecha_hora=2024-05-01T09:30:00 motivo=Follow-up"
        );
        assert_eq!(flows.api.calls()[2], "GET /api/citas");
        assert!(flows.prompt.errors.is_empty());
    }

    #[test]
    fn add_cancel_leaves_everything_untouched() {
        let api = MockApi::new()
            .with_patients(vec![patient(3, "Ana")])
            .with_appointments(vec![appointment(7, 3)]);
        let prompt = ScriptedPrompt::new().cancel();
        let mut flows = flows(api, prompt);
        flows.dispatch(Action::RefreshAppointments);
        flows.dispatch(Action::SelectAppointment(7));

        flows.dispatch(Action::AddAppointment);
        // Only the selector prefetch ran; no create, no reload.
        assert!(!flows.api.calls().iter().any(|c| c.starts_with("POST")));
        assert_eq!(flows.appointments.selected(), Some(7));
        assert_eq!(flows.appointments.len(), 1);
    }

    #[test]
    fn add_rejects_unparseable_datetime_before_any_create() {
        let api = MockApi::new().with_patients(vec![patient(3, "Ana")]);
        let prompt = ScriptedPrompt::new().submit(&[
            ("patient", "3"),
            ("datetime", "tomorrow at nine"),
            ("reason", "Follow-up"),
        ]);
        let mut flows = flows(api, prompt);

        flows.dispatch(Action::AddAppointment);
        assert!(!flows.api.calls().iter().any(|c| c.starts_with("POST")));
        assert_eq!(
            flows.prompt.errors,
            vec!["Enter the date and time as YYYY-MM-DDTHH:MM"]
        );
    }

    #[test]
    fn delete_without_selection_makes_no_calls() {
        let mut flows = flows(MockApi::new(), ScriptedPrompt::new());
        flows.dispatch(Action::DeleteAppointment);
        assert!(flows.api.calls().is_empty());
        assert_eq!(flows.prompt.errors, vec!["no appointment selected. Pick one from the list first"]);
    }

    #[test]
    fn delete_confirmed_clears_selection_and_reloads() {
        let api = MockApi::new().with_appointments(vec![appointment(7, 3)]);
        let prompt = ScriptedPrompt::new().answer_confirm(true);
        let mut flows = flows(api, prompt);
        flows.dispatch(Action::RefreshAppointments);
        flows.dispatch(Action::SelectAppointment(7));

        flows.dispatch(Action::DeleteAppointment);
        assert_eq!(
            flows.api.calls()[1..],
            ["DELETE /api/citas/7", "GET /api/citas"]
        );
        assert!(flows.appointments.selected().is_none());
    }
}
