//! Diagnosis prediction flow: a fixed four-symptom checklist encoded into the
//! backend's positional feature vector.

use crate::forms::{FieldKind, FieldSpec, FormValues, Prompt};
use crate::gateway::ClinicApi;
use crate::symptoms::SymptomFlags;

use super::{FlowError, Flows};

fn symptom_checklist() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("fever", "Fever", FieldKind::Checkbox),
        FieldSpec::new("cough", "Cough", FieldKind::Checkbox),
        FieldSpec::new("breathing_difficulty", "Breathing difficulty", FieldKind::Checkbox),
        FieldSpec::new("fatigue", "Fatigue", FieldKind::Checkbox),
    ]
}

fn checked(values: &FormValues, id: &str) -> bool {
    matches!(
        values.get(id).map(|v| v.trim()),
        Some("1" | "y" | "yes" | "true")
    )
}

impl<A: ClinicApi, P: Prompt> Flows<A, P> {
    pub(crate) fn predict_diagnosis(&mut self) -> Result<(), FlowError> {
        let fields = symptom_checklist();
        let Some(values) = self.prompt.form("Predict diagnosis", &fields) else {
            return Ok(());
        };

        // Flags are looked up by field id, so the encoding stays fixed even
        // if the checklist is ever presented in a different order.
        let flags = SymptomFlags {
            fever: checked(&values, "fever"),
            cough: checked(&values, "cough"),
            breathing_difficulty: checked(&values, "breathing_difficulty"),
            fatigue: checked(&values, "fatigue"),
        };

        let result = self.api.predict_diagnosis(flags.encode())?;
        tracing::info!(code = result.code, "diagnosis predicted");
        self.prompt.info(
            "Diagnosis",
            &format!("{} (code {})", result.diagnosis, result.code),
        );
        self.last_diagnosis = Some(result);
        Ok(())
    }
}
