//! Symptom checklist encoding for the diagnosis endpoint.
//!
//! The backend's classifier consumes a positional feature vector, so the
//! encoding order is a wire contract: `[fever, cough, breathing_difficulty,
//! fatigue]`, independent of how the checklist is presented or in which order
//! the user toggled it. Any future symptom must be appended, never inserted.

use serde::Serialize;

/// Checklist field ids in encoding order.
pub const SYMPTOM_ORDER: &[&str] = &["fever", "cough", "breathing_difficulty", "fatigue"];

/// Named boolean symptom flags collected from the checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymptomFlags {
    pub fever: bool,
    pub cough: bool,
    pub breathing_difficulty: bool,
    pub fatigue: bool,
}

/// Fixed-order 0/1 feature vector. Serializes as a plain JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymptomVector(pub [u8; 4]);

/// Outbound body for `POST /api/diagnostico`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DiagnosisRequest {
    #[serde(rename = "sintomas")]
    pub symptoms: SymptomVector,
}

impl SymptomFlags {
    /// Encodes the flags in the backend-agreed order.
    pub fn encode(&self) -> SymptomVector {
        SymptomVector([
            u8::from(self.fever),
            u8::from(self.cough),
            u8::from(self.breathing_difficulty),
            u8::from(self.fatigue),
        ])
    }
}
