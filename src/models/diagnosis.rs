use serde::{Deserialize, Serialize};

/// Prediction returned by `POST /api/diagnostico`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisResult {
    /// Human-readable label ("Gripe", "COVID-19", …).
    #[serde(rename = "diagnostico")]
    pub diagnosis: String,
    /// Classifier id backing the label.
    #[serde(rename = "codigo")]
    pub code: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_response() {
        let r: DiagnosisResult =
            serde_json::from_str(r#"{"diagnostico": "COVID-19", "codigo": 2}"#).unwrap();
        assert_eq!(r.diagnosis, "COVID-19");
        assert_eq!(r.code, 2);
    }
}
