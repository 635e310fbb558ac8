use serde::{Deserialize, Deserializer, Serialize};

/// One patient submission. Immutable for the duration of a run and
/// discarded afterwards; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientInput {
    pub gender: Gender,
    #[serde(deserialize_with = "clamp_age")]
    pub age: u8,
    pub symptoms: String,
    pub medical_history: String,
}

/// Gender options as presented by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Macho")]
    Male,
    #[serde(rename = "Fêmea")]
    Female,
    #[serde(rename = "Outro")]
    Other,
}

// The form widget bounds age to [0, 120]; clamping here keeps direct API
// callers within the same bounds instead of rejecting them.
fn clamp_age<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    Ok(value.clamp(0, 120) as u8)
}

/// Everything one run produces. Held only in the response, never stored.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub raw_text: String,
    pub translated_text: String,
    pub document_bytes: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConsultResponse {
    pub run_id: String,
    pub result: String,
    pub document_base64: String,
    pub filename: String,
}
