pub mod diagnose;
pub mod treatment;

pub use diagnose::DiagnoseTask;
pub use treatment::TreatmentTask;

/// Context keys shared by the consultation stages.
pub mod session_keys {
    pub const PATIENT_INPUT: &str = "patient_input";
    pub const DIAGNOSIS: &str = "diagnosis";
    pub const TREATMENT_PLAN: &str = "treatment_plan";
}
