pub mod agents;
pub mod config;
pub mod consultation;
pub mod document;
pub mod models;
pub mod prompts;
pub mod service;
pub mod tasks;
pub mod tools;
pub mod translate;

pub use config::Config;
pub use consultation::{build_consult_pipeline, run_consultation};
pub use models::*;
pub use service::{AppState, create_app};
