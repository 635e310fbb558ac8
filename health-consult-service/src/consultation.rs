use std::sync::Arc;

use agent_flow::{AggregationPolicy, Context, Pipeline, PipelineBuilder};
use anyhow::{Result, anyhow};
use tracing::info;

use crate::config::Config;
use crate::document::generate_docx;
use crate::models::{PatientInput, RunResult};
use crate::tasks::{DiagnoseTask, TreatmentTask, session_keys};
use crate::translate::Translator;

/// Wire the two consultation stages into a fixed-order pipeline:
/// diagnose first, treatment second.
pub fn build_consult_pipeline(config: &Config) -> Pipeline {
    PipelineBuilder::new("health_consult")
        .add_stage(Arc::new(DiagnoseTask::new(config)))
        .add_stage(Arc::new(TreatmentTask::new(config)))
        .build()
}

/// Execute one consultation run end to end: pipeline, translation,
/// document generation. Any failure along the way fails the whole run
/// with no partial output.
pub async fn run_consultation(
    pipeline: &Pipeline,
    translator: &Translator,
    policy: AggregationPolicy,
    patient: PatientInput,
) -> Result<RunResult> {
    let context = Context::new();
    context.set(session_keys::PATIENT_INPUT, patient).await;

    let pipeline_result = pipeline.run(context).await?;

    let raw_text = pipeline_result
        .aggregate(&policy)
        .ok_or_else(|| anyhow!("pipeline produced no output"))?;

    let translated_text = translator.translate(&raw_text).await?;
    let document_bytes = generate_docx(&translated_text)?;

    info!(
        raw_chars = raw_text.len(),
        translated_chars = translated_text.len(),
        document_bytes = document_bytes.len(),
        "consultation run completed"
    );

    Ok(RunResult {
        raw_text,
        translated_text,
        document_bytes,
    })
}
