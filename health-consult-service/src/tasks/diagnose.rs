use agent_flow::{Context, FlowError, NextAction, Result, Task, TaskResult};
use async_trait::async_trait;
use rig::agent::Agent;
use rig::completion::Prompt;
use rig::providers::openrouter;
use tracing::info;

use super::session_keys;
use crate::agents::{DIAGNOSTICIAN, build_agent};
use crate::config::Config;
use crate::models::PatientInput;
use crate::prompts::{DIAGNOSE_TEMPLATE, render_task_prompt};

const MAX_TOOL_TURNS: usize = 3;

/// First stage: produce a preliminary diagnosis from the patient input.
pub struct DiagnoseTask {
    agent: Agent<openrouter::CompletionModel>,
}

impl DiagnoseTask {
    pub fn new(config: &Config) -> Self {
        Self {
            agent: build_agent(config, &DIAGNOSTICIAN),
        }
    }
}

#[async_trait]
impl Task for DiagnoseTask {
    fn id(&self) -> &str {
        "diagnose"
    }

    async fn run(&self, context: Context) -> Result<TaskResult> {
        let patient: PatientInput = context.get_required(session_keys::PATIENT_INPUT).await?;

        info!(
            age = patient.age,
            gender = ?patient.gender,
            "starting preliminary diagnosis"
        );

        let prompt = render_task_prompt(
            &DIAGNOSE_TEMPLATE,
            &[
                ("symptoms", patient.symptoms.as_str()),
                ("medical_history", patient.medical_history.as_str()),
            ],
        )?;

        let diagnosis = self
            .agent
            .prompt(&prompt)
            .multi_turn(MAX_TOOL_TURNS)
            .await
            .map_err(|e| FlowError::StageFailed(format!("diagnosis failed: {e}")))?;

        context.set(session_keys::DIAGNOSIS, diagnosis.clone()).await;

        info!("preliminary diagnosis produced");

        Ok(TaskResult::new(Some(diagnosis), NextAction::Continue))
    }
}
