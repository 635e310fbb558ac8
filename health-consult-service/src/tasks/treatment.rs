use agent_flow::{Context, FlowError, NextAction, Result, Task, TaskResult};
use async_trait::async_trait;
use rig::agent::Agent;
use rig::completion::Prompt;
use rig::providers::openrouter;
use tracing::info;

use super::session_keys;
use crate::agents::{TREATMENT_ADVISOR, build_agent};
use crate::config::Config;
use crate::models::PatientInput;
use crate::prompts::{TREATMENT_TEMPLATE, render_task_prompt};

const MAX_TOOL_TURNS: usize = 3;

/// Second stage: recommend a treatment plan informed by the diagnosis the
/// first stage wrote to the context.
pub struct TreatmentTask {
    agent: Agent<openrouter::CompletionModel>,
}

impl TreatmentTask {
    pub fn new(config: &Config) -> Self {
        Self {
            agent: build_agent(config, &TREATMENT_ADVISOR),
        }
    }
}

#[async_trait]
impl Task for TreatmentTask {
    fn id(&self) -> &str {
        "treatment"
    }

    async fn run(&self, context: Context) -> Result<TaskResult> {
        let patient: PatientInput = context.get_required(session_keys::PATIENT_INPUT).await?;
        let diagnosis: String = context.get_required(session_keys::DIAGNOSIS).await?;

        info!("starting treatment recommendation");

        let instructions = render_task_prompt(
            &TREATMENT_TEMPLATE,
            &[
                ("symptoms", patient.symptoms.as_str()),
                ("medical_history", patient.medical_history.as_str()),
            ],
        )?;

        let prompt = format!("{instructions}\n\nDiagnóstico preliminar:\n{diagnosis}");

        let plan = self
            .agent
            .prompt(&prompt)
            .multi_turn(MAX_TOOL_TURNS)
            .await
            .map_err(|e| FlowError::StageFailed(format!("treatment recommendation failed: {e}")))?;

        context.set(session_keys::TREATMENT_PLAN, plan.clone()).await;

        info!("treatment plan produced");

        Ok(TaskResult::new(Some(plan), NextAction::End))
    }
}
