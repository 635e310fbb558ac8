use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    context::Context,
    error::Result,
    task::{NextAction, Task},
};

/// An ordered sequence of stages executed over a shared [`Context`].
///
/// Stages run strictly in declaration order. Each stage sees everything the
/// stages before it wrote to the context, and any stage error aborts the
/// whole run: there is no retry and no partial result.
pub struct Pipeline {
    pub id: String,
    stages: Vec<Arc<dyn Task>>,
}

impl Pipeline {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            stages: Vec::new(),
        }
    }

    /// Append a stage. Order of calls is order of execution.
    pub fn add_stage(&mut self, stage: Arc<dyn Task>) -> &mut Self {
        self.stages.push(stage);
        self
    }

    /// Run all stages in order, collecting each stage's output.
    ///
    /// The returned [`PipelineResult`] holds one entry per executed stage;
    /// callers pick the aggregate they want via [`PipelineResult::aggregate`].
    pub async fn run(&self, context: Context) -> Result<PipelineResult> {
        let mut outputs = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            info!(pipeline = %self.id, stage = %stage.id(), "executing stage");

            let result = stage.run(context.clone()).await?;

            outputs.push(StageOutput {
                stage_id: stage.id().to_string(),
                output: result.output,
            });

            if matches!(result.next_action, NextAction::End) {
                break;
            }
        }

        Ok(PipelineResult { outputs })
    }
}

/// Builder for creating pipelines.
pub struct PipelineBuilder {
    pipeline: Pipeline,
}

impl PipelineBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            pipeline: Pipeline::new(id),
        }
    }

    pub fn add_stage(mut self, stage: Arc<dyn Task>) -> Self {
        self.pipeline.add_stage(stage);
        self
    }

    pub fn build(self) -> Pipeline {
        self.pipeline
    }
}

/// Output of one executed stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageOutput {
    pub stage_id: String,
    pub output: Option<String>,
}

/// Result of a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub outputs: Vec<StageOutput>,
}

impl PipelineResult {
    /// Reduce the per-stage outputs to a single aggregate according to the
    /// given policy. Returns `None` when no stage produced output.
    pub fn aggregate(&self, policy: &AggregationPolicy) -> Option<String> {
        let produced: Vec<&str> = self
            .outputs
            .iter()
            .filter_map(|s| s.output.as_deref())
            .collect();

        if produced.is_empty() {
            return None;
        }

        match policy {
            AggregationPolicy::FinalOutput => produced.last().map(|s| s.to_string()),
            AggregationPolicy::Concatenate => Some(produced.join("\n\n")),
        }
    }
}

/// How a pipeline's per-stage outputs are reduced to one result.
///
/// Kept as a policy value rather than hard-coded so callers can choose
/// between the last stage's output and a join of everything produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationPolicy {
    /// The last producing stage's output is the result.
    FinalOutput,
    /// All stage outputs joined with blank lines, in execution order.
    Concatenate,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        AggregationPolicy::FinalOutput
    }
}
