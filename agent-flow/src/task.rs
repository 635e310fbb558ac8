use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{context::Context, error::Result};

/// Result of a single stage execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    /// Text produced by the stage, if any.
    pub output: Option<String>,
    /// What the pipeline should do after this stage.
    pub next_action: NextAction,
}

impl TaskResult {
    pub fn new(output: Option<String>, next_action: NextAction) -> Self {
        Self {
            output,
            next_action,
        }
    }
}

/// Defines what should happen after a stage completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NextAction {
    /// Continue to the next stage in declaration order.
    Continue,
    /// Stop the pipeline here; later stages are not run.
    End,
}

/// Core trait that all pipeline stages implement.
#[async_trait]
pub trait Task: Send + Sync {
    /// Unique identifier for this stage.
    fn id(&self) -> &str;

    /// Execute the stage with the given context.
    async fn run(&self, context: Context) -> Result<TaskResult>;
}
