pub mod context;
pub mod error;
pub mod pipeline;
pub mod task;

// Re-export commonly used types
pub use context::Context;
pub use error::{FlowError, Result};
pub use pipeline::{AggregationPolicy, Pipeline, PipelineBuilder, PipelineResult, StageOutput};
pub use task::{NextAction, Task, TaskResult};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct AppendTask {
        id: String,
        text: String,
    }

    #[async_trait]
    impl Task for AppendTask {
        fn id(&self) -> &str {
            &self.id
        }

        async fn run(&self, context: Context) -> Result<TaskResult> {
            let mut trail: Vec<String> = context.get("trail").await.unwrap_or_default();
            trail.push(self.id.clone());
            context.set("trail", trail).await;

            Ok(TaskResult::new(
                Some(self.text.clone()),
                NextAction::Continue,
            ))
        }
    }

    struct FailingTask;

    #[async_trait]
    impl Task for FailingTask {
        fn id(&self) -> &str {
            "failing"
        }

        async fn run(&self, _context: Context) -> Result<TaskResult> {
            Err(FlowError::StageFailed("boom".to_string()))
        }
    }

    fn two_stage_pipeline() -> Pipeline {
        PipelineBuilder::new("test_pipeline")
            .add_stage(Arc::new(AppendTask {
                id: "first".to_string(),
                text: "first output".to_string(),
            }))
            .add_stage(Arc::new(AppendTask {
                id: "second".to_string(),
                text: "second output".to_string(),
            }))
            .build()
    }

    #[tokio::test]
    async fn stages_run_in_declaration_order() {
        let pipeline = two_stage_pipeline();
        let context = Context::new();

        let result = pipeline.run(context.clone()).await.unwrap();

        assert_eq!(result.outputs.len(), 2);
        assert_eq!(result.outputs[0].stage_id, "first");
        assert_eq!(result.outputs[1].stage_id, "second");

        let trail: Vec<String> = context.get("trail").await.unwrap();
        assert_eq!(trail, vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn later_stages_see_earlier_writes() {
        struct ReaderTask;

        #[async_trait]
        impl Task for ReaderTask {
            fn id(&self) -> &str {
                "reader"
            }

            async fn run(&self, context: Context) -> Result<TaskResult> {
                let trail: Vec<String> = context.get_required("trail").await?;
                Ok(TaskResult::new(Some(trail.join(",")), NextAction::End))
            }
        }

        let pipeline = PipelineBuilder::new("chained")
            .add_stage(Arc::new(AppendTask {
                id: "writer".to_string(),
                text: "ignored".to_string(),
            }))
            .add_stage(Arc::new(ReaderTask))
            .build();

        let result = pipeline.run(Context::new()).await.unwrap();
        assert_eq!(result.outputs[1].output.as_deref(), Some("writer"));
    }

    #[tokio::test]
    async fn stage_failure_aborts_the_run() {
        let pipeline = PipelineBuilder::new("failing_pipeline")
            .add_stage(Arc::new(FailingTask))
            .add_stage(Arc::new(AppendTask {
                id: "never".to_string(),
                text: "never".to_string(),
            }))
            .build();

        let context = Context::new();
        let result = pipeline.run(context.clone()).await;

        assert!(matches!(result, Err(FlowError::StageFailed(_))));
        // The second stage must not have run.
        let trail: Option<Vec<String>> = context.get("trail").await;
        assert!(trail.is_none());
    }

    #[tokio::test]
    async fn end_action_stops_the_pipeline() {
        struct EndTask;

        #[async_trait]
        impl Task for EndTask {
            fn id(&self) -> &str {
                "ender"
            }

            async fn run(&self, _context: Context) -> Result<TaskResult> {
                Ok(TaskResult::new(Some("done".to_string()), NextAction::End))
            }
        }

        let pipeline = PipelineBuilder::new("short_circuit")
            .add_stage(Arc::new(EndTask))
            .add_stage(Arc::new(AppendTask {
                id: "skipped".to_string(),
                text: "skipped".to_string(),
            }))
            .build();

        let result = pipeline.run(Context::new()).await.unwrap();
        assert_eq!(result.outputs.len(), 1);
        assert_eq!(result.outputs[0].stage_id, "ender");
    }

    #[tokio::test]
    async fn aggregation_policies() {
        let pipeline = two_stage_pipeline();
        let result = pipeline.run(Context::new()).await.unwrap();

        assert_eq!(
            result.aggregate(&AggregationPolicy::FinalOutput).as_deref(),
            Some("second output")
        );
        assert_eq!(
            result.aggregate(&AggregationPolicy::Concatenate).as_deref(),
            Some("first output\n\nsecond output")
        );
    }

    #[tokio::test]
    async fn aggregate_is_none_without_outputs() {
        struct SilentTask;

        #[async_trait]
        impl Task for SilentTask {
            fn id(&self) -> &str {
                "silent"
            }

            async fn run(&self, _context: Context) -> Result<TaskResult> {
                Ok(TaskResult::new(None, NextAction::Continue))
            }
        }

        let pipeline = PipelineBuilder::new("silent")
            .add_stage(Arc::new(SilentTask))
            .build();

        let result = pipeline.run(Context::new()).await.unwrap();
        assert!(result.aggregate(&AggregationPolicy::FinalOutput).is_none());
    }

    #[tokio::test]
    async fn get_required_reports_missing_keys() {
        let context = Context::new();
        let err = context.get_required::<String>("absent").await.unwrap_err();
        assert!(matches!(err, FlowError::ContextError(_)));
        assert!(err.to_string().contains("absent"));
    }
}
