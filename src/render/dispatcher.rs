//! Concurrent rendering of finished statements.
//!
//! Statements are independent once emitted, so each one becomes its own
//! tokio task. A failed statement is reported and the rest still render.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::error::EngineError;

use super::{DocumentRenderer, PayStatement, RenderedArtifact};

/// A statement that could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderFailure {
    /// Artifact name of the failed statement.
    pub artifact_name: String,
    /// Why it failed.
    pub message: String,
}

/// Outcome of rendering a batch of statements.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderReport {
    /// Artifacts produced, ordered by artifact name.
    pub rendered: Vec<RenderedArtifact>,
    /// Statements that failed, ordered by artifact name.
    pub failures: Vec<RenderFailure>,
}

impl RenderReport {
    /// True when every statement rendered.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fans statements out to a renderer, one task per statement.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use paystub_engine::render::{JsonStatementRenderer, RenderDispatcher};
///
/// # async fn run(statements: Vec<paystub_engine::render::PayStatement>) {
/// let renderer = Arc::new(JsonStatementRenderer::new("./paystubs"));
/// let report = RenderDispatcher::new(renderer)
///     .with_concurrency_limit(8)
///     .dispatch(statements)
///     .await;
/// assert!(report.is_complete());
/// # }
/// ```
pub struct RenderDispatcher<R> {
    renderer: Arc<R>,
    limit: Option<usize>,
}

impl<R> RenderDispatcher<R>
where
    R: DocumentRenderer + 'static,
{
    /// Creates a dispatcher with no concurrency limit.
    pub fn new(renderer: Arc<R>) -> Self {
        Self {
            renderer,
            limit: None,
        }
    }

    /// Caps how many statements render at once. Zero is treated as one.
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit.max(1));
        self
    }

    /// Renders every statement and collects the outcome of each.
    ///
    /// Never fails as a whole: renderer errors and renderer panics are
    /// recorded in [`RenderReport::failures`] under the statement's artifact
    /// name.
    pub async fn dispatch(&self, statements: Vec<PayStatement>) -> RenderReport {
        let started = Instant::now();
        let permits = self.limit.map(|limit| Arc::new(Semaphore::new(limit)));
        let mut tasks = JoinSet::new();

        for statement in statements {
            let renderer = Arc::clone(&self.renderer);
            let permits = permits.clone();
            let artifact_name = statement.artifact_name.clone();
            tasks.spawn(async move {
                let _permit = match permits {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                // Render in a child task so a panic is attributed to its statement.
                let result = tokio::spawn(async move { renderer.render(&statement).await })
                    .await
                    .unwrap_or_else(|join_error| {
                        Err(EngineError::RenderFailed {
                            artifact: artifact_name.clone(),
                            message: join_error.to_string(),
                        })
                    });
                (artifact_name, result)
            });
        }

        let mut report = RenderReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(artifact))) => report.rendered.push(artifact),
                Ok((artifact_name, Err(err))) => {
                    warn!(artifact = %artifact_name, error = %err, "Statement failed to render");
                    report.failures.push(RenderFailure {
                        artifact_name,
                        message: err.to_string(),
                    });
                }
                Err(join_error) => {
                    warn!(error = %join_error, "Render task aborted");
                    report.failures.push(RenderFailure {
                        artifact_name: "<unknown>".to_string(),
                        message: join_error.to_string(),
                    });
                }
            }
        }

        report
            .rendered
            .sort_by(|a, b| a.artifact_name.cmp(&b.artifact_name));
        report
            .failures
            .sort_by(|a, b| a.artifact_name.cmp(&b.artifact_name));

        info!(
            rendered = report.rendered.len(),
            failed = report.failures.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Rendering finished"
        );

        report
    }
}
