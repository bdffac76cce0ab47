//! File-backed JSON renderer.

use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};

use super::{DocumentRenderer, PayStatement, RenderedArtifact};

/// Writes each statement as pretty-printed JSON to
/// `<output_dir>/<artifact_name>.json`.
///
/// The output directory is created on first use.
#[derive(Debug, Clone)]
pub struct JsonStatementRenderer {
    output_dir: PathBuf,
}

impl JsonStatementRenderer {
    /// Creates a renderer writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The directory artifacts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The path the statement with `artifact_name` is written to.
    pub fn path_for(&self, artifact_name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.json", artifact_name))
    }
}

impl DocumentRenderer for JsonStatementRenderer {
    async fn render(&self, statement: &PayStatement) -> EngineResult<RenderedArtifact> {
        let failed = |message: String| EngineError::RenderFailed {
            artifact: statement.artifact_name.clone(),
            message,
        };

        let body = serde_json::to_vec_pretty(statement).map_err(|e| failed(e.to_string()))?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| failed(format!("{}: {}", self.output_dir.display(), e)))?;

        let path = self.path_for(&statement.artifact_name);
        tokio::fs::write(&path, &body)
            .await
            .map_err(|e| failed(format!("{}: {}", path.display(), e)))?;

        Ok(RenderedArtifact {
            artifact_name: statement.artifact_name.clone(),
            location: path.display().to_string(),
            bytes: body.len() as u64,
        })
    }
}
