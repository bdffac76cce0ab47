//! Rendering seam between the engine and document producers.
//!
//! The engine's obligation ends at well-formed, ordered [`PeriodRecord`]s.
//! This module joins each record with the configured parties into a
//! [`PayStatement`], names it deterministically, and fans statements out to a
//! [`DocumentRenderer`]. Producing a visual document is the renderer's
//! business. Two renderers are bundled: [`JsonStatementRenderer`] writes
//! structured data and [`HtmlStatementRenderer`] writes a printable page.
//!
//! [`PeriodRecord`]: crate::models::PeriodRecord

mod dispatcher;
mod format;
mod html;
mod json;
mod statement;

use std::future::Future;

use serde::Serialize;

use crate::error::EngineResult;

pub use dispatcher::{RenderDispatcher, RenderFailure, RenderReport};
pub use format::{escape_markup, format_currency, format_display_date};
pub use html::HtmlStatementRenderer;
pub use json::JsonStatementRenderer;
pub use statement::{DeductionLine, PayStatement, artifact_name};

/// What a renderer produced for one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedArtifact {
    /// The statement's artifact name.
    pub artifact_name: String,
    /// Where the artifact ended up (a path, URL or similar).
    pub location: String,
    /// Size of the artifact in bytes.
    pub bytes: u64,
}

/// Produces one artifact from one statement.
///
/// Implementations must not depend on other statements: the dispatcher
/// renders statements concurrently and in no particular order. Any text
/// taken from [`PayStatement::parties`] must be passed through
/// [`escape_markup`] before it is embedded in markup.
pub trait DocumentRenderer: Send + Sync {
    /// Renders a single statement.
    fn render(
        &self,
        statement: &PayStatement,
    ) -> impl Future<Output = EngineResult<RenderedArtifact>> + Send;
}
