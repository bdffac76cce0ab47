//! HTTP API module for the pay statement engine.
//!
//! This module provides the REST endpoints that generate a schedule's period
//! records and the statements built from them.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ScheduleRequest;
pub use response::{ApiError, StatementBatch};
pub use state::AppState;
