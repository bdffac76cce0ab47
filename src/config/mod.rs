//! Configuration loading and management for the pay statement engine.
//!
//! This module loads the schedule settings and the party metadata from a
//! YAML file. Nothing in the engine is hard-coded: salary, dates and names
//! all come from here.
//!
//! # Example
//!
//! ```no_run
//! use paystub_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Employer: {}", config.parties().employer.name);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{PaystubConfig, ScheduleConfig};
