//! Configuration loading and management for the PAYE engine.
//!
//! Tax rules (bracket widths and rates, rent relief parameters and metadata)
//! can be loaded from a YAML file so a new finance act does not need a
//! rebuild. Without a file, the compiled-in Nigeria Tax Act 2025 rules apply.
//!
//! # Example
//!
//! ```no_run
//! use paye_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/nta2025").unwrap();
//! println!("Loaded rules: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, RULES_FILE};
pub use types::{BracketConfig, MetadataConfig, RentReliefConfig, RulesFile};
