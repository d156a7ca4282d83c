//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax rules
//! from a YAML file, or falling back to the compiled-in rules.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::calculation::RentReliefRule;
use crate::error::{EngineError, EngineResult};
use crate::models::{RulesMetadata, TaxRules, TaxSchedule};

use super::types::RulesFile;

/// The file read from a rules directory.
pub const RULES_FILE: &str = "rules.yaml";

/// Loads and provides access to tax rules.
///
/// # Directory Structure
///
/// ```text
/// config/nta2025/
/// └── rules.yaml   # Metadata, bracket widths and rates, rent relief
/// ```
///
/// # Example
///
/// ```no_run
/// use paye_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/nta2025").unwrap();
/// println!("Loaded rules: {}", loader.metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: TaxRules,
    source: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loads rules from `rules.yaml` in the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The brackets do not form a progressive partition (`InvalidSchedule`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let rules_path = path.as_ref().join(RULES_FILE);
        let path_str = rules_path.display().to_string();

        let content = fs::read_to_string(&rules_path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let mut loader = Self::from_yaml_str(&content, &path_str)?;
        loader.source = Some(rules_path);

        info!(
            path = %path_str,
            code = %loader.metadata().code,
            bands = loader.schedule().len(),
            "Loaded tax rules"
        );
        Ok(loader)
    }

    /// Parses rules from YAML text. `origin` is used in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        let file: RulesFile =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            rules: file.into_rules()?,
            source: None,
        })
    }

    /// The compiled-in Nigeria Tax Act 2025 rules.
    pub fn builtin() -> Self {
        Self {
            rules: TaxRules::nta_2025().clone(),
            source: None,
        }
    }

    /// Loads from `path` when given, otherwise returns [`ConfigLoader::builtin`].
    pub fn load_or_builtin<P: AsRef<Path>>(path: Option<P>) -> EngineResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Returns the loaded rules.
    pub fn rules(&self) -> &TaxRules {
        &self.rules
    }

    /// Returns the rules metadata.
    pub fn metadata(&self) -> &RulesMetadata {
        &self.rules.metadata
    }

    /// Returns the bracket schedule.
    pub fn schedule(&self) -> &TaxSchedule {
        &self.rules.schedule
    }

    /// Returns the rent relief rule.
    pub fn rent_relief(&self) -> &RentReliefRule {
        &self.rules.rent_relief
    }

    /// The file the rules were read from; `None` for built-in rules.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::builtin()
    }
}
