//! Analysis configuration loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `U_REPLACEMENT_CONFIG` environment variable (path to TOML file)
//! 2. `replacement.toml` in the current working directory
//! 3. Built-in defaults (the reference pump cost figures)
//!
//! Every section is optional; missing keys take their defaults.
//!
//! ```toml
//! [costs]
//! planned_replacement = 700.0
//! unplanned_repair = 1000.0
//!
//! [search]
//! lower_hours = 100.0
//! upper_hours = 1800.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::cost::CostStructure;
use crate::density::BandwidthMethod;
use crate::optimize::{SearchBounds, SearchSettings, DEFAULT_MAX_EVALUATIONS, DEFAULT_XATOL};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "U_REPLACEMENT_CONFIG";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG: &str = "replacement.toml";

/// Largest number of points any report grid may hold.
pub const MAX_GRID_POINTS: usize = 100_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

/// Root configuration of one replacement analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Cost figures
    #[serde(default)]
    pub costs: CostStructure,

    /// Replacement-interval search domain and tolerance
    #[serde(default)]
    pub search: SearchConfig,

    /// Report grids
    #[serde(default)]
    pub report: ReportConfig,

    /// Input file layout
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub lower_hours: f64,
    pub upper_hours: f64,
    pub xatol: f64,
    pub max_evaluations: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            lower_hours: 100.0,
            upper_hours: 1800.0,
            xatol: DEFAULT_XATOL,
            max_evaluations: DEFAULT_MAX_EVALUATIONS,
        }
    }
}

impl SearchConfig {
    pub fn settings(&self) -> SearchSettings {
        SearchSettings {
            xatol: self.xatol,
            max_evaluations: self.max_evaluations,
        }
    }
}

/// Grids of the tabulated output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Upper end of the fitted-function curve (starts at 0).
    pub curve_horizon_hours: f64,
    /// Points in the fitted-function curve.
    pub curve_points: usize,
    /// Points in the cost-per-hour curve over the search domain.
    pub cost_curve_points: usize,
    /// Spacing of the cost table.
    pub table_step_hours: f64,
    /// Last row of the cost table.
    pub table_horizon_hours: f64,
    /// Points in the empirical density curve (0 disables it).
    pub density_points: usize,
    /// Kernel bandwidth of the empirical density curve.
    pub density_bandwidth: BandwidthMethod,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            curve_horizon_hours: 2000.0,
            curve_points: 300,
            cost_curve_points: 300,
            table_step_hours: 200.0,
            table_horizon_hours: 2000.0,
            density_points: 1000,
            density_bandwidth: BandwidthMethod::Scott,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV column holding hours-to-failure.
    pub column: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            column: "time_to_failure_hours".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Loads configuration using the standard search order.
    ///
    /// Defaults apply only when neither a `U_REPLACEMENT_CONFIG` path nor a
    /// local `replacement.toml` is present. A file that is found but cannot
    /// be read, parsed or validated is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_with(from_env.as_deref(), Path::new(LOCAL_CONFIG))
    }

    /// [`load`](Self::load) with the environment path and the local file
    /// location given explicitly.
    pub fn load_with(from_env: Option<&Path>, local: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = from_env {
            let config = Self::load_from_file(path)?;
            info!(path = %path.display(), "Loaded config from {CONFIG_ENV}");
            return Ok(config);
        }

        if local.exists() {
            let config = Self::load_from_file(local)?;
            info!(path = %local.display(), "Loaded local config");
            return Ok(config);
        }

        info!("No {LOCAL_CONFIG} found, using built-in defaults");
        Ok(Self::default())
    }

    /// Loads and validates a specific TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validated search bounds.
    pub fn bounds(&self) -> Result<SearchBounds, crate::error::OptimizationError> {
        SearchBounds::new(self.search.lower_hours, self.search.upper_hours)
    }

    /// Collects every problem instead of stopping at the first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.costs.validate() {
            errors.push(format!("costs: {e}"));
        }
        if let Err(e) = self.bounds() {
            errors.push(format!("search: {e}"));
        }
        if let Err(e) = self.search.settings().validate() {
            errors.push(format!("search: {e}"));
        }

        let r = &self.report;
        if !(r.curve_horizon_hours.is_finite() && r.curve_horizon_hours > 0.0) {
            errors.push(format!(
                "report.curve_horizon_hours must be positive, got {}",
                r.curve_horizon_hours
            ));
        }
        for (name, points, min) in [
            ("curve_points", r.curve_points, 2),
            ("cost_curve_points", r.cost_curve_points, 2),
            ("density_points", r.density_points, 0),
        ] {
            if points < min || points > MAX_GRID_POINTS {
                errors.push(format!(
                    "report.{name} must be in [{min}, {MAX_GRID_POINTS}], got {points}"
                ));
            }
        }
        if !(r.table_step_hours.is_finite() && r.table_step_hours > 0.0) {
            errors.push(format!(
                "report.table_step_hours must be positive, got {}",
                r.table_step_hours
            ));
        }
        if !(r.table_horizon_hours.is_finite() && r.table_horizon_hours >= r.table_step_hours) {
            errors.push(format!(
                "report.table_horizon_hours must be at least table_step_hours, got {}",
                r.table_horizon_hours
            ));
        } else if r.table_step_hours > 0.0
            && r.table_horizon_hours / r.table_step_hours > MAX_GRID_POINTS as f64
        {
            errors.push(format!(
                "report.table_step_hours {} gives more than {MAX_GRID_POINTS} table rows",
                r.table_step_hours
            ));
        }
        if let BandwidthMethod::Manual(h) = r.density_bandwidth {
            if !(h.is_finite() && h > 0.0) {
                errors.push(format!("report.density_bandwidth.manual must be positive, got {h}"));
            }
        }

        if self.data.column.trim().is_empty() {
            errors.push("data.column must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}
