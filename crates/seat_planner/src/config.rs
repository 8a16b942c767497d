use crate::{
    allocate::{AllocationMode, OverflowPolicy, ZoneFallback, scoring::ScoreWeights},
    constants::{DEFAULT_CLUSTER_THRESHOLD, DEFAULT_ZONE_PADDING},
    error::{Result, SeatPlanError},
    geometry::Sequencer,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level settings, one TOML file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub allocation: AllocationConfig,
    pub clustering: ClusteringConfig,
    pub sequencing: Sequencer,
    pub scoring: ScoreWeights,
    pub departments: DepartmentConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub tables: PathBuf,
    pub seats: PathBuf,
    pub hierarchy: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            tables: PathBuf::from("data/tables.csv"),
            seats: PathBuf::from("data/seats.csv"),
            hierarchy: PathBuf::from("data/hierarchy.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AllocationConfig {
    pub mode: AllocationMode,
    pub overflow: OverflowPolicy,
    pub zone_fallback: ZoneFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Max center-to-center distance between neighbouring tables of a zone
    pub threshold: f64,
    pub padding: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CLUSTER_THRESHOLD,
            padding: DEFAULT_ZONE_PADDING,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DepartmentConfig {
    /// Departments placed first, in this order; the rest follow in roster order
    pub order: Vec<String>,
}

impl Config {
    /// Read and validate a TOML settings file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SeatPlanError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml(&content)?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric ranges and the department order
    pub fn validate(&self) -> Result<()> {
        let threshold = self.clustering.threshold;
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(SeatPlanError::Config(format!(
                "clustering.threshold must be a positive number, got {threshold}"
            )));
        }

        let padding = self.clustering.padding;
        if !(padding.is_finite() && padding >= 0.0) {
            return Err(SeatPlanError::Config(format!(
                "clustering.padding must not be negative, got {padding}"
            )));
        }

        let tolerance = self.sequencing.tolerance;
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(SeatPlanError::Config(format!(
                "sequencing.tolerance must be a positive number, got {tolerance}"
            )));
        }

        if self.scoring.positional == 0 && self.scoring.premium == 0 {
            return Err(SeatPlanError::Config(
                "scoring weights cannot all be zero".to_string(),
            ));
        }

        if let Some(dup) = self
            .departments
            .order
            .iter()
            .enumerate()
            .find(|(i, d)| self.departments.order[..*i].contains(d))
            .map(|(_, d)| d)
        {
            return Err(SeatPlanError::Config(format!(
                "departments.order lists '{dup}' twice"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SequencePolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.clustering.threshold, 350.0);
        assert_eq!(config.sequencing.policy, SequencePolicy::Serpentine);
        assert_eq!(config.allocation.mode, AllocationMode::Zone);
        assert_eq!(config.allocation.zone_fallback, ZoneFallback::FullPool);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_shipped_default_file_matches_defaults() {
        let content = include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../config/default.toml"
        ));
        assert_eq!(Config::from_toml(content).unwrap(), Config::default());
    }

    #[test]
    fn test_parse_full_file() {
        let config = Config::from_toml(
            r#"
            [allocation]
            mode = "manager-proximity"
            overflow = "split"
            zone_fallback = "unseated"

            [clustering]
            threshold = 300.0

            [sequencing]
            policy = "column-major"
            tolerance = 15.0

            [scoring]
            premium = 3

            [departments]
            order = ["Engineering", "Sales"]
            "#,
        )
        .unwrap();
        assert_eq!(config.allocation.mode, AllocationMode::ManagerProximity);
        assert_eq!(config.allocation.overflow, OverflowPolicy::Split);
        assert_eq!(config.allocation.zone_fallback, ZoneFallback::Unseated);
        assert_eq!(config.clustering.threshold, 300.0);
        assert_eq!(config.clustering.padding, 20.0);
        assert_eq!(config.sequencing.policy, SequencePolicy::ColumnMajor);
        assert_eq!(config.scoring.positional, 10);
        assert_eq!(config.scoring.premium, 3);
        assert_eq!(config.departments.order, vec!["Engineering", "Sales"]);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let err = Config::from_toml("[allocation]\nmode = \"random\"\n").unwrap_err();
        assert!(matches!(err, SeatPlanError::Config(_)));
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        assert!(Config::from_toml("[clustering]\nthreshold = 0.0\n").is_err());
        assert!(Config::from_toml("[clustering]\npadding = -1.0\n").is_err());
        assert!(Config::from_toml("[sequencing]\ntolerance = -5.0\n").is_err());
        assert!(Config::from_toml("[scoring]\npositional = 0\npremium = 0\n").is_err());
    }

    #[test]
    fn test_duplicate_department_order() {
        let err = Config::from_toml("[departments]\norder = [\"Ops\", \"Eng\", \"Ops\"]\n")
            .unwrap_err();
        assert!(err.to_string().contains("'Ops' twice"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output]\ndir = \"reports\"").unwrap();
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load_from_file(Path::new("no/such/config.toml")).unwrap_err();
        assert!(matches!(err, SeatPlanError::ReadFile { .. }));
    }
}
