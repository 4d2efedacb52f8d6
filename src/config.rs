use crate::core::promotion::DEFAULT_PROMOTION_THRESHOLD;
use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `general.student_file`
pub const STUDENT_FILE_ENV: &str = "EDUADMIN_STUDENT_FILE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
    #[serde(default)]
    pub grading: GradingConfig,
    #[serde(default)]
    pub school: SchoolConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub student_file: PathBuf,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_true")]
    pub pager: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    pub promotion_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolConfig {
    pub name: String,
    pub academic_year: String,
}

fn default_true() -> bool {
    true
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            promotion_threshold: DEFAULT_PROMOTION_THRESHOLD,
        }
    }
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            name: "Sri Rahula School".to_string(),
            academic_year: chrono::Local::now().format("%Y").to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eduadmin");

        Self {
            general: GeneralConfig {
                student_file: data_dir.join("students.json"),
                color: true,
                pager: true,
            },
            grading: GradingConfig::default(),
            school: SchoolConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        Self::load_custom(&Self::config_file_path())
    }

    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        let mut config = if config_path.exists() {
            let content =
                std::fs::read_to_string(config_path).map_err(|e| AppError::Io(e.to_string()))?;

            toml::from_str::<Config>(&content)
                .map_err(|e| AppError::Parse(format!("Failed to parse config file: {}", e)))?
        } else {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            default_config
        };

        if let Ok(path) = std::env::var(STUDENT_FILE_ENV)
            && !path.trim().is_empty()
        {
            config.general.student_file = PathBuf::from(path);
        }

        config.validate()?;
        tracing::debug!(path = %config_path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.general.student_file.as_os_str().is_empty() {
            return Err(AppError::System("Student file cannot be empty".to_string()));
        }

        let threshold = self.grading.promotion_threshold;
        if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
            return Err(AppError::System(format!(
                "Promotion threshold must be between 0 and 100, got {}",
                threshold
            )));
        }

        if self.school.name.trim().is_empty() {
            return Err(AppError::System("School name cannot be empty".to_string()));
        }

        Ok(())
    }

    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Io(e.to_string()))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::System(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content).map_err(|e| AppError::Io(e.to_string()))?;

        Ok(())
    }

    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eduadmin")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grading.promotion_threshold, 35.0);
        assert!(config.general.student_file.ends_with("students.json"));
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut config = Config::default();
        config.grading.promotion_threshold = 120.0;
        assert!(config.validate().is_err());

        config.grading.promotion_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str(
            r#"
            [general]
            student_file = "/tmp/students.json"
            "#,
        )
        .unwrap();

        assert!(config.general.color);
        assert_eq!(config.grading.promotion_threshold, 35.0);
        assert_eq!(config.school.name, "Sri Rahula School");
    }

    #[test]
    fn test_save_and_load_custom_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.general.student_file = dir.path().join("students.json");
        config.school.name = "Hill House Academy".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_custom(&path).unwrap();
        assert_eq!(loaded.school.name, "Hill House Academy");
    }
}
