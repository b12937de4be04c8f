use crate::error::Result;
use crate::group::Aggressiveness;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// GroupingConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Signed: negative values load fine and are reported by [`Config::validate`].
    #[serde(default)]
    pub aggressiveness: i64,
}

// ---------------------------------------------------------------------------
// TemplatesConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    #[serde(default = "default_templates_dir")]
    pub dir: PathBuf,
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from(paths::DEFAULT_TEMPLATES_DIR)
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: default_templates_dir(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub grouping: GroupingConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            grouping: GroupingConfig::default(),
            templates: TemplatesConfig::default(),
        }
    }
}

impl Config {
    /// Load `.actstream.yaml` from `root`, or the defaults when there is none.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        std::fs::create_dir_all(root)?;
        let mut tmp = NamedTempFile::new_in(root)?;
        tmp.write_all(data.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    pub fn aggressiveness(&self) -> Result<Aggressiveness> {
        Aggressiveness::try_from(self.grouping.aggressiveness)
    }

    /// Template directory, resolved against `root` when relative.
    pub fn templates_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.templates.dir)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let aggressiveness = self.grouping.aggressiveness;
        if aggressiveness < 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "grouping.aggressiveness is {aggressiveness}; it must be zero or greater"
                ),
            });
        } else if aggressiveness > 10 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "grouping.aggressiveness={aggressiveness} (>10 reorders groups heavily)"
                ),
            });
        }

        if self.templates.dir.as_os_str().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "templates.dir is empty".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActstreamError;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.grouping.aggressiveness, 0);
        assert_eq!(cfg.templates.dir, PathBuf::from("templates"));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.grouping.aggressiveness = 2;
        cfg.templates.dir = PathBuf::from("site/templates");
        cfg.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.grouping.aggressiveness, 2);
        assert_eq!(
            loaded.templates_dir(dir.path()),
            dir.path().join("site/templates")
        );
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".actstream.yaml"),
            "grouping:\n  aggressiveness: 1\n",
        )
        .unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.aggressiveness().unwrap(), Aggressiveness::new(1));
        assert_eq!(cfg.templates.dir, PathBuf::from("templates"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".actstream.yaml"),
            "grouping:\n  aggressiveness: many\n",
        )
        .unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(ActstreamError::Yaml(_))
        ));
    }

    #[test]
    fn validate_default_is_clean() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_negative_aggressiveness() {
        let mut cfg = Config::default();
        cfg.grouping.aggressiveness = -1;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);
        assert!(matches!(
            cfg.aggressiveness(),
            Err(ActstreamError::InvalidArgument(_))
        ));
    }

    #[test]
    fn validate_warns_on_large_aggressiveness() {
        let mut cfg = Config::default();
        cfg.grouping.aggressiveness = 25;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
    }

    #[test]
    fn validate_flags_empty_template_dir() {
        let mut cfg = Config::default();
        cfg.templates.dir = PathBuf::new();
        let warnings = cfg.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("templates.dir")));
    }
}
