//! chartest configuration types and loading.
//!
//! The config file lists named renders, each a templating command whose
//! output can be queried by name from the CLI:
//!
//! ```yaml
//! renders:
//!   - name: default
//!     command: [helm, template, ., -f, values.yaml]
//!     on_duplicate: ignore
//!     workdir: charts/app
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use chartest_manifest::{DuplicatePolicy, ManifestFixture};
use chartest_runner::CommandConfig;

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "chartest.yaml";

/// Main chartest configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Named templating commands
    pub renders: Vec<RenderConfig>,

    /// Directory relative workdirs are resolved against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// One named templating command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub name: String,
    /// Full argument vector, program first
    pub command: Vec<String>,
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
    #[serde(default)]
    pub workdir: Option<PathBuf>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration: an explicit path must exist, otherwise
    /// `chartest.yaml` in the current directory is used if present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()));
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::load_from_file(&local)
                .with_context(|| format!("Failed to load config from {}", local.display()));
        }

        debug!("No config file found, using empty configuration");
        Ok(Self::default())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        config.validate()?;
        Ok(config)
    }

    /// Check render names are unique and every command is runnable.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for render in &self.renders {
            if !names.insert(render.name.as_str()) {
                bail!("Duplicate render name '{}' in config", render.name);
            }
            self.fixture(render)?;
        }
        Ok(())
    }

    /// Pick a render by name, or the only configured render.
    pub fn render(&self, name: Option<&str>) -> Result<&RenderConfig> {
        match name {
            Some(name) => self
                .renders
                .iter()
                .find(|r| r.name == name)
                .with_context(|| {
                    format!(
                        "Render '{}' not found. Available renders: {}",
                        name,
                        self.render_names()
                    )
                }),
            None => match self.renders.as_slice() {
                [only] => Ok(only),
                [] => bail!(
                    "No input given. Pass --input, a command after '--', or configure renders in {}",
                    DEFAULT_CONFIG_FILE
                ),
                _ => bail!(
                    "Several renders configured; choose one with --render ({})",
                    self.render_names()
                ),
            },
        }
    }

    /// Build the fixture for a configured render.
    pub fn fixture(&self, render: &RenderConfig) -> Result<ManifestFixture> {
        let fixture = ManifestFixture::from_command(&render.name, self.command(render))
            .with_context(|| format!("Invalid render '{}'", render.name))?;
        Ok(fixture.on_duplicate(render.on_duplicate))
    }

    fn command(&self, render: &RenderConfig) -> CommandConfig {
        let mut command = CommandConfig::from_argv(render.command.iter().cloned());
        for (key, value) in &render.env {
            command = command.env(key, value);
        }
        if let Some(workdir) = &render.workdir {
            let workdir = match &self.base_dir {
                Some(base) if workdir.is_relative() => base.join(workdir),
                _ => workdir.clone(),
            };
            command = command.workdir(workdir);
        }
        command
    }

    fn render_names(&self) -> String {
        if self.renders.is_empty() {
            return "(none)".to_string();
        }
        self.renders
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
renders:
  - name: default
    command: [helm, template, ., -f, values.yaml]
    workdir: charts/app
  - name: legacy
    command: [helm, template, ., -f, legacy.yaml]
    on_duplicate: ignore
    env:
      HELM_NAMESPACE: legacy
"#;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_config_file() {
        let (dir, path) = write_config(CONFIG);
        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.renders.len(), 2);
        assert_eq!(config.renders[0].on_duplicate, DuplicatePolicy::Error);
        assert_eq!(config.renders[1].on_duplicate, DuplicatePolicy::Ignore);

        let fixture = config.fixture(config.render(Some("default")).unwrap()).unwrap();
        assert_eq!(
            fixture.command().workdir,
            Some(dir.path().join("charts/app"))
        );

        let legacy = config.fixture(config.render(Some("legacy")).unwrap()).unwrap();
        assert_eq!(legacy.duplicate_policy(), DuplicatePolicy::Ignore);
        assert_eq!(
            legacy.command().env.get("HELM_NAMESPACE").map(String::as_str),
            Some("legacy")
        );
    }

    #[test]
    fn test_render_selection() {
        let (_dir, path) = write_config(CONFIG);
        let config = Config::load(Some(&path)).unwrap();

        let err = config.render(None).unwrap_err();
        assert!(err.to_string().contains("--render (default, legacy)"));

        let err = config.render(Some("missing")).unwrap_err();
        assert!(err.to_string().contains("Available renders: default, legacy"));

        assert!(Config::default().render(None).is_err());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let (_dir, path) = write_config(
            "renders:\n  - name: a\n    command: [helm, template, .]\n  - name: a\n    command: [helm, template, .]\n",
        );
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("Duplicate render name 'a'"));
    }

    #[test]
    fn test_rejects_empty_command() {
        let (_dir, path) = write_config("renders:\n  - name: a\n    command: []\n");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("non-empty sequence"));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.yaml"))).is_err());
    }
}
