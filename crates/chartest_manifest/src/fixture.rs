//! Session-scoped manifest fixtures.
//!
//! A [`ManifestFixture`] names one render of a chart. The first call to
//! [`ManifestFixture::get`] runs the templating command and builds the index;
//! every later call, from any thread, gets the same index (or the same error)
//! without running the command again.
//!
//! ```rust,no_run
//! use std::sync::LazyLock;
//! use chartest_manifest::{DuplicatePolicy, ManifestFixture};
//!
//! static DEFAULT_MANIFEST: LazyLock<ManifestFixture> = LazyLock::new(|| {
//!     ManifestFixture::new("default_manifest", ["helm", "template", ".", "-f", "values.yaml"])
//!         .expect("valid fixture")
//!         .on_duplicate(DuplicatePolicy::Ignore)
//! });
//!
//! #[test]
//! fn deployment_has_two_replicas() {
//!     let manifests = DEFAULT_MANIFEST.get().unwrap();
//!     let deployment = manifests.get("apps/v1/deployment/example-api").unwrap();
//!     assert_eq!(deployment.i64_at("spec.replicas"), Some(2));
//! }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use chartest_runner::{CommandConfig, CommandRunner, ProcessRunner};
use tracing::debug;

use crate::error::{ManifestError, ManifestResult};
use crate::index::ManifestIndex;
use crate::loader::load_manifest;
use crate::policy::DuplicatePolicy;

/// Named, lazily built, cached manifest index.
pub struct ManifestFixture {
    name: String,
    command: CommandConfig,
    on_duplicate: DuplicatePolicy,
    runner: Arc<dyn CommandRunner>,
    cached: OnceLock<ManifestResult<Arc<ManifestIndex>>>,
}

impl ManifestFixture {
    /// Create a fixture for a templating command given as an argument vector.
    pub fn new<I, S>(name: impl Into<String>, command: I) -> ManifestResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_command(name, CommandConfig::from_argv(command))
    }

    /// Create a fixture from a full command configuration.
    pub fn from_command(name: impl Into<String>, command: CommandConfig) -> ManifestResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ManifestError::InvalidFixture(
                "Fixture name must be a non-empty string.".to_string(),
            ));
        }
        command
            .validate()
            .map_err(|e| ManifestError::InvalidFixture(e.to_string()))?;

        Ok(Self {
            name,
            command,
            on_duplicate: DuplicatePolicy::default(),
            runner: Arc::new(ProcessRunner::default()),
            cached: OnceLock::new(),
        })
    }

    pub fn on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }

    /// Use a different runner (e.g. a mock in tests).
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.command = self.command.workdir(dir);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &CommandConfig {
        &self.command
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.on_duplicate
    }

    /// Whether the command has already run.
    pub fn is_loaded(&self) -> bool {
        self.cached.get().is_some()
    }

    /// Build the index on first use and return the cached outcome.
    pub fn get(&self) -> ManifestResult<Arc<ManifestIndex>> {
        self.cached
            .get_or_init(|| {
                debug!("Loading manifest fixture '{}'", self.name);
                load_manifest(self.runner.as_ref(), &self.command, self.on_duplicate).map(Arc::new)
            })
            .clone()
    }

    /// A zero-argument producer sharing this fixture's cache.
    pub fn producer(&self) -> impl Fn() -> ManifestResult<Arc<ManifestIndex>> + '_ {
        move || self.get()
    }
}

impl fmt::Debug for ManifestFixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestFixture")
            .field("name", &self.name)
            .field("command", &self.command.command_line().to_string())
            .field("on_duplicate", &self.on_duplicate)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
