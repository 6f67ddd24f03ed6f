//! Benchmark runner
//!
//! Resolves a task name against the registry and executes its unit once on
//! the selected backend. The runner never touches the filesystem before the
//! task name has been resolved.

use crate::{
    backends::CpuBackend,
    config::BenchConfig,
    error::{BenchError, Result},
    ops::ImageOps,
    registry::TaskRegistry,
    timing::TimingSample,
};
use std::path::Path;
use tracing::{debug, instrument, span, Level};

/// Executes one benchmark unit per call
pub struct BenchmarkRunner {
    registry: TaskRegistry,
    ops: Box<dyn ImageOps>,
    config: BenchConfig,
}

impl BenchmarkRunner {
    /// Runner over the full catalog with default parameters
    pub fn new(ops: Box<dyn ImageOps>) -> Self {
        Self {
            registry: TaskRegistry::with_catalog(),
            ops,
            config: BenchConfig::default(),
        }
    }

    /// Replace the operation parameters
    ///
    /// # Errors
    /// - `BenchError::InvalidConfig` when `config` fails [`BenchConfig::validate`]
    pub fn with_config(mut self, config: BenchConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Replace the task registry
    #[must_use]
    pub fn with_registry(mut self, registry: TaskRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Name of the backend the units run on
    pub fn backend_name(&self) -> &'static str {
        self.ops.name()
    }

    /// Run `task` once against the image at `file`
    ///
    /// # Errors
    /// - `BenchError::UnknownTask` when the name is not registered; the file
    ///   is not opened in that case
    /// - `BenchError::ImageLoad` when the input cannot be decoded
    #[instrument(skip(self, file), fields(backend = %self.ops.name(), file = %file.display()))]
    pub fn run(&self, task: &str, file: &Path) -> Result<TimingSample> {
        let unit = self
            .registry
            .lookup(task)
            .ok_or_else(|| BenchError::unknown_task(task))?;

        let sample = {
            let _span = span!(Level::DEBUG, "unit", name = unit.name()).entered();
            unit.run(self.ops.as_ref(), &self.config, file)?
        };

        debug!(task, elapsed_ms = sample.elapsed_ms(), "Benchmark unit finished");
        Ok(sample)
    }

    /// Run from possibly absent command-line arguments
    ///
    /// # Errors
    /// - `BenchError::MissingArgument` naming every absent argument
    /// - anything [`BenchmarkRunner::run`] returns
    pub fn run_invocation(&self, task: Option<&str>, file: Option<&Path>) -> Result<TimingSample> {
        match (task, file) {
            (Some(task), Some(file)) => self.run(task, file),
            (None, None) => Err(BenchError::missing_arguments(&["TASK", "FILE"])),
            (None, Some(_)) => Err(BenchError::missing_arguments(&["TASK"])),
            (Some(_), None) => Err(BenchError::missing_arguments(&["FILE"])),
        }
    }
}

impl Default for BenchmarkRunner {
    fn default() -> Self {
        Self::new(Box::new(CpuBackend::new()))
    }
}
