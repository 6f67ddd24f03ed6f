//! Tracing configuration for the command-line binary
//!
//! The library only emits events; the binary installs a subscriber that
//! writes to stderr so stdout carries nothing but the measurement.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Tracing configuration builder
#[derive(Debug)]
pub struct TracingConfig {
    /// Verbosity level (maps to log levels)
    pub verbosity: u8,
    /// Environment filter string (overrides verbosity if set)
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            env_filter: None,
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity level (0-3+)
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set custom environment filter
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Convert verbosity level to tracing filter string
    pub fn verbosity_to_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",  // Default: only warnings and errors
            1 => "info",  // -v: run summary
            2 => "debug", // -vv: decode details, unit spans
            _ => "trace", // -vvv+
        }
    }

    /// Install the global subscriber
    ///
    /// # Errors
    /// - Malformed filter directive
    /// - A global subscriber is already installed
    pub fn init(self) -> anyhow::Result<()> {
        use tracing_subscriber::fmt;

        let filter = if let Some(env_filter) = &self.env_filter {
            EnvFilter::try_new(env_filter)?
        } else {
            EnvFilter::try_new(self.verbosity_to_filter())?
        };

        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_level(true)
            .compact();

        Registry::default().with(filter).with(fmt_layer).try_init()?;
        Ok(())
    }
}

/// Initialize tracing with CLI defaults
///
/// `RUST_LOG`, when set, takes precedence over the `-v` count.
pub fn init_cli_tracing(verbosity: u8) -> anyhow::Result<()> {
    let mut config = TracingConfig::new().with_verbosity(verbosity);

    if let Ok(directives) = std::env::var(EnvFilter::DEFAULT_ENV) {
        if !directives.trim().is_empty() {
            config = config.with_env_filter(directives);
        }
    }

    config.init()
}

/// Span creation helpers
pub mod spans {
    use tracing::{Level, Span};

    /// Span covering one command-line invocation
    pub fn invocation(task: &str, file: &std::path::Path) -> Span {
        tracing::span!(
            Level::INFO,
            "invocation",
            task = %task,
            file = %file.display()
        )
    }
}

/// Event helpers for common logging patterns
pub mod events {
    use tracing::{debug, info};

    /// Log a failed invocation
    pub fn invocation_failed(error: &dyn std::error::Error) {
        debug!(error = %error, "Benchmark invocation failed");
    }

    /// Log a finished measurement
    pub fn measurement(task: &str, elapsed_ms: f64) {
        info!(task = %task, elapsed_ms, "Measurement complete");
    }
}
