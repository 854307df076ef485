//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use fee_engine::RateConfig;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Validated rate snapshot built from `config`.
    pub rates: RateConfig,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    ///
    /// An invalid rate configuration is fatal here rather than defaulted.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => find_config(&cwd),
        };

        let config = match config_path {
            Some(ref path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        let rates = config.rate_config().with_context(|| match config_path {
            Some(ref path) => format!("Invalid rates in {}", path.display()),
            None => "Invalid default rates".to_string(),
        })?;

        if let Some(ref path) = config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            rates,
            config_path,
            output,
            cwd,
        })
    }

    /// Context for commands that create or repair the config file.
    ///
    /// The file is located but not read, so a missing, unparsable or invalid
    /// config does not stop `config init` or `config set` from replacing it.
    pub fn for_editing(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => find_config(&cwd),
        };

        Ok(Self {
            config: CliConfig::default(),
            rates: RateConfig::default(),
            config_path,
            output,
            cwd,
        })
    }

    /// Path where `config init` writes, or `config set` edits.
    pub fn writable_config_path(&self) -> PathBuf {
        self.config_path
            .clone()
            .unwrap_or_else(|| self.cwd.join(CONFIG_FILE_NAMES[0]))
    }
}

/// Find a config file in the directory tree.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
