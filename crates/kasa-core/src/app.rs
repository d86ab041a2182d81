use anyhow::Result;
use std::sync::Arc;

use crate::config::{Config, ValidationResult};

/// Main application state and lifecycle manager.
///
/// Loads and validates the configuration once; the composition of
/// collaborators (weather provider, notification registry, screens)
/// happens in the binary on top of this.
pub struct App {
    config: Arc<Config>,
    validation: ValidationResult,
}

impl App {
    /// Create a new application instance with a validated configuration
    pub fn new() -> Result<Self> {
        let (config, validation) = Config::load_validated()?;
        tracing::info!(
            "Configuration loaded from {}",
            config.config_dir.display()
        );

        Ok(Self {
            config: Arc::new(config),
            validation,
        })
    }

    /// Build an App around an already-loaded configuration (used by tests)
    pub fn with_config(config: Config) -> Self {
        let validation = config.validate();
        Self {
            config: Arc::new(config),
            validation,
        }
    }

    /// Get a shared handle to the application config
    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// Validation warnings gathered at load time
    pub fn warnings(&self) -> &ValidationResult {
        &self.validation
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }
}
