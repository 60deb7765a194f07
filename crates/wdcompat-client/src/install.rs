//! Building method tables and installing them on command prototypes.

use crate::error::ClientError;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use std::sync::Arc;
use wdcompat_core::config::{self, Config};
use wdcompat_core::logging;
use wdcompat_interfaces::{CommandEngine, LocatorStrategy, default_strategies};
use wdcompat_legacy::{AliasRegistry, CommandPrototype, DeprecationNotifier, LegacyCommand, MethodTable};

static DEFAULT_TABLE: Lazy<MethodTable> = Lazy::new(|| {
    AliasRegistry::new(DeprecationNotifier::global(), Default::default())
        .build(&default_strategies())
});

/// The table `apply_to` installs: default waits, default strategies, and the
/// process-wide notifier.
pub fn default_table() -> &'static MethodTable {
    &DEFAULT_TABLE
}

/// Installs the default legacy vocabulary on `target`. Safe to call repeatedly.
pub fn apply_to<T: CommandPrototype + ?Sized>(target: &mut T) {
    DEFAULT_TABLE.apply_to(target);
}

/// A command over `engine` with the default legacy vocabulary installed.
pub fn command(engine: Arc<dyn CommandEngine>) -> LegacyCommand {
    let mut command = LegacyCommand::new(engine);
    apply_to(&mut command);
    command
}

/// Builds tables from an explicit configuration.
#[derive(Debug, Clone)]
pub struct Installer {
    config: Config,
    notifier: Arc<DeprecationNotifier>,
    strategies: Vec<LocatorStrategy>,
}

impl Installer {
    /// Uses a private notifier configured from `config.deprecation`.
    pub fn new(config: Config) -> Self {
        let notifier = Arc::new(DeprecationNotifier::from_config(&config.deprecation));
        Self {
            config,
            notifier,
            strategies: default_strategies(),
        }
    }

    /// Loads configuration from the default locations and sets up logging.
    ///
    /// # Returns
    /// A result containing the `Installer` or a `ClientError` if the configuration
    /// could not be loaded. A logging setup failure is reported but not fatal.
    pub fn from_env() -> Result<Self, ClientError> {
        let cfg = config::load_config().map_err(ClientError::ConfigError)?;

        if let Err(e) = logging::setup_logging(&cfg) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }
        debug!("Loaded configuration: {:?}", cfg);

        Ok(Self::new(cfg))
    }

    /// Shares `notifier` instead of the private one, e.g. the process-wide one.
    pub fn with_notifier(mut self, notifier: Arc<DeprecationNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_strategies(mut self, strategies: Vec<LocatorStrategy>) -> Self {
        if strategies.is_empty() {
            warn!("Installer configured without locator strategies; no strategy methods will be generated");
        }
        self.strategies = strategies;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn notifier(&self) -> &Arc<DeprecationNotifier> {
        &self.notifier
    }

    pub fn build(&self) -> MethodTable {
        let table = AliasRegistry::new(self.notifier.clone(), self.config.waits.clone())
            .build(&self.strategies);
        info!("Legacy method table ready ({} members)", table.len());
        table
    }

    /// Builds a table and installs it on `target`.
    pub fn install<T: CommandPrototype + ?Sized>(&self, target: &mut T) -> MethodTable {
        let table = self.build();
        table.apply_to(target);
        table
    }
}
