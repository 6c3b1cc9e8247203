//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::{AppError, Result},
    models::Config,
    types::Exchange,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    ///
    /// Precedence, lowest first: defaults, `.env`, environment, CLI.
    pub fn parse(&self) -> Result<Config> {
        EnvManager::load_env_file()?;
        EnvManager::validate_environment()?;
        self.build_from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an explicit variable lookup instead of the process environment
    pub fn build_from_lookup<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        config.merge_from_lookup(lookup)?;
        self.apply_cli_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        if let Some(pause_ms) = self.cli.pause_ms {
            config.pause_ms = pause_ms;
        }

        if !self.cli.exchanges.is_empty() {
            config.exchanges = self
                .cli
                .exchanges
                .iter()
                .map(|s| s.parse::<Exchange>())
                .collect::<Result<Vec<_>>>()
                .map_err(|e| AppError::config(format!("Invalid --exchange value: {}", e)))?;
        }

        if let Some(ref output) = self.cli.output {
            config.output_file = Some(output.clone());
        }

        if self.cli.no_color {
            config.enable_color = false;
        }

        if self.cli.no_save {
            config.save_results = false;
        }

        // CLI-only
        config.debug = self.cli.debug;

        Ok(())
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Configuration summary for debug output
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    let exchanges: Vec<&str> = config.exchanges.iter().map(|e| e.id()).collect();
    summary.push(format!("Exchanges: {}", exchanges.join(", ")));
    for exchange in &config.exchanges {
        summary.push(format!("  {} -> {}", exchange.display_name(), config.endpoint(*exchange)));
    }
    summary.push(format!("Timeout: {}s", config.timeout_seconds));
    summary.push(format!("Pause: {}ms", config.pause_ms));
    match config.output_file {
        Some(ref path) => summary.push(format!("Output File: {}", path.display())),
        None => summary.push(format!("Output Directory: {}", config.output_dir.display())),
    }
    summary.push(format!("Save Results: {}", config.save_results));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}
