use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsParams, Config, RiskThresholds};

/// Loads the application configuration from the `config.toml` file.
///
/// The file is optional: any missing section (or the whole file) falls back
/// to the built-in product defaults defined in [`settings`].
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`.
        .add_source(config::File::with_name("config.toml").required(false))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct.
    let config = builder.try_deserialize::<Config>()?;

    config
        .analytics
        .validate()
        .map_err(ConfigError::ValidationError)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_carry_the_product_tuned_constants() {
        let config = Config::default();
        assert_eq!(config.analytics.stop_safety_multiplier, dec!(1.4));
        assert_eq!(config.analytics.session_start_hour, 9);
        assert_eq!(config.analytics.session_end_hour, 18);
        assert_eq!(config.risk.drawdown_high_pct, dec!(8));
        assert_eq!(config.risk.loss_streak_medium, 3);
        assert_eq!(config.risk.min_trades_per_strategy, 10);
    }

    #[test]
    fn rejects_inverted_session_window() {
        let params = AnalyticsParams {
            session_start_hour: 18,
            session_end_hour: 9,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
