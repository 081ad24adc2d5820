//! Configuration commands.

use nextrace_pipeline::SeasonSelector;
use nextrace_providers::validate_base_url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Renders the configuration as TOML.
pub fn render(config: &ClientConfig) -> ClientResult<String> {
    toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))
}

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig) -> ClientResult<()> {
    let toml_str = render(config)?;
    println!("# config.toml ({})", ClientConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Checks the configuration without contacting the calendar source.
pub fn check(config: &ClientConfig) -> ClientResult<()> {
    validate_base_url(&config.source.base_url)
        .map_err(|e| ClientError::Config(format!("invalid [source] base_url: {}", e)))?;

    if config.source.timeout == 0 {
        return Err(ClientError::Config(
            "[source] timeout must be at least 1 second".to_string(),
        ));
    }

    config.log.parsed_level().map_err(ClientError::Config)?;

    if let Some(ref season) = config.source.season {
        SeasonSelector::parse(season).map_err(|e| ClientError::Config(format!("[source] {}", e)))?;
    }

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    check(config)?;
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> ClientResult<()> {
    let config_path = ClientConfig::default_path();
    println!("config: {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_sections() {
        let output = render(&ClientConfig::default()).unwrap();
        assert!(output.contains("[source]"));
        assert!(output.contains("base_url = \"https://ergast.com/api/f1\""));
        assert!(output.contains("[display]"));
        assert!(output.contains("format = \"pretty\""));
        assert!(output.contains("[log]"));
        assert!(output.contains("format = \"compact\""));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(check(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn rejects_bad_base_url() {
        let mut config = ClientConfig::default();
        config.source.base_url = "not a url".to_string();
        assert!(check(&config).is_err());
    }

    #[test]
    fn rejects_bad_season() {
        let mut config = ClientConfig::default();
        config.source.season = Some("twenty".to_string());
        assert!(check(&config).is_err());

        config.source.season = Some("2021".to_string());
        assert!(check(&config).is_ok());

        config.source.season = Some("current".to_string());
        assert!(check(&config).is_ok());

        config.source.season = Some(String::new());
        assert!(check(&config).is_ok());
    }

    #[test]
    fn rejects_bad_log_level() {
        let mut config = ClientConfig::default();
        config.log.level = Some("loud".to_string());
        assert!(check(&config).is_err());

        config.log.level = Some("debug".to_string());
        assert!(check(&config).is_ok());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = ClientConfig::default();
        config.source.timeout = 0;
        assert!(check(&config).is_err());
    }
}
