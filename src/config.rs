//! Configuration for the QOTD server.
//!
//! Supports command-line arguments and an optional TOML configuration file.
//! CLI arguments take precedence over config file values. The resolved
//! [`Config`] is validated once, before any component is constructed, and is
//! immutable afterwards.

use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Port assigned to the Quote of the Day service by RFC 865.
pub const QOTD_PORT: u16 = 17;

/// Command-line arguments for the QOTD server
#[derive(Parser, Debug)]
#[command(name = "qotd")]
#[command(version = "0.1.0")]
#[command(about = "Run a QOTD server", long_about = None)]
pub struct CliArgs {
    /// Quote source: path to a quote file, or an http(s) URL
    pub source: String,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Serve quotes in RFC 865 strict mode (port 17, 512-byte cap)
    #[arg(long)]
    pub strict: bool,

    /// Do not listen on TCP
    #[arg(long)]
    pub no_tcp: bool,

    /// Do not listen on UDP
    #[arg(long)]
    pub no_udp: bool,

    /// Do not advertise the server over mDNS
    #[arg(long)]
    pub no_mdns: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// TOML configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub advertise: AdvertiseSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Server-related configuration
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Port to serve on
    #[serde(default = "default_port")]
    pub port: u16,
    /// RFC 865 strict mode
    #[serde(default)]
    pub strict: bool,
    /// Listen on TCP
    #[serde(default = "default_true")]
    pub tcp: bool,
    /// Listen on UDP
    #[serde(default = "default_true")]
    pub udp: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            strict: false,
            tcp: true,
            udp: true,
        }
    }
}

/// Service advertisement configuration
#[derive(Debug, Deserialize)]
pub struct AdvertiseSection {
    /// Announce the server over mDNS
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AdvertiseSection {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    3333
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Final resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub source: String,
    pub port: u16,
    pub strict_mode: bool,
    pub tcp_enabled: bool,
    pub udp_enabled: bool,
    pub advertise_enabled: bool,
    pub log_level: String,
}

impl Config {
    /// Load configuration from CLI args and optional TOML file.
    /// CLI arguments take precedence over TOML file values.
    pub fn load() -> Result<Self, ConfigError> {
        let cli = CliArgs::parse();

        let toml_config = if let Some(ref config_path) = cli.config {
            let contents = std::fs::read_to_string(config_path)
                .map_err(|e| ConfigError::FileRead(config_path.clone(), e))?;
            toml::from_str(&contents)
                .map_err(|e| ConfigError::TomlParse(config_path.clone(), e))?
        } else {
            TomlConfig::default()
        };

        Self::resolve(cli, toml_config)
    }

    /// Merge CLI args with TOML config, apply the strict-mode override, and
    /// validate.
    fn resolve(cli: CliArgs, toml_config: TomlConfig) -> Result<Self, ConfigError> {
        let mut config = Config {
            source: cli.source,
            port: cli.port.unwrap_or(toml_config.server.port),
            strict_mode: cli.strict || toml_config.server.strict,
            tcp_enabled: !cli.no_tcp && toml_config.server.tcp,
            udp_enabled: !cli.no_udp && toml_config.server.udp,
            advertise_enabled: !cli.no_mdns && toml_config.advertise.enabled,
            log_level: if cli.log_level != "info" {
                cli.log_level
            } else {
                toml_config.logging.level
            },
        };

        // Strict mode pins the RFC 865 port and forces both transports on,
        // overriding any disable toggles.
        if config.strict_mode {
            config.port = QOTD_PORT;
            config.tcp_enabled = true;
            config.udp_enabled = true;
        }

        if !config.tcp_enabled && !config.udp_enabled {
            return Err(ConfigError::NoTransports);
        }

        Ok(config)
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{0}': {1}")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config file '{0}': {1}")]
    TomlParse(PathBuf, #[source] toml::de::Error),

    #[error("server not started on TCP or UDP, don't disable both transports")]
    NoTransports,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(source: &str) -> CliArgs {
        CliArgs {
            source: source.to_string(),
            config: None,
            port: None,
            strict: false,
            no_tcp: false,
            no_udp: false,
            no_mdns: false,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = TomlConfig::default();
        assert_eq!(config.server.port, 3333);
        assert!(config.server.tcp);
        assert!(config.server.udp);
        assert!(config.advertise.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            [server]
            port = 1717
            strict = true
            udp = false

            [advertise]
            enabled = false

            [logging]
            level = "debug"
        "#;

        let config: TomlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 1717);
        assert!(config.server.strict);
        assert!(config.server.tcp);
        assert!(!config.server.udp);
        assert!(!config.advertise.enabled);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_resolve_defaults() {
        let config = Config::resolve(cli("quotes.txt"), TomlConfig::default()).unwrap();
        assert_eq!(config.source, "quotes.txt");
        assert_eq!(config.port, 3333);
        assert!(!config.strict_mode);
        assert!(config.tcp_enabled);
        assert!(config.udp_enabled);
        assert!(config.advertise_enabled);
    }

    #[test]
    fn test_cli_port_overrides_toml() {
        let mut args = cli("quotes.txt");
        args.port = Some(4444);
        let toml_config: TomlConfig = toml::from_str("[server]\nport = 5555").unwrap();

        let config = Config::resolve(args, toml_config).unwrap();
        assert_eq!(config.port, 4444);
    }

    #[test]
    fn test_strict_mode_pins_port_and_transports() {
        let mut args = cli("quotes.txt");
        args.strict = true;
        args.port = Some(9999);
        args.no_tcp = true;
        args.no_udp = true;

        let config = Config::resolve(args, TomlConfig::default()).unwrap();
        assert_eq!(config.port, QOTD_PORT);
        assert!(config.tcp_enabled);
        assert!(config.udp_enabled);
        assert!(config.strict_mode);
    }

    #[test]
    fn test_disabling_both_transports_is_rejected() {
        let mut args = cli("quotes.txt");
        args.no_tcp = true;
        args.no_udp = true;

        assert!(matches!(
            Config::resolve(args, TomlConfig::default()),
            Err(ConfigError::NoTransports)
        ));
    }

    #[test]
    fn test_no_mdns_toggle() {
        let mut args = cli("quotes.txt");
        args.no_mdns = true;

        let config = Config::resolve(args, TomlConfig::default()).unwrap();
        assert!(!config.advertise_enabled);
    }
}
