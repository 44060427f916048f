use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer, Serialize};

use crate::internal::logger::{LoggerOptions, Severity};

// Version information from build script - using option_env! for safety
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version information
pub fn get_version_info() -> String {
    let build_timestamp = option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown");
    let build_date = option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown");
    let rustc_semver = option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown");
    let cargo_target_triple = option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown");

    format!(
        "micro-logger version {}\n\
         Built: {} ({})\n\
         Rust: {}\n\
         Target: {}",
        VERSION, build_date, build_timestamp, rustc_semver, cargo_target_triple
    )
}

/// Settings of the command-line logger, loaded from files and environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Log file; unset or empty means console only
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub tee: bool,
    #[serde(default, deserialize_with = "deserialize_severities")]
    pub suppress: Vec<Severity>,
    #[serde(default = "default_true")]
    pub color: bool,
    /// Filter for the logger's own tracing diagnostics (stderr)
    #[serde(default = "default_diagnostics_level")]
    pub diagnostics_level: String,
}

fn default_true() -> bool {
    true
}
fn default_diagnostics_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_path: None,
            tee: false,
            suppress: Vec::new(),
            color: default_true(),
            diagnostics_level: default_diagnostics_level(),
        }
    }
}

/// Accepts either a list of tags or one string of comma/space separated tags
fn deserialize_severities<'de, D>(deserializer: D) -> Result<Vec<Severity>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        Joined(String),
        List(Vec<String>),
    }

    let tags = match Tags::deserialize(deserializer)? {
        Tags::Joined(joined) => joined
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
        Tags::List(list) => list,
    };

    tags.iter()
        .map(|tag| tag.parse::<Severity>().map_err(serde::de::Error::custom))
        .collect()
}

impl AppConfig {
    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("tee", false)?
            .set_default("color", true)?
            .set_default("diagnostics_level", "warn")
    }

    /// Load settings. Later sources win: defaults, `./micro-logger.*`,
    /// `/etc/micro-logger/config.*`, the explicit `config_file`, then
    /// `MICRO_LOGGER_*` environment variables.
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?
            .add_source(File::with_name("micro-logger").required(false))
            .add_source(File::with_name("/etc/micro-logger/config").required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix("MICRO_LOGGER").try_parsing(true))
            .build()?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.try_deserialize()
    }

    /// Destination handed to `Logger::configure`; empty means no file
    pub fn destination(&self) -> &str {
        self.output_path.as_deref().unwrap_or("")
    }

    pub fn to_options(&self) -> LoggerOptions {
        LoggerOptions::default()
            .with_tee(self.tee)
            .with_suppress(self.suppress.iter().copied())
            .with_color(self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_yaml(yaml: &str) -> Result<AppConfig, ConfigError> {
        let config = AppConfig::defaults()
            .unwrap()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?;
        AppConfig::from_config(config)
    }

    #[test]
    fn unset_keys_yield_defaults() {
        let cfg = from_yaml("tee: false\n").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.destination(), "");
    }

    #[test]
    fn reads_list_of_suppressed_tags() {
        let cfg = from_yaml(
            "output_path: logs/app.log\ntee: true\nsuppress:\n  - debug\n  - text\n",
        )
        .unwrap();
        assert_eq!(cfg.destination(), "logs/app.log");
        assert_eq!(cfg.suppress, vec![Severity::Debug, Severity::Text]);

        let options = cfg.to_options();
        assert!(options.tee);
        assert!(options.color);
        assert_eq!(options.suppress, vec![Severity::Debug, Severity::Text]);
    }

    #[test]
    fn reads_joined_suppressed_tags() {
        let cfg = from_yaml("suppress: \"debug, warning success\"\ncolor: false\n").unwrap();
        assert_eq!(
            cfg.suppress,
            vec![Severity::Debug, Severity::Warning, Severity::Success]
        );
        assert!(!cfg.color);
    }

    #[test]
    fn rejects_unknown_tags() {
        let err = from_yaml("suppress: [verbose]\n").unwrap_err();
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn version_info_names_the_crate() {
        assert!(get_version_info().starts_with(&format!("micro-logger version {}", VERSION)));
    }
}
