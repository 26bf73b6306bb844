//! Loader for birdfeed configuration with file + environment overlays.
//!
//! Sources are merged in the order they are attached, later ones winning:
//! the per-user default file, an explicit file, inline snippets, and finally
//! `BIRDFEED__SECTION__KEY` environment variables. String values may
//! reference other variables as `${VAR}`; expansion happens after merging.
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const ENV_PREFIX: &str = "BIRDFEED";
const DEFAULT_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct BirdfeedConfig {
    pub twitter: TwitterConfig,
    #[serde(default)]
    pub defaults: FilterDefaults,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Credentials and endpoint for the upstream API.
#[derive(Debug, Clone, Deserialize)]
pub struct TwitterConfig {
    pub bearer_token: String,
    /// Owner of the lists to resolve. Required for `-l` sources: an app-only
    /// bearer token has no account whose lists could be enumerated.
    #[serde(default)]
    pub screen_name: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Filter settings used when the command line does not override them.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FilterDefaults {
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub allow_retweets: bool,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            allow_retweets: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogEncoding {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogEncoding,
    #[serde(default)]
    pub emit_stderr: bool,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub filter: Option<String>,
}

fn default_base_url() -> String {
    "https://api.twitter.com".into()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

/// `<config_dir>/birdfeed/config.yaml`, e.g. `~/.config/birdfeed/config.yaml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("birdfeed").join(DEFAULT_FILE_NAME))
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring.
pub struct BirdfeedConfigLoader {
    builder: ConfigBuilder<DefaultState>,
}

impl Default for BirdfeedConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl BirdfeedConfigLoader {
    /// Start with no file sources; environment overrides are attached in [`load`](Self::load).
    ///
    /// ```
    /// use birdfeed_config::BirdfeedConfigLoader;
    ///
    /// let config = BirdfeedConfigLoader::new()
    ///     .with_yaml_str("twitter:\n  bearer_token: abc")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.twitter.bearer_token, "abc");
    /// assert_eq!(config.twitter.base_url, "https://api.twitter.com");
    /// assert_eq!(config.defaults.languages, vec!["en".to_string()]);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach the per-user default file if it exists.
    pub fn with_default_file(mut self) -> Self {
        if let Some(path) = default_config_path() {
            self.builder = self
                .builder
                .add_source(File::from(path.as_path()).required(false));
        }
        self
    }

    /// Attach a YAML/TOML/JSON file that must exist; the format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use birdfeed_config::{BirdfeedConfigLoader, LogEncoding};
    ///
    /// let cfg = BirdfeedConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// twitter:
    ///   bearer_token: "example"
    ///   screen_name: "someone"
    /// defaults:
    ///   languages: ["en", "it"]
    ///   allow_retweets: true
    /// logging:
    ///   format: json
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.twitter.screen_name.as_deref(), Some("someone"));
    /// assert!(cfg.defaults.allow_retweets);
    /// assert_eq!(cfg.logging.format, LogEncoding::Json);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge all sources, overlay the environment, expand `${VAR}` placeholders
    /// and deserialize into [`BirdfeedConfig`].
    pub fn load(self) -> Result<BirdfeedConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("defaults.languages"),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
