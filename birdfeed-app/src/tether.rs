//! Ties the command line and the loaded configuration to the pipeline.
use anyhow::{Context, Result};
use birdfeed_common::BirdfeedError;
use birdfeed_common::observability::{LogConfig, LogFormat};
use birdfeed_config::{BirdfeedConfig, BirdfeedConfigLoader, FilterDefaults, LogEncoding, LoggingConfig, TwitterConfig};
use birdfeed_pipeline::{FeedRequest, FilterConfig, SourceQuery};
use birdfeed_social::twitter::{TwitterApi, TwitterUpstream};
use std::sync::Arc;
use std::time::Duration;

use crate::cli::Cli;

/// Fail fast on a missing feed name, before config or network are touched.
pub fn feed_name(cli: &Cli) -> Result<String, BirdfeedError> {
    match cli.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(BirdfeedError::Validation(
            "a feed name is required (-n/--name)".into(),
        )),
    }
}

pub fn load_config(cli: &Cli) -> Result<BirdfeedConfig, BirdfeedError> {
    let loader = match &cli.config {
        Some(path) => BirdfeedConfigLoader::new().with_file(path),
        None => BirdfeedConfigLoader::new().with_default_file(),
    };
    loader
        .load()
        .map_err(|e| BirdfeedError::Config(e.to_string()))
}

/// Command-line languages replace the configured ones; neither means English.
pub fn filter_config(cli: &Cli, defaults: &FilterDefaults) -> FilterConfig {
    let languages = if cli.languages.iter().any(|l| !l.trim().is_empty()) {
        cli.languages.clone()
    } else if defaults.languages.is_empty() {
        vec!["en".to_string()]
    } else {
        defaults.languages.clone()
    };
    FilterConfig::new(cli.retweets || defaults.allow_retweets, languages)
}

/// Lists first, then searches, each in command-line order.
///
/// List sources need `list_owner`: with an app-only token there is no
/// account to enumerate lists for.
pub fn feed_request(
    name: String,
    cli: &Cli,
    defaults: &FilterDefaults,
    list_owner: Option<&str>,
) -> Result<FeedRequest, BirdfeedError> {
    if !cli.lists.is_empty() && list_owner.is_none_or(|o| o.trim().is_empty()) {
        return Err(BirdfeedError::Validation(
            "list sources need twitter.screen_name to be configured".into(),
        ));
    }

    let sources = cli
        .lists
        .iter()
        .map(|l| SourceQuery::list(l.as_str()))
        .chain(cli.searches.iter().map(|s| SourceQuery::search(s.as_str())))
        .collect();

    let request = FeedRequest {
        feed_name: name,
        sources,
        filter: filter_config(cli, defaults),
    };
    request.validate()?;
    Ok(request)
}

pub fn log_config(cli: &Cli, logging: &LoggingConfig) -> LogConfig {
    let json = cli.log_json || logging.format == LogEncoding::Json;
    let default_filter = match (&logging.filter, cli.verbose) {
        (_, true) => "debug".to_string(),
        (Some(filter), false) => filter.clone(),
        (None, false) => "info".to_string(),
    };
    LogConfig {
        log_dir: logging.dir.clone(),
        emit_stderr: cli.verbose || logging.emit_stderr,
        format: if json { LogFormat::Json } else { LogFormat::Text },
        default_filter,
        ..LogConfig::default()
    }
}

pub fn build_upstream(cfg: &TwitterConfig) -> Result<Arc<dyn TwitterUpstream>> {
    if cfg.bearer_token.trim().is_empty() {
        return Err(BirdfeedError::Config("twitter.bearer_token is empty".into()).into());
    }
    let api = TwitterApi::with_base_url(&cfg.base_url, cfg.bearer_token.clone())
        .with_context(|| format!("building twitter client for {}", cfg.base_url))?
        .with_screen_name(cfg.screen_name.clone())
        .with_timeout(Duration::from_secs(cfg.timeout_secs));
    Ok(Arc::new(api))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("birdfeed").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn missing_or_blank_name_is_a_validation_error() {
        let err = feed_name(&cli(&["-s", "q"])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(feed_name(&cli(&["-n", "  "])).unwrap_err().is_validation());
        assert_eq!(feed_name(&cli(&["-n", "rust"])).unwrap(), "rust");
    }

    #[test]
    fn lists_come_before_searches() {
        let args = cli(&["-n", "x", "-s", "first-search", "-l", "A", "-s", "second", "-l", "B"]);
        let request =
            feed_request("x".into(), &args, &FilterDefaults::default(), Some("owner")).unwrap();
        assert_eq!(
            request.sources,
            vec![
                SourceQuery::list("A"),
                SourceQuery::list("B"),
                SourceQuery::search("first-search"),
                SourceQuery::search("second"),
            ]
        );
    }

    #[test]
    fn list_sources_require_an_owner() {
        let args = cli(&["-n", "x", "-l", "Rustaceans"]);
        for owner in [None, Some(""), Some("  ")] {
            let err = feed_request("x".into(), &args, &FilterDefaults::default(), owner)
                .unwrap_err();
            assert_eq!(err.exit_code(), 2);
        }

        let searches_only = cli(&["-n", "x", "-s", "rust"]);
        let request =
            feed_request("x".into(), &searches_only, &FilterDefaults::default(), None).unwrap();
        assert_eq!(request.sources, vec![SourceQuery::search("rust")]);
    }

    #[test]
    fn blank_source_is_rejected() {
        let args = cli(&["-n", "x", "-l", " "]);
        let err = feed_request("x".into(), &args, &FilterDefaults::default(), Some("owner"))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn cli_languages_override_config() {
        let defaults = FilterDefaults {
            languages: vec!["de".into()],
            allow_retweets: false,
        };
        let filter = filter_config(&cli(&["-n", "x", "--lang", "EN,it"]), &defaults);
        assert_eq!(filter, FilterConfig::new(false, ["en", "it"]));

        let filter = filter_config(&cli(&["-n", "x"]), &defaults);
        assert_eq!(filter, FilterConfig::new(false, ["de"]));

        let empty = FilterDefaults {
            languages: vec![],
            allow_retweets: true,
        };
        let filter = filter_config(&cli(&["-n", "x"]), &empty);
        assert_eq!(filter, FilterConfig::new(true, ["en"]));
    }

    #[test]
    fn retweets_flag_or_config_enables_retweets() {
        let defaults = FilterDefaults::default();
        assert!(filter_config(&cli(&["-n", "x", "--retweets"]), &defaults).allow_retweets);
        assert!(!filter_config(&cli(&["-n", "x"]), &defaults).allow_retweets);
    }

    #[test]
    fn default_logging_has_no_file_sink() {
        let log = log_config(&cli(&["-n", "x"]), &LoggingConfig::default());
        assert!(log.log_dir.is_none());
        assert_eq!(log.format, LogFormat::Text);
        assert_eq!(log.default_filter, "info");
    }

    #[test]
    fn verbose_and_json_flags_shape_logging() {
        let logging = LoggingConfig {
            format: LogEncoding::Text,
            emit_stderr: false,
            dir: Some(PathBuf::from("/tmp/birdfeed-logs")),
            filter: Some("warn".into()),
        };

        let quiet = log_config(&cli(&["-n", "x"]), &logging);
        assert!(!quiet.emit_stderr);
        assert_eq!(quiet.format, LogFormat::Text);
        assert_eq!(quiet.default_filter, "warn");
        assert_eq!(quiet.log_dir, Some(PathBuf::from("/tmp/birdfeed-logs")));

        let loud = log_config(&cli(&["-n", "x", "--verbose", "--log-json"]), &logging);
        assert!(loud.emit_stderr);
        assert_eq!(loud.format, LogFormat::Json);
        assert_eq!(loud.default_filter, "debug");
    }

    #[test]
    fn empty_bearer_token_is_a_config_error() {
        let cfg = TwitterConfig {
            bearer_token: " ".into(),
            screen_name: None,
            base_url: "https://api.twitter.com".into(),
            timeout_secs: 15,
        };
        let err = build_upstream(&cfg).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<BirdfeedError>(),
            Some(BirdfeedError::Config(_))
        ));
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let err = load_config(&cli(&["-n", "x", "--config", "/nonexistent/birdfeed.yaml"]))
            .unwrap_err();
        assert!(matches!(err, BirdfeedError::Config(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
