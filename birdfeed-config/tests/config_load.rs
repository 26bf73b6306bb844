use birdfeed_config::{BirdfeedConfigLoader, LogEncoding};
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a config file in a temp dir and return its path.
fn write_file(tmp: &TempDir, name: &str, body: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, body).expect("write config");
    p
}

#[test]
#[serial]
fn loads_yaml_file_with_placeholders() {
    let tmp = TempDir::new().unwrap();
    let file_yaml = r#"
twitter:
  bearer_token: "${TEST_TWITTER_BEARER}"
  screen_name: digicontraptions
  timeout_secs: 30
defaults:
  languages: [en, it]
logging:
  format: json
  emit_stderr: true
  dir: /tmp/birdfeed-logs
  "#;
    let p = write_file(&tmp, "birdfeed.yaml", file_yaml);

    let config = temp_env::with_var("TEST_TWITTER_BEARER", Some("AAAA-token"), || {
        BirdfeedConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load config")
    });

    assert_eq!(config.twitter.bearer_token, "AAAA-token");
    assert_eq!(config.twitter.screen_name.as_deref(), Some("digicontraptions"));
    assert_eq!(config.twitter.timeout_secs, 30);
    assert_eq!(config.defaults.languages, vec!["en", "it"]);
    assert!(!config.defaults.allow_retweets);
    assert_eq!(config.logging.format, LogEncoding::Json);
    assert!(config.logging.emit_stderr);
    assert_eq!(
        config.logging.dir.as_deref(),
        Some(std::path::Path::new("/tmp/birdfeed-logs"))
    );
}

#[test]
#[serial]
fn json_files_are_accepted() {
    let tmp = TempDir::new().unwrap();
    let p = write_file(
        &tmp,
        "twitter-config.json",
        r#"{ "twitter": { "bearer_token": "from-json" } }"#,
    );

    let config = BirdfeedConfigLoader::new().with_file(&p).load().unwrap();
    assert_eq!(config.twitter.bearer_token, "from-json");
    assert_eq!(config.twitter.base_url, "https://api.twitter.com");
}

#[test]
#[serial]
fn environment_overrides_file_values() {
    let tmp = TempDir::new().unwrap();
    let p = write_file(
        &tmp,
        "birdfeed.yaml",
        "twitter:\n  bearer_token: from-file\ndefaults:\n  allow_retweets: false\n",
    );

    let config = temp_env::with_vars(
        [
            ("BIRDFEED__TWITTER__BEARER_TOKEN", Some("from-env")),
            ("BIRDFEED__DEFAULTS__ALLOW_RETWEETS", Some("true")),
            ("BIRDFEED__DEFAULTS__LANGUAGES", Some("en,fr")),
        ],
        || BirdfeedConfigLoader::new().with_file(&p).load().unwrap(),
    );

    assert_eq!(config.twitter.bearer_token, "from-env");
    assert!(config.defaults.allow_retweets);
    assert_eq!(config.defaults.languages, vec!["en", "fr"]);
}

#[test]
#[serial]
fn missing_required_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.yaml");
    assert!(BirdfeedConfigLoader::new().with_file(missing).load().is_err());
}

#[test]
#[serial]
fn missing_credentials_are_reported() {
    let err = BirdfeedConfigLoader::new()
        .with_yaml_str("defaults:\n  allow_retweets: true\n")
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("twitter"), "unexpected error: {err}");
}
