use std::{collections::HashMap, path::PathBuf};

use scrobblecli::{
    Error,
    config::{Config, DEFAULT_API_URL, DEFAULT_AUTH_URL, DEFAULT_SESSION_FILE},
};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn test_config_uses_defaults() {
    let config = Config::from_lookup(lookup(&[("API_KEY", "key"), ("API_SECRET", "secret")])).unwrap();

    assert_eq!(config.api_key, "key");
    assert_eq!(config.api_secret, "secret");
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
    assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
}

#[test]
fn test_config_overrides() {
    let config = Config::from_lookup(lookup(&[
        ("API_KEY", " key "),
        ("API_SECRET", "secret"),
        ("LASTFM_API_URL", "http://localhost:8080/2.0/"),
        ("LASTFM_AUTH_URL", "http://localhost:8080/auth/"),
        ("LASTFM_SESSION_FILE", "/tmp/session.txt"),
    ]))
    .unwrap();

    assert_eq!(config.api_key, "key");
    assert_eq!(config.api_url, "http://localhost:8080/2.0/");
    assert_eq!(config.auth_url, "http://localhost:8080/auth/");
    assert_eq!(config.session_file, PathBuf::from("/tmp/session.txt"));
}

#[test]
fn test_config_missing_key_fails_fast() {
    let err = Config::from_lookup(lookup(&[("API_SECRET", "secret")])).unwrap_err();

    match err {
        Error::Configuration(message) => assert!(message.contains("API_KEY")),
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_config_empty_secret_fails_fast() {
    let err = Config::from_lookup(lookup(&[("API_KEY", "key"), ("API_SECRET", "  ")])).unwrap_err();

    match err {
        Error::Configuration(message) => assert!(message.contains("API_SECRET")),
        other => panic!("expected configuration error, got {other:?}"),
    }
}
