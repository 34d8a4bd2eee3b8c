//! Environment-driven configuration tests.
//!
//! These mutate process environment variables, so every test goes through
//! `support::with_scoped_env`.

mod support;

use adops_pacing::config::{AppConfig, DEFAULT_CACHE_TTL_SECS};
use adops_pacing::db::{RepositoryFactory, RepositoryType};
use support::with_scoped_env;

const KEYS: [&str; 4] = ["HOST", "PORT", "REPOSITORY_TYPE", "PACING_CACHE_TTL_SECS"];

fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
    KEYS.iter().map(|k| (*k, None)).collect()
}

#[test]
fn test_load_without_env_uses_defaults() {
    let config = with_scoped_env(&cleared(), AppConfig::load).unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.pacing.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS);
    assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
}

#[test]
fn test_load_applies_env_overrides() {
    let mut env = cleared();
    env.extend([
        ("HOST", Some("127.0.0.1")),
        ("PORT", Some("9191")),
        ("REPOSITORY_TYPE", Some("memory")),
        ("PACING_CACHE_TTL_SECS", Some("0")),
    ]);

    let config = with_scoped_env(&env, AppConfig::load).unwrap();
    assert_eq!(config.bind_address(), "127.0.0.1:9191");
    assert_eq!(config.pacing.cache_ttl_secs, 0);
    assert!(RepositoryFactory::from_config(&config).is_ok());
}

#[test]
fn test_load_rejects_bad_ttl() {
    let mut env = cleared();
    env.push(("PACING_CACHE_TTL_SECS", Some("-5")));
    let result = with_scoped_env(&env, AppConfig::load);
    assert!(result.is_err());
}

#[test]
fn test_unknown_repository_type_fails_at_factory() {
    let mut env = cleared();
    env.push(("REPOSITORY_TYPE", Some("postgres")));
    let config = with_scoped_env(&env, AppConfig::load).unwrap();
    assert!(RepositoryFactory::from_config(&config).is_err());
}
