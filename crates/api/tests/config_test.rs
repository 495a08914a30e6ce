use std::collections::HashMap;

use pretty_assertions::assert_eq;
use rstest::rstest;
use schoolday_api::config::ApiConfig;
use tracing::Level;

fn config_from(pairs: &[(&str, &str)]) -> eyre::Result<ApiConfig> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ApiConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[("DATABASE_URL", "postgres://localhost/schoolday")]).unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.db_max_connections, 5);
    assert_eq!(config.server_addr(), "0.0.0.0:3000");
}

#[test]
fn test_overrides() {
    let config = config_from(&[
        ("DATABASE_URL", "postgres://db/schoolday"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("LOG_LEVEL", "DEBUG"),
        ("API_CORS_ORIGINS", "http://localhost:5173, https://admin.example.org,"),
        ("API_REQUEST_TIMEOUT_SECONDS", "5"),
        ("DB_MAX_CONNECTIONS", "12"),
    ])
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "http://localhost:5173".to_string(),
            "https://admin.example.org".to_string()
        ])
    );
    assert_eq!(config.request_timeout, 5);
    assert_eq!(config.db_max_connections, 12);
}

#[rstest]
#[case::missing(&[])]
#[case::blank(&[("DATABASE_URL", "  ")])]
fn test_database_url_is_required(#[case] pairs: &[(&str, &str)]) {
    assert!(config_from(pairs).is_err());
}

#[test]
fn test_invalid_port_is_an_error() {
    let result = config_from(&[
        ("DATABASE_URL", "postgres://localhost/schoolday"),
        ("API_PORT", "seventy"),
    ]);

    assert!(result.is_err());
}

#[rstest]
#[case("0")]
#[case("lots")]
fn test_bad_pool_size_falls_back_to_default(#[case] value: &str) {
    let config = config_from(&[
        ("DATABASE_URL", "postgres://localhost/schoolday"),
        ("DB_MAX_CONNECTIONS", value),
    ])
    .unwrap();

    assert_eq!(config.db_max_connections, 5);
}
