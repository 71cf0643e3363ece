use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, ok};
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let _temp = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.backend.base_url.as_str(), eq("http://localhost:5000"));
    assert_that!(config.backend.health_timeout_ms, eq(2000));
    assert_that!(config.backend.insights_timeout_ms, eq(5000));
    assert_that!(config.retry.max_attempts, eq(3));
    assert_that!(config.retry.delay_ms, eq(500));
}

#[test]
#[serial]
fn given_no_config_file_when_load_and_validate_then_ok() {
    // Given
    let _temp = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
              [backend]
              base_url = "http://10.0.0.2:9000"
              health_timeout_ms = 1500

              [bus]
              inbox_capacity = 64
          "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.backend.base_url.as_str(), eq("http://10.0.0.2:9000"));
    assert_that!(config.backend.health_timeout_ms, eq(1500));
    assert_that!(config.bus.inbox_capacity, eq(64));
    // untouched sections keep defaults
    assert_that!(config.retry.delay_ms, eq(500));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
              [backend]
              base_url = "http://from-toml:5000"
          "#,
    )
    .unwrap();
    let _env = EnvGuard::set("LEXA_BACKEND_URL", "http://from-env:5000");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.backend.base_url.as_str(), eq("http://from-env:5000"));
}

#[test]
#[serial]
fn given_config_dir_env_when_storage_path_then_nested_under_it() {
    // Given
    let (temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let path = config.storage_path().unwrap();

    // Then
    assert!(path.starts_with(temp.path()));
    assert!(path.ends_with("data/storage.json"));
}

// =========================================================================
// Edge Cases
// =========================================================================

#[test]
#[serial]
fn given_malformed_toml_when_load_then_toml_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "backend = not toml").unwrap();

    // When
    let result = Config::load();

    // Then
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("TOML parse error"));
}

#[test]
#[serial]
fn given_unparseable_env_override_when_load_then_value_ignored() {
    // Given
    let _temp = setup_config_dir();
    let _env = EnvGuard::set("LEXA_RETRY_MAX_ATTEMPTS", "many");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.retry.max_attempts, eq(3));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_directory_created() {
    // Given
    let temp = tempfile::TempDir::new().unwrap();
    let nested = temp.path().join("deep").join(".lexa");
    let _guard = EnvGuard::set("LEXA_CONFIG_DIR", nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    assert!(nested.exists());
}
