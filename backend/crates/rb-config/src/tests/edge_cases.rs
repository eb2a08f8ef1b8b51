use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err};
use log::LevelFilter;
use serial_test::serial;

// =========================================================================
// Edge Cases
// =========================================================================

#[test]
#[serial]
fn given_malformed_toml_when_load_then_error_mentions_file() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "this is not valid toml {{{{").unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("config.toml"));
}

#[test]
#[serial]
fn given_unknown_log_level_when_load_then_falls_back_to_info() {
    // Given
    let _temp = setup_config_dir();
    let _level = EnvGuard::set("RB_LOG_LEVEL", "chatty");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(*config.logging.level, eq(LevelFilter::Info));
}

#[test]
#[serial]
fn given_unparseable_env_number_when_load_then_default_kept() {
    // Given
    let _temp = setup_config_dir();
    let _max = EnvGuard::set("RB_STREAM_MAX_CLIENTS", "lots");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.streams.max_clients, eq(5));
}

#[test]
#[serial]
fn given_log_file_with_traversal_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _file = EnvGuard::set("RB_LOG_FILE", "../../etc/passwd");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring(".."));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_created() {
    // Given
    let temp = tempfile::TempDir::new().unwrap();
    let nested = temp.path().join("nested").join("config");
    let _dir = EnvGuard::set("RB_CONFIG_DIR", nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert!(result.is_ok());
    assert!(nested.exists());
}
