use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Relay
// =========================================================================

#[test]
fn given_wildcard_publish_topic_when_validate_then_error() {
    let config = Config::from_toml_str("[relay]\npublish_topic = \"motor/#\"").unwrap();

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_wildcard_subscribe_topic_when_validate_then_ok() {
    let config = Config::from_toml_str("[relay]\nsubscribe_topic = \"measures/+\"").unwrap();

    assert_that!(config.validate(), ok(anything()));
}

#[test]
fn given_empty_subscribe_topic_when_validate_then_error() {
    let config = Config::from_toml_str("[relay]\nsubscribe_topic = \"\"").unwrap();

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_zero_port_when_validate_then_error() {
    let config = Config::from_toml_str("[relay]\nport = 0").unwrap();

    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_keep_alive_below_minimum_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _keep_alive = EnvGuard::set("PULSE_RELAY_KEEP_ALIVE_SECS", "2");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_connect_timeout_over_limit_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _timeout = EnvGuard::set("PULSE_RELAY_CONNECT_TIMEOUT_SECS", "500");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
fn given_defaults_when_broker_addr_then_localhost_1883() {
    let config = Config::default();

    assert_that!(config.relay.broker_addr().as_str(), eq("127.0.0.1:1883"));
    assert_that!(config.relay.connect_timeout(), eq(Duration::from_secs(5)));
    assert_that!(config.relay.keep_alive(), eq(Duration::from_secs(60)));
}
