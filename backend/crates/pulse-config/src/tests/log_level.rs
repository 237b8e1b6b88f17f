use crate::{Config, LogLevel};
use crate::tests::{EnvGuard, setup_config_dir};

use log::LevelFilter;
use serial_test::serial;

#[test]
fn given_known_names_when_parsed_then_matching_filter() {
    assert_eq!(LogLevel::parse_lenient("debug"), LogLevel(LevelFilter::Debug));
    assert_eq!(LogLevel::parse_lenient("WARN"), LogLevel(LevelFilter::Warn));
    assert_eq!(LogLevel::parse_lenient(" trace "), LogLevel(LevelFilter::Trace));
    assert_eq!(LogLevel::parse_lenient("off"), LogLevel(LevelFilter::Off));
}

#[test]
fn given_unknown_name_when_parsed_then_info() {
    assert_eq!(LogLevel::parse_lenient("verbose"), LogLevel(LevelFilter::Info));
}

#[test]
fn given_toml_level_when_deserialized_then_applied() {
    let config = Config::from_toml_str("[logging]\nlevel = \"error\"").unwrap();

    assert_eq!(*config.logging.level, LevelFilter::Error);
}

#[test]
#[serial]
fn given_env_level_when_load_then_overrides_default() {
    // Given
    let _temp = setup_config_dir();
    let _level = EnvGuard::set("PULSE_LOG_LEVEL", "debug");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(LevelFilter::from(config.logging.level), LevelFilter::Debug);
}
