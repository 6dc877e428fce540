//! Settings file loading tests.

use std::io::Write;
use strictly_sos::{GameConfig, GameMode};
use strictly_sos_server::{ServerError, ServerSettings};
use tempfile::NamedTempFile;

fn write_settings(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_settings_file() {
    let file = write_settings(
        r#"
host = "127.0.0.1"
port = 3100
room_name = "practice"

[room]
gridSizeX = 8
gridSizeY = 5
gameMode = "horizontal-vertical"
targetWord = "sos"
"#,
    );

    let settings = ServerSettings::from_file(file.path()).unwrap();
    assert_eq!(settings.bind_address(), "127.0.0.1:3100");
    assert_eq!(settings.room_path(), "/practice");

    let game = settings.room().resolve().unwrap();
    assert_eq!(*game.width(), 8);
    assert_eq!(*game.height(), 5);
    assert_eq!(*game.mode(), GameMode::LinesOnly);
    assert_eq!(game.target_word(), "SOS");
}

#[test]
fn test_missing_keys_use_defaults() {
    let file = write_settings("port = 4000\n");
    let settings = ServerSettings::from_file(file.path()).unwrap();
    assert_eq!(settings.host(), "0.0.0.0");
    assert_eq!(settings.room_name(), "sos_room");
    assert_eq!(settings.room().resolve().unwrap(), GameConfig::default());
}

#[test]
fn test_malformed_file_is_reported() {
    let file = write_settings("port = \"not a number\"\n");
    assert!(matches!(
        ServerSettings::from_file(file.path()),
        Err(ServerError::Settings { .. })
    ));
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(matches!(
        ServerSettings::from_file(&missing),
        Err(ServerError::Settings { .. })
    ));
}

#[test]
fn test_room_name_with_slash_is_invalid() {
    let file = write_settings("room_name = \"a/b\"\n");
    let settings = ServerSettings::from_file(file.path()).unwrap();
    assert!(settings.validate().is_err());
}
