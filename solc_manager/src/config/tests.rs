//!
//! The solc manager config tests.
//!

use std::path::PathBuf;

use super::Config;
use crate::error::Error;
use crate::installer::platform::Arch;
use crate::installer::platform::Os;
use crate::installer::platform::Platform;
use crate::installer::source::remote::Remote;

#[test]
fn ok_shipped() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("configs")
        .join("solc-manager.json");
    let config = Config::try_from(path.as_path()).expect("Config");
    assert_eq!(config.binaries_url, Config::BINARIES_URL);
    assert_eq!(config.releases_url, Config::RELEASES_URL);
    assert_eq!(config.platform_directory("macos"), Some("macosx-amd64"));
    assert_eq!(config.directory, None);
}

#[test]
fn ok_defaults() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let path = directory.path().join("config.json");
    std::fs::write(path.as_path(), r#"{ "directory": "/opt/solc" }"#).expect("Write");

    let config = Config::try_from(path.as_path()).expect("Config");
    assert_eq!(config.directory, Some(PathBuf::from("/opt/solc")));
    assert_eq!(config.binaries_url, Config::BINARIES_URL);
    assert_eq!(config.platform_directory("linux"), None);
}

#[test]
fn error_missing() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let path = directory.path().join("missing.json");
    assert!(matches!(
        Config::try_from(path.as_path()),
        Err(Error::Config { .. })
    ));
}

#[test]
fn error_malformed() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let path = directory.path().join("config.json");
    std::fs::write(path.as_path(), "{ binaries_url").expect("Write");
    match Config::try_from(path.as_path()) {
        Err(Error::Config { path: error_path, message }) => {
            assert_eq!(error_path, path);
            assert!(message.starts_with("parsing error"));
        }
        result => panic!("Unexpected result: {result:?}"),
    }
}

#[test]
fn ok_remote_platform_directory() {
    let platform = Platform::new(Os::Linux, Arch::X86_64);
    let remote = Remote::new(Config::default(), platform, true).expect("Remote");
    assert_eq!(remote.platform_directory(), "linux-amd64");

    let mut config = Config::default();
    config.platforms = Some(
        [("linux".to_owned(), "linux-arm64".to_owned())]
            .into_iter()
            .collect(),
    );
    let remote = Remote::new(config, platform, true).expect("Remote");
    assert_eq!(remote.platform_directory(), "linux-arm64");
}
