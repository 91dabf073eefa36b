//!
//! The version identifier utilities tests.
//!

use super::parse;
use super::parse_self_reported;
use super::validate;
use super::IntoVersion;
use crate::error::Error;

#[test]
fn ok_prefixed() {
    let version = "v0.8.19".into_version().expect("Valid");
    assert_eq!(version, semver::Version::new(0, 8, 19));
}

#[test]
fn ok_minimum() {
    let version = "0.4.11".into_version().expect("Valid");
    assert_eq!(version, super::MINIMUM_VERSION);
}

#[test]
fn ok_idempotent() {
    for input in ["0.4.11", "v0.5.4", "0.8.20-nightly.2023.4.12", "1.2.3+commit.abcdef12"] {
        let once = input.into_version().expect("Valid");
        let twice = once.clone().into_version().expect("Valid");
        let reparsed = once.to_string().into_version().expect("Valid");
        assert_eq!(once, twice);
        assert_eq!(once, reparsed);
    }
}

#[test]
fn ok_build_metadata_ignored() {
    let version = "0.6.9+commit.3e3065ac".into_version().expect("Valid");
    assert_eq!(version, semver::Version::new(0, 6, 9));
}

#[test]
fn ok_nightly_significant() {
    let nightly = parse("0.8.20-nightly.2023.4.12").expect("Valid");
    let release = parse("0.8.20").expect("Valid");
    assert_ne!(nightly, release);
    assert!(nightly < release);
}

#[test]
fn error_below_minimum() {
    for input in ["0.4.10", "0.3.6", "0.1.0", "0.4.11-nightly.2017.5.1"] {
        let result = input.into_version();
        assert!(
            matches!(result, Err(Error::UnsupportedVersion { .. })),
            "{input} must be unsupported"
        );
    }
}

#[test]
fn error_typed_below_minimum() {
    let result = validate(semver::Version::new(0, 4, 2));
    assert!(matches!(result, Err(Error::UnsupportedVersion { .. })));
}

#[test]
fn error_malformed() {
    for input in ["", "0.8", "latest", "0.8.x"] {
        let result = input.into_version();
        assert!(
            matches!(result, Err(Error::InvalidVersion { .. })),
            "{input} must be invalid"
        );
    }
}

#[test]
fn ok_self_reported_release() {
    let output = "solc, the solidity compiler commandline interface\nVersion: 0.8.19+commit.7dd6d404.Linux.g++\n";
    assert_eq!(
        parse_self_reported(output),
        Some(semver::Version::new(0, 8, 19))
    );
}

#[test]
fn ok_self_reported_nightly() {
    let output = "Version: 0.8.20-nightly.2023.04.02+commit.1234abcd.Darwin.appleclang\n";
    assert_eq!(
        parse_self_reported(output),
        Some(parse("0.8.20-nightly.2023.4.2").expect("Valid"))
    );
}

#[test]
fn error_self_reported_missing() {
    assert_eq!(parse_self_reported("solc: command not found"), None);
}
