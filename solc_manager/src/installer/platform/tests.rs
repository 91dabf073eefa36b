//!
//! The host platform tests.
//!

use std::str::FromStr;

use super::Arch;
use super::Os;
use super::Platform;
use super::Strategy;
use crate::error::Error;

#[test]
fn ok_target_linux_x86_64() {
    let target = Platform::new(Os::Linux, Arch::X86_64)
        .target()
        .expect("Supported");
    assert_eq!(target.strategy, Strategy::Binary);
    assert_eq!(target.directory, "linux-amd64");
}

#[test]
fn ok_target_linux_aarch64() {
    let target = Platform::new(Os::Linux, Arch::Aarch64)
        .target()
        .expect("Supported");
    assert_eq!(target.strategy, Strategy::Build);
}

#[test]
fn ok_target_macos() {
    for arch in [Arch::X86_64, Arch::Aarch64] {
        let target = Platform::new(Os::MacOS, arch).target().expect("Supported");
        assert_eq!(target.strategy, Strategy::Binary);
        assert_eq!(target.directory, "macosx-amd64");
    }
}

#[test]
fn ok_target_windows() {
    let target = Platform::new(Os::Windows, Arch::X86_64)
        .target()
        .expect("Supported");
    assert_eq!(target.strategy, Strategy::Archive);
    assert_eq!(target.directory, "windows-amd64");
}

#[test]
fn error_target_unsupported() {
    let result = Platform::new(Os::Windows, Arch::Aarch64).target();
    match result {
        Err(Error::UnsupportedPlatform { os, arch }) => {
            assert_eq!(os, "windows");
            assert_eq!(arch, "aarch64");
        }
        result => panic!("Unexpected result: {result:?}"),
    }
}

#[test]
fn ok_parse() {
    assert_eq!(Os::from_str("macos"), Ok(Os::MacOS));
    assert_eq!(Arch::from_str("aarch64"), Ok(Arch::Aarch64));
    assert_eq!(Os::from_str("freebsd"), Err("freebsd".to_owned()));
    assert_eq!(
        Platform::new(Os::Linux, Arch::X86_64).to_string(),
        "linux-x86_64"
    );
}
