//!
//! The installer tests.
//!

#![cfg(unix)]

use std::path::PathBuf;
use std::time::Duration;

use super::import;
use super::source::Source;
use super::staging::Verify;
use super::Installer;
use crate::active::ActiveVersion;
use crate::error::Error;
use crate::registry::Registry;
use crate::testing;
use crate::testing::FakeSource;
use crate::warning::Warning;

/// The environment variable with the install directory shared with the child processes.
const CHILD_DIRECTORY_VARIABLE: &str = "SOLC_MANAGER_TEST_CHILD_DIRECTORY";

/// The environment variable with the acquisition log shared with the child processes.
const CHILD_LOG_VARIABLE: &str = "SOLC_MANAGER_TEST_CHILD_LOG";

/// The version installed by the child processes.
const CHILD_VERSION: &str = "0.8.7";

fn version(version: &str) -> semver::Version {
    semver::Version::parse(version).expect("Valid")
}

#[test]
fn ok_install() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());
    let source = FakeSource::new(&[]);
    let active = ActiveVersion::default();

    let installed = Installer::new(&registry, &source, &active, true)
        .install("0.8.19")
        .expect("Installed");

    assert_eq!(installed.version, version("0.8.19"));
    assert_eq!(installed.path, directory.path().join("solc-v0.8.19"));
    assert!(installed.is_fresh);
    assert!(installed.warnings.is_empty());
    assert!(registry.is_installed(&version("0.8.19")));
    assert_eq!(active.get(), Some(version("0.8.19")));
}

#[test]
fn ok_install_already_installed() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());
    let source = FakeSource::new(&[]);
    let active = ActiveVersion::default();
    let installer = Installer::new(&registry, &source, &active, true);

    installer.install("0.8.18").expect("Installed");
    let installed = installer.install("v0.8.18").expect("Installed");

    assert!(!installed.is_fresh);
    assert_eq!(source.acquisitions(), 1);
}

#[test]
fn ok_install_keeps_active_version() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());
    let source = FakeSource::new(&[]);
    let active = ActiveVersion::default();
    active.set(version("0.8.1"));

    Installer::new(&registry, &source, &active, true)
        .install("0.8.17")
        .expect("Installed");

    assert_eq!(active.get(), Some(version("0.8.1")));
}

#[test]
fn ok_install_concurrent_threads() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());
    let source = FakeSource {
        delay: Duration::from_millis(100),
        ..Default::default()
    };
    let active = ActiveVersion::default();

    let (registry, source, active) = (&registry, &source, &active);
    std::thread::scope(|scope| {
        let threads: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    Installer::new(registry, source, active, true)
                        .install("0.8.16")
                        .expect("Installed")
                })
            })
            .collect();
        let fresh = threads
            .into_iter()
            .map(|thread| thread.join().expect("Thread"))
            .filter(|installed| installed.is_fresh)
            .count();
        assert_eq!(fresh, 1);
    });

    assert_eq!(source.acquisitions(), 1);
    assert!(registry.is_installed(&version("0.8.16")));
}

#[test]
fn ok_install_concurrent_processes() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let log = directory.path().join("acquisitions.log");
    let executable = std::env::current_exe().expect("Test executable");

    let children: Vec<std::process::Child> = (0..4)
        .map(|_| {
            std::process::Command::new(executable.as_path())
                .args(["installer::tests::cross_process_child", "--exact"])
                .env(CHILD_DIRECTORY_VARIABLE, directory.path())
                .env(CHILD_LOG_VARIABLE, log.as_path())
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null())
                .spawn()
                .expect("Child process")
        })
        .collect();
    for mut child in children.into_iter() {
        assert!(child.wait().expect("Child process").success());
    }

    let acquisitions = std::fs::read_to_string(log.as_path()).expect("Log");
    assert_eq!(acquisitions.lines().count(), 1);
    assert!(testing::registry(directory.path()).is_installed(&version(CHILD_VERSION)));
}

///
/// The installer run by the child processes of `ok_install_concurrent_processes`.
///
#[test]
fn cross_process_child() {
    let (directory, log) = match (
        std::env::var_os(CHILD_DIRECTORY_VARIABLE),
        std::env::var_os(CHILD_LOG_VARIABLE),
    ) {
        (Some(directory), Some(log)) => (PathBuf::from(directory), PathBuf::from(log)),
        _ => return,
    };

    let registry = testing::registry(directory.as_path());
    let source = FakeSource {
        log: Some(log),
        delay: Duration::from_millis(200),
        ..Default::default()
    };
    let active = ActiveVersion::default();
    Installer::new(&registry, &source, &active, true)
        .install(CHILD_VERSION)
        .expect("Installed");
    assert!(registry.is_installed(&version(CHILD_VERSION)));
}

#[test]
fn ok_install_nightly_warning() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());
    let source = FakeSource {
        reported: Some("0.8.20-nightly.2023.04.02".to_owned()),
        ..Default::default()
    };
    let active = ActiveVersion::default();

    let installed = Installer::new(&registry, &source, &active, true)
        .install("0.8.20")
        .expect("Installed");

    assert_eq!(
        installed.warnings,
        vec![Warning::UnexpectedVersion {
            expected: version("0.8.20"),
            found: version("0.8.20-nightly.2023.4.2"),
        }]
    );
    assert!(registry.is_installed(&version("0.8.20")));
}

#[test]
fn error_install_unexpected_version() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());
    let source = FakeSource {
        reported: Some("0.8.13".to_owned()),
        ..Default::default()
    };
    let active = ActiveVersion::default();

    let result = Installer::new(&registry, &source, &active, true).install("0.8.14");

    match result {
        Err(Error::UnexpectedVersion { expected, found }) => {
            assert_eq!(expected, version("0.8.14"));
            assert_eq!(found, version("0.8.13"));
        }
        result => panic!("Unexpected result: {result:?}"),
    }
    assert!(!registry.path_for(&version("0.8.14")).exists());
    assert_eq!(active.get(), None);
}

#[test]
fn error_install_unexpected_version_not_published() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());
    let markers = tempfile::tempdir().expect("Temporary directory");
    let marker = markers.path().join("published");
    let body = format!(
        "[ -e {:?} ] && touch {:?}\n{}",
        registry.path_for(&version("0.8.16")),
        marker,
        testing::version_script("0.8.15")
    );
    let source = FakeSource {
        body: Some(body),
        ..Default::default()
    };
    let active = ActiveVersion::default();

    let result = Installer::new(&registry, &source, &active, true).install("0.8.16");

    assert!(matches!(result, Err(Error::UnexpectedVersion { .. })));
    assert!(!marker.exists());
    assert_eq!(
        std::fs::read_dir(directory.path())
            .expect("Directory")
            .count(),
        0
    );
}

#[test]
fn error_install_broken_executable() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());
    let source = FakeSource {
        body: Some("echo 'Segmentation fault' >&2\nexit 139".to_owned()),
        ..Default::default()
    };
    let active = ActiveVersion::default();

    let result = Installer::new(&registry, &source, &active, true).install("0.8.12");

    match result {
        Err(Error::SolcInstallation { step, .. }) => assert_eq!(step, "validation"),
        result => panic!("Unexpected result: {result:?}"),
    }
    assert!(!registry.path_for(&version("0.8.12")).exists());
}

#[test]
fn error_install_unsupported_version() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());
    let source = FakeSource::new(&[]);
    let active = ActiveVersion::default();

    let result = Installer::new(&registry, &source, &active, true).install("0.4.10");

    assert!(matches!(result, Err(Error::UnsupportedVersion { .. })));
    assert_eq!(source.acquisitions(), 0);
}

///
/// The source failing after writing a partial artifact.
///
struct PartialSource;

impl Source for PartialSource {
    fn installable_versions(&self) -> Result<Vec<semver::Version>, Error> {
        Ok(vec![])
    }

    fn acquire(
        &self,
        version: &semver::Version,
        registry: &Registry,
        _verify: &Verify<'_>,
    ) -> Result<(), Error> {
        std::fs::write(registry.path_for(version), b"#!/bin/sh\n")?;
        Err(Error::Download {
            url: "https://binaries.soliditylang.org/linux-amd64/solc".to_owned(),
            message: "Connection reset".to_owned(),
        })
    }
}

#[test]
fn error_install_acquisition_rolled_back() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());
    let active = ActiveVersion::default();

    let result = Installer::new(&registry, &PartialSource, &active, true).install("0.8.11");

    assert!(matches!(result, Err(Error::Download { .. })));
    assert!(!registry.path_for(&version("0.8.11")).exists());
}

///
/// The source failing after replacing the install directory with a file.
///
struct ClobberingSource;

impl Source for ClobberingSource {
    fn installable_versions(&self) -> Result<Vec<semver::Version>, Error> {
        Ok(vec![])
    }

    fn acquire(
        &self,
        _version: &semver::Version,
        registry: &Registry,
        _verify: &Verify<'_>,
    ) -> Result<(), Error> {
        std::fs::remove_dir_all(registry.directory())?;
        std::fs::write(registry.directory(), b"")?;
        Err(Error::Download {
            url: "https://binaries.soliditylang.org/linux-amd64/solc".to_owned(),
            message: "Connection reset".to_owned(),
        })
    }
}

#[test]
fn error_install_acquisition_error_kept_on_failed_rollback() {
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path().join("solc").as_path());
    let active = ActiveVersion::default();

    let result = Installer::new(&registry, &ClobberingSource, &active, true).install("0.8.10");

    match result {
        Err(Error::Download { message, .. }) => assert_eq!(message, "Connection reset"),
        result => panic!("Unexpected result: {result:?}"),
    }
    assert!(registry.remove(&version("0.8.10")).is_err());
}

#[test]
fn ok_import() {
    let system = tempfile::tempdir().expect("Temporary directory");
    let candidate = testing::fake_solc(system.path(), "solc", "0.8.5");
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());

    let imported = import::import_from(&registry, [candidate.as_path()], true);

    assert_eq!(imported, vec![version("0.8.5")]);
    assert!(registry.is_installed(&version("0.8.5")));
    assert!(candidate.exists());
}

#[test]
fn ok_import_skips_installed() {
    let system = tempfile::tempdir().expect("Temporary directory");
    let candidate = testing::fake_solc(system.path(), "solc", "0.8.4");
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());
    testing::fake_solc(directory.path(), "solc-v0.8.4", "0.8.4");

    let imported = import::import_from(&registry, [candidate.as_path()], true);

    assert!(imported.is_empty());
}

#[test]
fn ok_import_skips_failing_candidates() {
    let system = tempfile::tempdir().expect("Temporary directory");
    let unsupported = testing::fake_solc(system.path(), "solc-old", "0.4.10");
    let broken = testing::write_script(system.path(), "solc-broken", "exit 1");
    let missing = system.path().join("solc-missing");
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());

    let imported = import::import_from(&registry, [unsupported, broken, missing], true);

    assert!(imported.is_empty());
    assert!(registry.list_installed().expect("Listed").is_empty());
}

#[test]
fn ok_import_discards_failing_copy() {
    let system = tempfile::tempdir().expect("Temporary directory");
    let body = format!(
        "case \"$0\" in *.solc-manager-*) exit 1;; esac\n{}",
        testing::version_script("0.8.3")
    );
    let candidate = testing::write_script(system.path(), "solc", body.as_str());
    let directory = tempfile::tempdir().expect("Temporary directory");
    let registry = testing::registry(directory.path());

    let imported = import::import_from(&registry, [candidate], true);

    assert!(imported.is_empty());
    assert!(!registry.path_for(&version("0.8.3")).exists());
    let leftovers = std::fs::read_dir(directory.path())
        .expect("Directory")
        .count();
    assert_eq!(leftovers, 0);
}
