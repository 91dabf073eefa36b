//!
//! The test utilities.
//!

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::error::Error;
use crate::installer::source::Source;
use crate::installer::staging;
use crate::installer::staging::Verify;
use crate::registry::Layout;
use crate::registry::Registry;

///
/// Writes an executable shell script.
///
pub fn write_script(directory: &Path, name: &str, body: &str) -> PathBuf {
    let path = directory.join(name);
    std::fs::write(path.as_path(), format!("#!/bin/sh\n{body}\n")).expect("Write");
    staging::set_executable(path.as_path()).expect("Permissions");
    path
}

///
/// Returns the script body printing the `solc --version` output.
///
pub fn version_script(version: &str) -> String {
    format!(
        "echo 'solc, the solidity compiler commandline interface'\necho 'Version: {version}+commit.7dd6d404.Linux.g++'"
    )
}

///
/// Writes a fake `solc` reporting the version.
///
pub fn fake_solc(directory: &Path, name: &str, version: &str) -> PathBuf {
    write_script(directory, name, version_script(version).as_str())
}

///
/// Creates a flat registry in the directory.
///
pub fn registry(directory: &Path) -> Registry {
    Registry::with_layout(Some(directory), Layout::Flat).expect("Registry")
}

///
/// The fake acquisition source, writing version-reporting scripts.
///
#[derive(Debug, Default)]
pub struct FakeSource {
    /// The installable versions.
    pub versions: Vec<semver::Version>,
    /// Whether the installable versions list cannot be fetched.
    pub unavailable: bool,
    /// The self-reported version override.
    pub reported: Option<String>,
    /// The script body override.
    pub body: Option<String>,
    /// The file each acquisition appends a line to, shared between processes.
    pub log: Option<PathBuf>,
    /// The acquisition delay, widening the race window of concurrent installers.
    pub delay: Duration,
    /// The number of acquisitions in this process.
    pub acquisitions: AtomicUsize,
}

impl FakeSource {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(versions: &[&str]) -> Self {
        Self {
            versions: versions
                .iter()
                .map(|version| semver::Version::parse(version).expect("Valid"))
                .collect(),
            ..Default::default()
        }
    }

    ///
    /// Returns the number of acquisitions in this process.
    ///
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }
}

impl Source for FakeSource {
    fn installable_versions(&self) -> Result<Vec<semver::Version>, Error> {
        if self.unavailable {
            return Err(Error::Download {
                url: "https://binaries.soliditylang.org/linux-amd64/list.json".to_owned(),
                message: "connection refused".to_owned(),
            });
        }
        Ok(self.versions.clone())
    }

    fn acquire(
        &self,
        version: &semver::Version,
        registry: &Registry,
        verify: &Verify<'_>,
    ) -> Result<(), Error> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        if let Some(ref log) = self.log {
            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log.as_path())?;
            writeln!(file, "{version} {}", std::process::id())?;
        }
        std::thread::sleep(self.delay);

        let body = match self.body {
            Some(ref body) => body.to_owned(),
            None => version_script(
                self.reported
                    .clone()
                    .unwrap_or_else(|| version.to_string())
                    .as_str(),
            ),
        };
        staging::publish_data(
            registry,
            version,
            format!("#!/bin/sh\n{body}\n").as_bytes(),
            verify,
        )
    }
}
