//!
//! The `solc` version identifier utilities.
//!

#[cfg(test)]
mod tests;

pub mod pragma;

use crate::error::Error;

lazy_static::lazy_static! {
    ///
    /// The nightly build date with zero-padded month and day, e.g. `2023.04.02`.
    ///
    static ref NIGHTLY_DATE: regex::Regex =
        regex::Regex::new(r"(\d{4})\.0?(\d{1,2})\.0?(\d{1,2})").expect("Always valid");
}

/// The first `solc` version, whose command-line interface can be driven by this crate.
pub const MINIMUM_VERSION: semver::Version = semver::Version::new(0, 4, 11);

/// The self-reported version marker in the `--version` output.
pub const SELF_REPORTED_MARKER: &str = "Version: ";

///
/// The value convertible into a validated version identifier.
///
/// Implemented for both strings and already typed versions, so the validation is idempotent.
///
pub trait IntoVersion {
    ///
    /// Converts the value into a validated version identifier.
    ///
    fn into_version(self) -> Result<semver::Version, Error>;
}

impl IntoVersion for semver::Version {
    fn into_version(self) -> Result<semver::Version, Error> {
        validate(self)
    }
}

impl IntoVersion for &semver::Version {
    fn into_version(self) -> Result<semver::Version, Error> {
        validate(self.to_owned())
    }
}

impl IntoVersion for &str {
    fn into_version(self) -> Result<semver::Version, Error> {
        validate(parse(self)?)
    }
}

impl IntoVersion for String {
    fn into_version(self) -> Result<semver::Version, Error> {
        self.as_str().into_version()
    }
}

impl IntoVersion for &String {
    fn into_version(self) -> Result<semver::Version, Error> {
        self.as_str().into_version()
    }
}

///
/// Parses a version string with an optional `v` prefix.
///
/// The build metadata is dropped, as it never takes part in version equality.
///
pub fn parse(version: &str) -> Result<semver::Version, Error> {
    let trimmed = version.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let parsed = semver::Version::parse(trimmed).map_err(|error| Error::InvalidVersion {
        version: version.to_owned(),
        error,
    })?;
    Ok(normalize(parsed))
}

///
/// Checks that the version is not older than [`MINIMUM_VERSION`].
///
pub fn validate(version: semver::Version) -> Result<semver::Version, Error> {
    let version = normalize(version);
    if version < MINIMUM_VERSION {
        return Err(Error::UnsupportedVersion {
            version,
            minimum: MINIMUM_VERSION,
        });
    }
    Ok(version)
}

///
/// Strips the build metadata, e.g. the `commit.<hash>` suffix.
///
pub fn normalize(mut version: semver::Version) -> semver::Version {
    version.build = semver::BuildMetadata::EMPTY;
    version
}

///
/// Extracts the version from the `solc --version` output.
///
/// The output contains a line like `Version: 0.8.19+commit.7dd6d404.Linux.g++`. Nightly builds
/// report dates with zero-padded month and day, which are not valid semver identifiers, so they
/// are stripped before parsing.
///
pub fn parse_self_reported(output: &str) -> Option<semver::Version> {
    let (_, version) = output.split_once(SELF_REPORTED_MARKER)?;
    let version = version.split_whitespace().next()?;
    let version = version.split('+').next()?;
    let version = NIGHTLY_DATE.replace_all(version, "${1}.${2}.${3}");
    semver::Version::parse(version.as_ref()).ok().map(normalize)
}

///
/// Returns the canonical name of the install directory entry, e.g. `v0.8.19`.
///
pub fn tag(version: &semver::Version) -> String {
    format!("v{version}")
}
