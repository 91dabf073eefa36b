//!
//! The remote artifact store source.
//!

use std::path::Path;

use colored::Colorize;
use once_cell::sync::OnceCell;

use crate::config::Config;
use crate::error::Error;
use crate::installer::platform::Platform;
use crate::installer::platform::Strategy;
use crate::installer::platform::Target;
use crate::installer::staging;
use crate::installer::staging::Verify;
use crate::registry::Registry;

use super::solc_list::SolcList;
use super::Source;

///
/// The remote artifact store source.
///
/// Prebuilt executables come from solc-bin, and source tarballs from the GitHub releases.
///
#[derive(Debug)]
pub struct Remote {
    /// The `reqwest` HTTP client.
    http_client: reqwest::blocking::Client,
    /// The URLs configuration.
    config: Config,
    /// The host platform.
    platform: Platform,
    /// The host platform acquisition target.
    target: Target,
    /// Whether the progress output is suppressed.
    quiet: bool,
    /// The solc-bin JSON list, downloaded on first use.
    solc_list: OnceCell<SolcList>,
}

impl Remote {
    /// The HTTP user agent.
    const USER_AGENT: &'static str = concat!("solc-manager/", env!("CARGO_PKG_VERSION"));

    ///
    /// A shortcut constructor.
    ///
    pub fn new(config: Config, platform: Platform, quiet: bool) -> Result<Self, Error> {
        let target = platform.target()?;
        let http_client = reqwest::blocking::Client::builder()
            .user_agent(Self::USER_AGENT)
            .build()
            .map_err(Error::HttpClient)?;
        Ok(Self {
            http_client,
            config,
            platform,
            target,
            quiet,
            solc_list: OnceCell::new(),
        })
    }

    ///
    /// Returns the solc-bin platform directory, taking the config override into account.
    ///
    pub fn platform_directory(&self) -> &str {
        self.config
            .platform_directory(self.platform.os.to_string().as_str())
            .unwrap_or(self.target.directory)
    }

    ///
    /// Returns the solc-bin JSON list, downloading it on first use.
    ///
    fn solc_list(&self) -> Result<&SolcList, Error> {
        self.solc_list.get_or_try_init(|| {
            let url = format!(
                "{}/{}/{}",
                self.config.binaries_url.trim_end_matches('/'),
                self.platform_directory(),
                SolcList::FILE_NAME
            );
            SolcList::download(&self.http_client, url.as_str(), self.quiet)
        })
    }

    ///
    /// Returns the solc-bin URL of the version executable.
    ///
    fn binary_url(&self, version: &semver::Version) -> Result<String, Error> {
        let solc_list = self.solc_list()?;
        let file_name = solc_list
            .file_name(version)
            .ok_or_else(|| Error::Download {
                url: format!(
                    "{}/{}",
                    self.config.binaries_url.trim_end_matches('/'),
                    self.platform_directory()
                ),
                message: format!(
                    "Binary for version v{version} not found in the solc JSON list"
                ),
            })?;
        Ok(format!(
            "{}/{}/{}",
            self.config.binaries_url.trim_end_matches('/'),
            self.platform_directory(),
            file_name
        ))
    }

    ///
    /// Downloads the artifact.
    ///
    fn download(&self, url: &str, destination: &Path) -> Result<Vec<u8>, Error> {
        let error = |message: String| Error::Download {
            url: url.to_owned(),
            message,
        };

        if !self.quiet {
            println!(
                " {} binary `{}` => {:?}",
                "Downloading".bright_green().bold(),
                url,
                destination,
            );
        }
        let response = self
            .http_client
            .get(url)
            .send()
            .map_err(|request_error| error(request_error.to_string()))?;
        if !response.status().is_success() {
            return Err(error(format!("Received status code {}", response.status())));
        }
        let data = response
            .bytes()
            .map_err(|body_error| error(body_error.to_string()))?;
        Ok(data.to_vec())
    }

    ///
    /// Downloads a prebuilt static executable.
    ///
    fn acquire_binary(
        &self,
        version: &semver::Version,
        registry: &Registry,
        verify: &Verify<'_>,
    ) -> Result<(), Error> {
        let url = self.binary_url(version)?;
        let data = self.download(url.as_str(), registry.path_for(version).as_path())?;
        staging::publish_data(registry, version, data.as_slice(), verify)
    }

    ///
    /// Downloads a prebuilt archive or executable into a nested directory entry.
    ///
    fn acquire_archive(
        &self,
        version: &semver::Version,
        registry: &Registry,
        verify: &Verify<'_>,
    ) -> Result<(), Error> {
        let url = self.binary_url(version)?;
        let data = self.download(url.as_str(), registry.path_for(version).as_path())?;
        if !url.ends_with(".zip") {
            return staging::publish_data(registry, version, data.as_slice(), verify);
        }

        let staging_directory = tempfile::Builder::new()
            .prefix(staging::PREFIX)
            .tempdir_in(registry.directory())?;
        let archive_path = staging_directory.path().join("solc.zip");
        std::fs::write(archive_path.as_path(), data.as_slice())?;
        let entry = staging_directory.path().join("entry");
        std::fs::create_dir(entry.as_path())?;

        staging::run_step(
            version,
            "unpacking",
            std::process::Command::new("tar")
                .arg("-xf")
                .arg(archive_path.as_path())
                .arg("-C")
                .arg(entry.as_path()),
        )?;
        staging::publish_directory(registry, version, entry.as_path(), verify)
    }

    ///
    /// Downloads the source tarball and builds the executable.
    ///
    fn acquire_build(
        &self,
        version: &semver::Version,
        registry: &Registry,
        verify: &Verify<'_>,
    ) -> Result<(), Error> {
        let url = format!(
            "{}/download/v{version}/solidity_{version}.tar.gz",
            self.config.releases_url.trim_end_matches('/'),
        );
        let build_directory = tempfile::tempdir()?;
        let data = self.download(url.as_str(), build_directory.path())?;
        let tarball_path = build_directory.path().join("solidity.tar.gz");
        std::fs::write(tarball_path.as_path(), data.as_slice())?;

        staging::run_step(
            version,
            "unpacking",
            std::process::Command::new("tar")
                .arg("-xzf")
                .arg(tarball_path.as_path())
                .arg("-C")
                .arg(build_directory.path()),
        )?;

        let source_directory = build_directory
            .path()
            .join(format!("solidity_{version}"));
        let cmake_directory = source_directory.join("build");
        std::fs::create_dir_all(cmake_directory.as_path())?;

        if !self.quiet {
            println!(
                "    {} solc v{} from {:?}",
                "Building".bright_green().bold(),
                version,
                source_directory,
            );
        }
        staging::run_step(
            version,
            "cmake",
            std::process::Command::new("cmake")
                .arg("..")
                .current_dir(cmake_directory.as_path()),
        )?;
        staging::run_step(
            version,
            "make",
            std::process::Command::new("make")
                .arg("solc")
                .current_dir(cmake_directory.as_path()),
        )?;

        let built = cmake_directory.join("solc").join("solc");
        staging::publish_copy(registry, version, built.as_path(), verify)
    }
}

impl Source for Remote {
    fn installable_versions(&self) -> Result<Vec<semver::Version>, Error> {
        Ok(self.solc_list()?.versions())
    }

    fn acquire(
        &self,
        version: &semver::Version,
        registry: &Registry,
        verify: &Verify<'_>,
    ) -> Result<(), Error> {
        match self.target.strategy {
            Strategy::Binary => self.acquire_binary(version, registry, verify),
            Strategy::Archive => self.acquire_archive(version, registry, verify),
            Strategy::Build => self.acquire_build(version, registry, verify),
        }
    }
}
