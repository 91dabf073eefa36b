//!
//! The Solidity compiler JSON list metadata.
//!

use std::collections::BTreeMap;

use colored::Colorize;
use serde::Deserialize;

use crate::error::Error;

///
/// The Solidity compiler JSON list metadata.
///
#[derive(Debug, Deserialize)]
pub struct SolcList {
    /// The collection of compiler releases, from version to file name.
    pub releases: BTreeMap<String, String>,
    /// The latest release version.
    #[serde(rename = "latestRelease", default)]
    pub latest_release: Option<String>,
}

impl SolcList {
    /// The list file name inside a solc-bin platform directory.
    pub const FILE_NAME: &'static str = "list.json";

    ///
    /// Downloads the list.
    ///
    pub fn download(
        http_client: &reqwest::blocking::Client,
        url: &str,
        quiet: bool,
    ) -> Result<Self, Error> {
        let error = |message: String| Error::Download {
            url: url.to_owned(),
            message,
        };

        if !quiet {
            println!(
                " {} solc-bin JSON `{}`",
                "Downloading".bright_green().bold(),
                url
            );
        }
        let response = http_client
            .get(url)
            .send()
            .map_err(|request_error| error(request_error.to_string()))?;
        if !response.status().is_success() {
            return Err(error(format!("Received status code {}", response.status())));
        }
        let list: SolcList = response
            .json()
            .map_err(|parsing_error| error(parsing_error.to_string()))?;
        Ok(list)
    }

    ///
    /// Returns the parsed release versions. Malformed entries are skipped.
    ///
    pub fn versions(&self) -> Vec<semver::Version> {
        self.releases
            .keys()
            .filter_map(|version| crate::version::parse(version).ok())
            .collect()
    }

    ///
    /// Returns the release file name of the version.
    ///
    pub fn file_name(&self, version: &semver::Version) -> Option<&str> {
        self.releases
            .get(version.to_string().as_str())
            .map(|file_name| file_name.as_str())
    }
}
