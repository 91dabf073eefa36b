//!
//! The solc manager config.
//!

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Error;

///
/// The solc manager config.
///
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// The install directory, overriding the environment and the default one.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// The solc-bin artifact store root.
    #[serde(default = "Config::default_binaries_url")]
    pub binaries_url: String,
    /// The GitHub releases root, used for source tarballs.
    #[serde(default = "Config::default_releases_url")]
    pub releases_url: String,
    /// The remote platform directory names, e.g. `linux` => `linux-amd64`.
    #[serde(default)]
    pub platforms: Option<HashMap<String, String>>,
}

impl Config {
    /// The default solc-bin artifact store root.
    pub const BINARIES_URL: &'static str = "https://binaries.soliditylang.org";

    /// The default GitHub releases root.
    pub const RELEASES_URL: &'static str = "https://github.com/ethereum/solidity/releases";

    ///
    /// Returns the remote platform directory override for the specified OS, if any.
    ///
    pub fn platform_directory(&self, os: &str) -> Option<&str> {
        self.platforms
            .as_ref()
            .and_then(|platforms| platforms.get(os))
            .map(|directory| directory.as_str())
    }

    fn default_binaries_url() -> String {
        Self::BINARIES_URL.to_owned()
    }

    fn default_releases_url() -> String {
        Self::RELEASES_URL.to_owned()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: None,
            binaries_url: Self::default_binaries_url(),
            releases_url: Self::default_releases_url(),
            platforms: None,
        }
    }
}

impl TryFrom<&Path> for Config {
    type Error = Error;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let file = std::fs::File::open(path).map_err(|error| Error::Config {
            path: path.to_owned(),
            message: format!("opening error: {error}"),
        })?;
        let reader = std::io::BufReader::new(file);
        let config: Config = serde_json::from_reader(reader).map_err(|error| Error::Config {
            path: path.to_owned(),
            message: format!("parsing error: {error}"),
        })?;
        Ok(config)
    }
}
