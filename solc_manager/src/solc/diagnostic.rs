//!
//! The `solc` standard error diagnostics.
//!
//! The table is coupled to the exact wording of `solc` releases, which may change at any time.
//! Anything unmatched falls back to the generic execution error.
//!

///
/// The diagnostic recognized in the `solc` standard error.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The option is not recognized.
    UnknownOption {
        /// The option as written on the command line.
        option: String,
    },
    /// The option value is not accepted.
    UnknownValue {
        /// The option as written on the command line.
        option: String,
        /// The rejected value.
        value: String,
    },
}

///
/// The diagnostic kind.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// See [`Diagnostic::UnknownOption`].
    UnknownOption,
    /// See [`Diagnostic::UnknownValue`].
    UnknownValue,
}

///
/// The diagnostic table entry.
///
#[derive(Debug)]
pub struct Pattern {
    /// The diagnostic kind.
    pub kind: Kind,
    /// The first release using the wording.
    pub first_version: semver::Version,
    /// The last release using the wording, if it has been changed since.
    pub last_version: Option<semver::Version>,
    /// The pattern with the `option` and, optionally, `value` groups.
    pub regex: regex::Regex,
}

impl Pattern {
    ///
    /// Whether the pattern applies to the version. Unknown versions match every pattern.
    ///
    pub fn applies_to(&self, version: Option<&semver::Version>) -> bool {
        let version = match version {
            Some(version) => version,
            None => return true,
        };
        if version < &self.first_version {
            return false;
        }
        match self.last_version {
            Some(ref last_version) => version <= last_version,
            None => true,
        }
    }

    ///
    /// Matches the standard error text.
    ///
    pub fn matches(&self, stderr: &str) -> Option<Diagnostic> {
        let captures = self.regex.captures(stderr)?;
        let option = captures.name("option")?.as_str().to_owned();
        match self.kind {
            Kind::UnknownOption => Some(Diagnostic::UnknownOption { option }),
            Kind::UnknownValue => Some(Diagnostic::UnknownValue {
                option,
                value: captures.name("value")?.as_str().trim().to_owned(),
            }),
        }
    }
}

lazy_static::lazy_static! {
    ///
    /// The diagnostic table, checked in order.
    ///
    pub static ref PATTERNS: Vec<Pattern> = vec![
        Pattern {
            kind: Kind::UnknownOption,
            first_version: crate::version::MINIMUM_VERSION,
            last_version: None,
            regex: regex::Regex::new(r"unrecogni[sz]ed option '(?P<option>[^']+)'")
                .expect("Always valid"),
        },
        Pattern {
            kind: Kind::UnknownValue,
            first_version: crate::version::MINIMUM_VERSION,
            last_version: None,
            regex: regex::Regex::new(r"Invalid option to (?P<option>--[\w-]+): (?P<value>[^\r\n]*)")
                .expect("Always valid"),
        },
    ];
}

///
/// Classifies the standard error text of a failed invocation.
///
pub fn classify(stderr: &str, version: Option<&semver::Version>) -> Option<Diagnostic> {
    PATTERNS
        .iter()
        .filter(|pattern| pattern.applies_to(version))
        .find_map(|pattern| pattern.matches(stderr))
}
