//!
//! The `solc` command-line options.
//!

use std::path::Path;
use std::path::PathBuf;

///
/// The `solc` command-line option value.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Emits the bare flag if `true`, nothing otherwise.
    Flag(bool),
    /// Emits the flag followed by the value.
    Value(String),
    /// Emits the flag followed by the comma-joined values.
    List(Vec<String>),
}

impl OptionValue {
    ///
    /// Returns the command-line arguments for the option.
    ///
    pub fn arguments(&self, name: &str) -> Vec<String> {
        let flag = Options::flag(name);
        match self {
            Self::Flag(true) => vec![flag],
            Self::Flag(false) => vec![],
            Self::Value(value) => vec![flag, value.to_owned()],
            Self::List(values) => vec![flag, values.join(",")],
        }
    }

    ///
    /// Whether the option emits anything.
    ///
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Flag(false))
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

impl From<&Path> for OptionValue {
    fn from(value: &Path) -> Self {
        Self::Value(value.to_string_lossy().to_string())
    }
}

impl From<PathBuf> for OptionValue {
    fn from(value: PathBuf) -> Self {
        Self::from(value.as_path())
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(|value| value.to_owned()).collect())
    }
}

impl From<&[&str]> for OptionValue {
    fn from(values: &[&str]) -> Self {
        Self::List(values.iter().map(|value| (*value).to_owned()).collect())
    }
}

impl From<Vec<PathBuf>> for OptionValue {
    fn from(values: Vec<PathBuf>) -> Self {
        Self::List(
            values
                .iter()
                .map(|value| value.to_string_lossy().to_string())
                .collect(),
        )
    }
}

macro_rules! impl_from_integer {
    ($($integer:ty),*) => {
        $(
            impl From<$integer> for OptionValue {
                fn from(value: $integer) -> Self {
                    Self::Value(value.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(u8, u16, u32, u64, usize, i32, i64);

///
/// The named `solc` command-line options, in insertion order.
///
/// Names are not checked against a whitelist, as the executable is the source of truth for
/// the options it supports.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// The option names and values.
    inner: Vec<(String, OptionValue)>,
}

impl Options {
    /// The help option name.
    pub const HELP: &'static str = "help";

    /// The version query option name.
    pub const VERSION: &'static str = "version";

    /// The standard JSON mode option name.
    pub const STANDARD_JSON: &'static str = "standard_json";

    ///
    /// A shortcut constructor.
    ///
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Sets the option, replacing the previous value of the same name.
    ///
    pub fn set<V>(&mut self, name: &str, value: V)
    where
        V: Into<OptionValue>,
    {
        let value = value.into();
        match self
            .inner
            .iter_mut()
            .find(|(existing, _)| existing.as_str() == name)
        {
            Some((_, existing)) => *existing = value,
            None => self.inner.push((name.to_owned(), value)),
        }
    }

    ///
    /// Sets the option if the value is present.
    ///
    pub fn set_optional<V>(&mut self, name: &str, value: Option<V>)
    where
        V: Into<OptionValue>,
    {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    ///
    /// Returns the option value.
    ///
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.inner
            .iter()
            .find(|(existing, _)| existing.as_str() == name)
            .map(|(_, value)| value)
    }

    ///
    /// Whether the option is set and emits anything.
    ///
    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name).map_or(false, OptionValue::is_enabled)
    }

    ///
    /// Returns the command-line arguments for all options.
    ///
    pub fn arguments(&self) -> Vec<String> {
        self.inner
            .iter()
            .flat_map(|(name, value)| value.arguments(name.as_str()))
            .collect()
    }

    ///
    /// Converts the option name into the long-form flag, e.g. `optimize_runs` => `--optimize-runs`.
    ///
    pub fn flag(name: &str) -> String {
        format!("--{}", name.replace('_', "-"))
    }
}
