//!
//! The version constraint expression, also known as the version pragma.
//!


use std::str::FromStr;

use crate::error::Error;

lazy_static::lazy_static! {
    ///
    /// The comparator term, e.g. `>=0.4.2`, `^0.5.0`, or a bare `0.6.9`.
    ///
    static ref COMPARATOR: regex::Regex = regex::Regex::new(
        r"(?P<operator>[<>]=?|=|\^)?(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)"
    )
    .expect("Always valid");
}

///
/// The version constraint expression.
///
/// A disjunction of comparator sets separated by `||`, each being a conjunction of comparator
/// terms written one after another, e.g. `^0.4.2 || >=0.5.4<0.7.0`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pragma {
    /// The comparator sets.
    pub sets: Vec<semver::VersionReq>,
}

impl Pragma {
    /// The comparator sets delimiter.
    pub const DELIMITER_OR: &'static str = "||";

    ///
    /// Selects the highest candidate satisfying any of the comparator sets.
    ///
    /// Every set is evaluated independently, and the maximum across all of them wins, as a
    /// later and less restrictive set may yield a newer version than an earlier one.
    ///
    pub fn select<'a, I>(&self, candidates: I) -> Option<semver::Version>
    where
        I: IntoIterator<Item = &'a semver::Version>,
        I::IntoIter: Clone,
    {
        let candidates = candidates.into_iter();
        let mut selected: Option<&semver::Version> = None;
        for set in self.sets.iter() {
            let highest = candidates
                .clone()
                .filter(|candidate| set.matches(candidate))
                .max();
            if let Some(highest) = highest {
                if selected.map_or(true, |selected| selected < highest) {
                    selected = Some(highest);
                }
            }
        }
        selected.cloned()
    }

    ///
    /// Parses a single comparator set.
    ///
    /// The text around the comparator terms is ignored, so a whole source line like
    /// `pragma solidity ^0.4.11;` is accepted. A set without a single term is an error.
    ///
    fn parse_set(expression: &str, set: &str) -> Result<semver::VersionReq, Error> {
        let error = |message: String| Error::InvalidPragma {
            expression: expression.to_owned(),
            message,
        };

        let mut comparators = Vec::new();
        for captures in COMPARATOR.captures_iter(set) {
            let term = captures.get(0).expect("Always exists");
            if set[..term.start()].ends_with('~') {
                return Err(error(format!("unknown operator `~` in `{set}`")));
            }

            let op = match captures.name("operator").map(|operator| operator.as_str()) {
                None | Some("=") => semver::Op::Exact,
                Some(">") => semver::Op::Greater,
                Some(">=") => semver::Op::GreaterEq,
                Some("<") => semver::Op::Less,
                Some("<=") => semver::Op::LessEq,
                Some("^") => semver::Op::Caret,
                Some(operator) => return Err(error(format!("unknown operator `{operator}`"))),
            };
            let number = |name: &str| -> Result<u64, Error> {
                captures[name].parse::<u64>().map_err(|parsing_error| {
                    error(format!("`{}`: {parsing_error}", term.as_str()))
                })
            };

            comparators.push(semver::Comparator {
                op,
                major: number("major")?,
                minor: Some(number("minor")?),
                patch: Some(number("patch")?),
                pre: semver::Prerelease::EMPTY,
            });
        }
        if comparators.is_empty() {
            return Err(error(format!("no comparator terms in `{set}`")));
        }

        Ok(semver::VersionReq { comparators })
    }
}

impl FromStr for Pragma {
    type Err = Error;

    fn from_str(expression: &str) -> Result<Self, Self::Err> {
        let compact: String = expression
            .chars()
            .filter(|character| !character.is_whitespace())
            .collect();

        let sets = compact
            .split(Self::DELIMITER_OR)
            .map(|set| Self::parse_set(expression, set))
            .collect::<Result<Vec<semver::VersionReq>, Error>>()?;

        Ok(Self { sets })
    }
}

impl std::fmt::Display for Pragma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sets: Vec<String> = self.sets.iter().map(|set| set.to_string()).collect();
        write!(f, "{}", sets.join(" || "))
    }
}

///
/// Selects the highest candidate satisfying the constraint expression.
///
pub fn select(
    expression: &str,
    candidates: &[semver::Version],
) -> Result<Option<semver::Version>, Error> {
    let pragma = Pragma::from_str(expression)?;
    Ok(pragma.select(candidates.iter()))
}
