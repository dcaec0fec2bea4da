//! API version numbers.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::Error;

/// Matches `major.minor` version strings as they appear in `feature` blocks.
static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.([0-9]+)$").expect("Invalid version regex"));

/// An API version as a `(major, minor)` pair with a total order.
///
/// Feature selection walks feature blocks in ascending version order, so the
/// ordering here decides which deltas apply for a target version. A string
/// that does not parse never produces a `Version` — unparseable versions are
/// rejected at the boundary instead of being ordered as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u32,
    minor: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = VERSION_REGEX
            .captures(s)
            .ok_or_else(|| Error::InvalidVersion {
                value: s.to_string(),
            })?;
        // The regex only admits decimal digit runs; overflow is the one way
        // a capture can still fail to convert.
        let parse = |index: usize| {
            captures[index]
                .parse::<u32>()
                .map_err(|_| Error::InvalidVersion {
                    value: s.to_string(),
                })
        };
        Ok(Self {
            major: parse(1)?,
            minor: parse(2)?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("1.0", 1, 0)]
    #[case("4.6", 4, 6)]
    #[case("10.12", 10, 12)]
    fn parses_major_minor(#[case] input: &str, #[case] major: u32, #[case] minor: u32) {
        let version: Version = input.parse().unwrap();
        assert_eq!(version.major(), major);
        assert_eq!(version.minor(), minor);
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case("1.")]
    #[case(".0")]
    #[case("1.0.1")]
    #[case("1.x")]
    #[case(" 1.0")]
    fn rejects_malformed_strings(#[case] input: &str) {
        assert!(input.parse::<Version>().is_err());
    }

    #[test]
    fn orders_major_before_minor() {
        assert!(Version::new(1, 9) < Version::new(2, 0));
        assert!(Version::new(2, 0) < Version::new(2, 1));
        assert!(Version::new(3, 3) <= Version::new(3, 3));
        assert!(Version::new(4, 0) > Version::new(3, 9));
    }

    #[test]
    fn displays_as_major_dot_minor() {
        assert_eq!(Version::new(4, 6).to_string(), "4.6");
    }
}
