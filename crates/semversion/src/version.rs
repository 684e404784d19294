//! Version parsing against the Semantic Versioning 2.0.0 grammar

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::comparator::{Comparator, ComparisonResult};
use crate::operand::VersionOperand;

/// Error type for version parsing and comparison
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version string \"{0}\"")]
    InvalidVersion(String),
    #[error("You can only compare valid versions, got \"{0}\"")]
    InvalidOperand(String),
}

lazy_static! {
    // `[0-9]` rather than `\d`: the regex crate treats `\d` as any Unicode digit.
    static ref VERSION_RE: Regex = Regex::new(concat!(
        r"^(?P<major>0|[1-9][0-9]*)\.(?P<minor>0|[1-9][0-9]*)\.(?P<patch>0|[1-9][0-9]*)",
        r"(?:-(?P<pre>(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)",
        r"(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?",
        r"(?:\+(?P<build>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    ))
    .unwrap();
}

/// Fields extracted from a version that matched the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Components {
    pub(crate) major: u64,
    pub(crate) minor: u64,
    pub(crate) patch: u64,
    pub(crate) pre_release: Vec<String>,
    pub(crate) build_metadata: Vec<String>,
}

impl Components {
    fn parse(source: &str) -> Option<Self> {
        let caps = VERSION_RE.captures(source)?;

        let number = |name: &str| caps.name(name)?.as_str().parse::<u64>().ok();
        let identifiers = |name: &str| -> Vec<String> {
            caps.name(name)
                .map(|m| m.as_str().split('.').map(str::to_string).collect())
                .unwrap_or_default()
        };

        let (major, minor, patch) = match (number("major"), number("minor"), number("patch")) {
            (Some(major), Some(minor), Some(patch)) => (major, minor, patch),
            _ => {
                log::debug!("Version core of \"{}\" does not fit in 64 bits", source);
                return None;
            }
        };

        Some(Components {
            major,
            minor,
            patch,
            pre_release: identifiers("pre"),
            build_metadata: identifiers("build"),
        })
    }
}

/// A version string checked against the semver grammar.
///
/// Construction never fails. A string that does not match the grammar gives
/// a version whose [`is_valid`](Version::is_valid) is false; such a version
/// still displays its source text but exposes no fields and cannot be
/// compared.
///
/// Precedence ignores build metadata and is undefined for invalid versions,
/// so there is no `PartialEq`/`PartialOrd`. Compare through [`Comparator`]
/// or the instance methods, which report invalid operands as errors.
#[derive(Debug, Clone)]
pub struct Version {
    source: String,
    components: Option<Components>,
}

impl Version {
    /// Parse a version string. Invalid input yields an invalid version.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let components = Components::parse(&source);
        if components.is_none() {
            log::debug!("Invalid version string \"{}\"", source);
        }
        Version { source, components }
    }

    /// Parse a version string, rejecting anything outside the grammar.
    pub fn parse(source: &str) -> Result<Self, VersionError> {
        let version = Version::new(source);
        if version.is_valid() {
            Ok(version)
        } else {
            Err(VersionError::InvalidVersion(source.to_string()))
        }
    }

    /// Check if the source matched the semver grammar
    pub fn is_valid(&self) -> bool {
        self.components.is_some()
    }

    /// Major version, `None` when invalid
    pub fn major(&self) -> Option<u64> {
        self.components.as_ref().map(|c| c.major)
    }

    /// Minor version, `None` when invalid
    pub fn minor(&self) -> Option<u64> {
        self.components.as_ref().map(|c| c.minor)
    }

    /// Patch version, `None` when invalid
    pub fn patch(&self) -> Option<u64> {
        self.components.as_ref().map(|c| c.patch)
    }

    /// Dot-separated identifiers after `-`, empty when absent or invalid.
    pub fn pre_release_identifiers(&self) -> &[String] {
        self.components
            .as_ref()
            .map(|c| c.pre_release.as_slice())
            .unwrap_or_default()
    }

    /// Dot-separated identifiers after `+`, empty when absent or invalid.
    pub fn build_metadata_identifiers(&self) -> &[String] {
        self.components
            .as_ref()
            .map(|c| c.build_metadata.as_slice())
            .unwrap_or_default()
    }

    /// Check if the version carries pre-release identifiers
    pub fn is_pre_release(&self) -> bool {
        !self.pre_release_identifiers().is_empty()
    }

    /// The exact string this version was constructed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn components(&self) -> Option<&Components> {
        self.components.as_ref()
    }

    /// Compare this version to another one.
    pub fn compare_to<'a>(
        &self,
        other: impl Into<VersionOperand<'a>>,
    ) -> Result<ComparisonResult, VersionError> {
        Comparator::compare(self, other)
    }

    /// Check if this version > other
    pub fn gt<'a>(&self, other: impl Into<VersionOperand<'a>>) -> Result<bool, VersionError> {
        Comparator::gt(self, other)
    }

    /// Check if this version >= other
    pub fn ge<'a>(&self, other: impl Into<VersionOperand<'a>>) -> Result<bool, VersionError> {
        Comparator::ge(self, other)
    }

    /// Check if this version < other
    pub fn lt<'a>(&self, other: impl Into<VersionOperand<'a>>) -> Result<bool, VersionError> {
        Comparator::lt(self, other)
    }

    /// Check if this version <= other
    pub fn le<'a>(&self, other: impl Into<VersionOperand<'a>>) -> Result<bool, VersionError> {
        Comparator::le(self, other)
    }

    /// Check if this version has the same precedence as other
    pub fn eq<'a>(&self, other: impl Into<VersionOperand<'a>>) -> Result<bool, VersionError> {
        Comparator::eq(self, other)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for Version {
    fn from(source: &str) -> Self {
        Version::new(source)
    }
}

impl From<String> for Version {
    fn from(source: String) -> Self {
        Version::new(source)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <String as serde::Deserialize>::deserialize(deserializer).map(Version::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_version() {
        let version = Version::new("1.2.3");
        assert!(version.is_valid());
        assert_eq!(version.major(), Some(1));
        assert_eq!(version.minor(), Some(2));
        assert_eq!(version.patch(), Some(3));
        assert!(version.pre_release_identifiers().is_empty());
        assert!(version.build_metadata_identifiers().is_empty());
        assert!(!version.is_pre_release());
    }

    #[test]
    fn test_parse_long_version() {
        let version = Version::new("1.0.0-beta+exp.sha.5114f85");
        assert!(version.is_valid());
        assert_eq!(version.major(), Some(1));
        assert_eq!(version.minor(), Some(0));
        assert_eq!(version.patch(), Some(0));
        assert_eq!(version.pre_release_identifiers(), ["beta"]);
        assert_eq!(version.build_metadata_identifiers(), ["exp", "sha", "5114f85"]);
        assert!(version.is_pre_release());
    }

    #[test]
    fn test_parse_pre_release_identifiers() {
        let version = Version::new("1.0.0-alpha.1.x-y.0a");
        assert!(version.is_valid());
        assert_eq!(version.pre_release_identifiers(), ["alpha", "1", "x-y", "0a"]);

        let version = Version::new("1.0.0-0.3.7");
        assert_eq!(version.pre_release_identifiers(), ["0", "3", "7"]);

        let version = Version::new("1.0.0--");
        assert_eq!(version.pre_release_identifiers(), ["-"]);
    }

    #[test]
    fn test_parse_build_metadata_only() {
        let version = Version::new("1.0.0+20130313144700");
        assert!(version.is_valid());
        assert!(version.pre_release_identifiers().is_empty());
        assert_eq!(version.build_metadata_identifiers(), ["20130313144700"]);

        // Leading zeros are allowed in build metadata
        let version = Version::new("1.0.0+001.0-x");
        assert!(version.is_valid());
        assert_eq!(version.build_metadata_identifiers(), ["001", "0-x"]);
    }

    #[test]
    fn test_parse_large_numbers() {
        let version = Version::new("18446744073709551615.0.0");
        assert_eq!(version.major(), Some(u64::MAX));

        assert!(!Version::new("18446744073709551616.0.0").is_valid());
    }

    #[test]
    fn test_reject_invalid() {
        let invalid = [
            "1.a.3",
            "01.2.3",
            "1.02.3",
            "1.2.03",
            "1.2",
            "1",
            "",
            "v1.2.3",
            " 1.2.3",
            "1.2.3 ",
            "1.2.3\n",
            "1.2.3-",
            "1.2.3+",
            "1.2.3-01",
            "1.2.3-alpha..1",
            "1.2.3-.alpha",
            "1.2.3-alpha.",
            "1.2.3+build.",
            "1.2.3+.build",
            "1.2.3-alpha_beta",
            "1.2.3+build+meta",
            "1.2.3.4",
            "1.2.3-\u{0663}",
            "\u{0661}.2.3",
        ];
        for input in invalid {
            let version = Version::new(input);
            assert!(!version.is_valid(), "{:?} should be invalid", input);
            assert_eq!(version.major(), None);
            assert!(version.pre_release_identifiers().is_empty());
            assert!(version.build_metadata_identifiers().is_empty());
        }
    }

    #[test]
    fn test_display_returns_source() {
        for input in ["1.0.0-rc.1+build.5", "1.a.3", "", "not a version"] {
            let version = Version::new(input);
            assert_eq!(version.to_string(), input);
            assert_eq!(version.as_str(), input);
        }
    }

    #[test]
    fn test_strict_parse() {
        let version: Version = "2.4.0-alpha".parse().unwrap();
        assert_eq!(version.minor(), Some(4));

        let err = "2.4".parse::<Version>().unwrap_err();
        assert_eq!(err, VersionError::InvalidVersion("2.4".to_string()));
        assert_eq!(err.to_string(), "Invalid version string \"2.4\"");

        assert!(Version::parse("0.0.0").is_ok());
    }

    #[test]
    fn test_from_conversions() {
        assert!(Version::from("1.2.3").is_valid());
        assert!(Version::from(String::from("1.2.3-x")).is_valid());
    }

    #[test]
    fn test_instance_comparisons() {
        let version = Version::new("1.2.3");
        assert!(version.gt("1.2.2").unwrap());
        assert!(version.ge("1.2.3").unwrap());
        assert!(version.lt("1.3.0").unwrap());
        assert!(version.le("1.2.3+meta").unwrap());
        assert!(version.eq(&version).unwrap());
        assert_eq!(version.compare_to("1.2.3-rc.1").unwrap(), ComparisonResult::Greater);
    }

    #[test]
    fn test_instance_comparison_with_invalid() {
        let invalid = Version::new("1.a.3");
        assert!(matches!(
            invalid.eq(&invalid),
            Err(VersionError::InvalidOperand(s)) if s == "1.a.3"
        ));
        assert!(Version::new("1.0.0").gt("1.0").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let version = Version::new("1.0.0-beta+exp.sha.5114f85");
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"1.0.0-beta+exp.sha.5114f85\"");

        let back: Version = serde_json::from_str(&json).unwrap();
        assert!(back.is_valid());
        assert_eq!(back.as_str(), version.as_str());

        let invalid: Version = serde_json::from_str("\"1.a.3\"").unwrap();
        assert!(!invalid.is_valid());
    }
}
