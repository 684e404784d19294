//! Version precedence comparison

use std::cmp::Ordering;

use crate::operand::VersionOperand;
use crate::version::{Components, Version, VersionError};

/// Outcome of comparing two versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonResult {
    Lower = -1,
    Equal = 0,
    Greater = 1,
}

impl ComparisonResult {
    /// -1, 0 or 1
    pub fn as_i8(self) -> i8 {
        self as i8
    }

    /// Check if the result is <
    pub fn is_lt(self) -> bool {
        self == ComparisonResult::Lower
    }

    /// Check if the result is <=
    pub fn is_le(self) -> bool {
        self != ComparisonResult::Greater
    }

    /// Check if the result is >
    pub fn is_gt(self) -> bool {
        self == ComparisonResult::Greater
    }

    /// Check if the result is >=
    pub fn is_ge(self) -> bool {
        self != ComparisonResult::Lower
    }

    /// Check if the result is ==
    pub fn is_eq(self) -> bool {
        self == ComparisonResult::Equal
    }

    /// Swap Lower and Greater
    pub fn reverse(self) -> Self {
        match self {
            ComparisonResult::Lower => ComparisonResult::Greater,
            ComparisonResult::Equal => ComparisonResult::Equal,
            ComparisonResult::Greater => ComparisonResult::Lower,
        }
    }
}

impl From<Ordering> for ComparisonResult {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => ComparisonResult::Lower,
            Ordering::Equal => ComparisonResult::Equal,
            Ordering::Greater => ComparisonResult::Greater,
        }
    }
}

impl From<ComparisonResult> for Ordering {
    fn from(result: ComparisonResult) -> Self {
        match result {
            ComparisonResult::Lower => Ordering::Less,
            ComparisonResult::Equal => Ordering::Equal,
            ComparisonResult::Greater => Ordering::Greater,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ComparisonResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ComparisonResult {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        match <i8 as serde::Deserialize>::deserialize(deserializer)? {
            -1 => Ok(ComparisonResult::Lower),
            0 => Ok(ComparisonResult::Equal),
            1 => Ok(ComparisonResult::Greater),
            other => Err(D::Error::custom(format!("Invalid comparison result {}", other))),
        }
    }
}

/// Comparator for ordering versions by semver precedence
///
/// Every operand may be a parsed [`Version`] or a raw string. Any invalid
/// operand makes the call fail with [`VersionError::InvalidOperand`].
pub struct Comparator;

impl Comparator {
    /// Compare version1 to version2
    pub fn compare<'a, 'b>(
        version1: impl Into<VersionOperand<'a>>,
        version2: impl Into<VersionOperand<'b>>,
    ) -> Result<ComparisonResult, VersionError> {
        let version1 = version1.into().resolve();
        let version2 = version2.into().resolve();

        let result = compare_components(valid_components(&version1)?, valid_components(&version2)?);
        log::trace!("Compared {} with {}: {:?}", version1, version2, result);

        Ok(result.into())
    }

    /// Check if version1 > version2
    pub fn gt<'a, 'b>(
        version1: impl Into<VersionOperand<'a>>,
        version2: impl Into<VersionOperand<'b>>,
    ) -> Result<bool, VersionError> {
        Self::compare(version1, version2).map(ComparisonResult::is_gt)
    }

    /// Check if version1 >= version2
    pub fn ge<'a, 'b>(
        version1: impl Into<VersionOperand<'a>>,
        version2: impl Into<VersionOperand<'b>>,
    ) -> Result<bool, VersionError> {
        Self::compare(version1, version2).map(ComparisonResult::is_ge)
    }

    /// Check if version1 < version2
    pub fn lt<'a, 'b>(
        version1: impl Into<VersionOperand<'a>>,
        version2: impl Into<VersionOperand<'b>>,
    ) -> Result<bool, VersionError> {
        Self::compare(version1, version2).map(ComparisonResult::is_lt)
    }

    /// Check if version1 <= version2
    pub fn le<'a, 'b>(
        version1: impl Into<VersionOperand<'a>>,
        version2: impl Into<VersionOperand<'b>>,
    ) -> Result<bool, VersionError> {
        Self::compare(version1, version2).map(ComparisonResult::is_le)
    }

    /// Check if version1 and version2 have the same precedence
    pub fn eq<'a, 'b>(
        version1: impl Into<VersionOperand<'a>>,
        version2: impl Into<VersionOperand<'b>>,
    ) -> Result<bool, VersionError> {
        Self::compare(version1, version2).map(ComparisonResult::is_eq)
    }
}

pub(crate) fn valid_components(version: &Version) -> Result<&Components, VersionError> {
    version.components().ok_or_else(|| {
        log::debug!("Refusing to compare invalid version \"{}\"", version);
        VersionError::InvalidOperand(version.as_str().to_string())
    })
}

pub(crate) fn compare_components(a: &Components, b: &Components) -> Ordering {
    a.major
        .cmp(&b.major)
        .then(a.minor.cmp(&b.minor))
        .then(a.patch.cmp(&b.patch))
        .then_with(|| compare_pre_release(&a.pre_release, &b.pre_release))
}

fn compare_pre_release(a: &[String], b: &[String]) -> Ordering {
    // A release ranks above any of its pre-releases
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    for (left, right) in a.iter().zip(b) {
        match compare_identifier(left, right) {
            Ordering::Equal => continue,
            decided => return decided,
        }
    }

    a.len().cmp(&b.len())
}

fn compare_identifier(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        // No leading zeros, so the longer number is the larger one
        (true, true) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        (false, false) => a.cmp(b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
    }
}

fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}
