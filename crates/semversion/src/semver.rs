//! Semver facade providing operations over collections of versions

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::comparator::{compare_components, valid_components, Comparator, ComparisonResult};
use crate::operand::VersionOperand;
use crate::version::{Version, VersionError};

/// Main facade for sorting and selecting versions by precedence
pub struct Semver;

impl Semver {
    /// Check if a string matches the semver grammar
    pub fn is_valid(version: &str) -> bool {
        Version::new(version).is_valid()
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str]) -> Result<Vec<String>, VersionError> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Result<Vec<String>, VersionError> {
        Self::usort(versions, false)
    }

    /// Sort parsed versions in ascending order, in place.
    ///
    /// Fails without reordering anything if any version is invalid. Versions
    /// of equal precedence keep their relative order.
    pub fn sort_versions(versions: &mut [Version]) -> Result<(), VersionError> {
        for version in versions.iter() {
            valid_components(version)?;
        }

        versions.sort_by(|a, b| match (a.components(), b.components()) {
            (Some(a), Some(b)) => compare_components(a, b),
            // Unreachable, every entry was validated above
            _ => Ordering::Equal,
        });

        log::debug!("Sorted {} versions", versions.len());
        Ok(())
    }

    /// The operand with the highest precedence, the first one on ties
    ///
    /// Accepts parsed versions as well as raw strings.
    pub fn max<'a, T>(versions: &'a [T]) -> Result<Option<&'a T>, VersionError>
    where
        &'a T: Into<VersionOperand<'a>>,
    {
        Self::select(versions, ComparisonResult::Greater)
    }

    /// The operand with the lowest precedence, the first one on ties
    ///
    /// Accepts parsed versions as well as raw strings.
    pub fn min<'a, T>(versions: &'a [T]) -> Result<Option<&'a T>, VersionError>
    where
        &'a T: Into<VersionOperand<'a>>,
    {
        Self::select(versions, ComparisonResult::Lower)
    }

    fn usort(versions: &[&str], ascending: bool) -> Result<Vec<String>, VersionError> {
        let parsed: Vec<Version> = versions.iter().map(|v| Version::new(*v)).collect();
        let order = Self::sorted_indices(&parsed, ascending)?;

        Ok(order
            .into_iter()
            .map(|i| versions[i].to_string())
            .collect())
    }

    fn sorted_indices(versions: &[Version], ascending: bool) -> Result<Vec<usize>, VersionError> {
        let components = versions
            .iter()
            .map(valid_components)
            .collect::<Result<Vec<_>, _>>()?;

        let mut order: Vec<usize> = (0..versions.len()).collect();
        order.sort_by(|&a, &b| {
            let cmp = compare_components(components[a], components[b]);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        log::debug!("Sorted {} versions", versions.len());
        Ok(order)
    }

    fn select<'a, T>(
        versions: &'a [T],
        wanted: ComparisonResult,
    ) -> Result<Option<&'a T>, VersionError>
    where
        &'a T: Into<VersionOperand<'a>>,
    {
        let mut best: Option<(&'a T, Cow<'a, Version>)> = None;
        for item in versions {
            let version = item.into().resolve();
            valid_components(&version)?;

            let replace = match &best {
                Some((_, current)) => Comparator::compare(&*version, &**current)? == wanted,
                None => true,
            };
            if replace {
                best = Some((item, version));
            }
        }
        Ok(best.map(|(item, _)| item))
    }
}
