//! Semantic Versioning 2.0.0 parsing and precedence comparison
//!
//! A [`Version`] is built from any string and records whether it matches the
//! semver grammar. Valid versions are ordered with [`Comparator`] or the
//! matching instance methods; [`Semver`] sorts and selects over collections.
//!
//! ```
//! use semversion::{Comparator, ComparisonResult, Version};
//!
//! let version = Version::new("1.0.0-alpha.1");
//! assert!(version.is_valid());
//! assert!(version.lt("1.0.0").unwrap());
//! assert_eq!(
//!     Comparator::compare("1.0.0+build1", "1.0.0+build2").unwrap(),
//!     ComparisonResult::Equal
//! );
//! assert!(Comparator::compare("1.a.3", "1.0.0").is_err());
//! ```

mod comparator;
mod operand;
mod semver;
mod version;

pub use comparator::{Comparator, ComparisonResult};
pub use operand::VersionOperand;
pub use semver::Semver;
pub use version::{Version, VersionError};
