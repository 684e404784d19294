//! Operands accepted by the comparison functions

use std::borrow::Cow;

use crate::version::Version;

/// Either side of a comparison: an already parsed version or raw text.
///
/// Raw text is parsed on every use.
#[derive(Debug, Clone, Copy)]
pub enum VersionOperand<'a> {
    Parsed(&'a Version),
    Raw(&'a str),
}

impl<'a> VersionOperand<'a> {
    pub(crate) fn resolve(self) -> Cow<'a, Version> {
        match self {
            VersionOperand::Parsed(version) => Cow::Borrowed(version),
            VersionOperand::Raw(source) => Cow::Owned(Version::new(source)),
        }
    }
}

impl<'a> From<&'a Version> for VersionOperand<'a> {
    fn from(version: &'a Version) -> Self {
        VersionOperand::Parsed(version)
    }
}

impl<'a> From<&'a str> for VersionOperand<'a> {
    fn from(source: &'a str) -> Self {
        VersionOperand::Raw(source)
    }
}

impl<'a> From<&'a String> for VersionOperand<'a> {
    fn from(source: &'a String) -> Self {
        VersionOperand::Raw(source.as_str())
    }
}

impl<'a, 'b> From<&'a &'b str> for VersionOperand<'a> {
    fn from(source: &'a &'b str) -> Self {
        VersionOperand::Raw(source)
    }
}
