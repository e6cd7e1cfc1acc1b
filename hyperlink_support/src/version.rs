// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Parse the version strings that terminal emulators export, eg: `TERM_PROGRAM_VERSION`
//! and `VTE_VERSION`, into a [`Version`] that can be compared.
//!
//! Two input shapes are accepted:
//!
//! 1. A compact build number made of exactly 3 or 4 ASCII digits, eg: `5002` or `340`.
//!    The last two digits are the patch, the 1 or 2 digits before them are the minor,
//!    and the major is always `0`. VTE publishes its version this way.
//! 2. A dotted string with at least three components, eg: `3.1.0` or `3.4.19.1`. Only
//!    the first three components are read, the rest are ignored.
//!
//! There is no best effort fallback. Anything else is a [`VersionParseError`].

use std::{fmt::{Display, Formatter},
          str::FromStr};

/// A parsed `major.minor.patch` triple. Field order matters: the derived [Ord] compares
/// major first, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Which component of the triple failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum VersionComponent {
    Major,
    Minor,
    Patch,
}

#[derive(thiserror::Error, Debug, miette::Diagnostic, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("Version string is empty")]
    Empty,

    #[error("Version '{input}' has {found} dot separated component(s), at least 3 are required")]
    TooFewComponents { input: String, found: usize },

    #[error("Version '{input}' has a non numeric {position} component '{component}'")]
    InvalidComponent {
        input: String,
        component: String,
        position: VersionComponent,
    },
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(VersionParseError::Empty);
        }

        if is_compact_build_number(input) {
            // 3 or 4 digits: the last two are always the patch.
            let (minor, patch) = input.split_at(input.len() - 2);
            return Ok(Version {
                major: 0,
                minor: parse_component(input, minor, VersionComponent::Minor)?,
                patch: parse_component(input, patch, VersionComponent::Patch)?,
            });
        }

        let parts: Vec<&str> = input.split('.').collect();
        let [major, minor, patch, ..] = parts.as_slice() else {
            return Err(VersionParseError::TooFewComponents {
                input: input.to_string(),
                found: parts.len(),
            });
        };

        Ok(Version {
            major: parse_component(input, major, VersionComponent::Major)?,
            minor: parse_component(input, minor, VersionComponent::Minor)?,
            patch: parse_component(input, patch, VersionComponent::Patch)?,
        })
    }
}

fn is_compact_build_number(input: &str) -> bool {
    (3..=4).contains(&input.len()) && input.bytes().all(|b| b.is_ascii_digit())
}

fn parse_component(
    input: &str,
    component: &str,
    position: VersionComponent,
) -> Result<u32, VersionParseError> {
    component
        .parse::<u32>()
        .map_err(|_| VersionParseError::InvalidComponent {
            input: input.to_string(),
            component: component.to_string(),
            position,
        })
}
