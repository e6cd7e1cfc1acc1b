// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::env;
use strum::IntoEnumIterator;

/// The environment variables that hyperlink support detection looks at. The string form
/// of each variant (via [`AsRef<str>`] or [Display](std::fmt::Display)) is the exact
/// variable name, and [`str::parse`] goes the other way.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
    strum_macros::EnumCount,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvVar {
    TermProgram,
    TermProgramVersion,
    TeamcityVersion,
    ForceHyperlink,
    ForceColor,
    VteVersion,
    Netlify,
    Ci,
}

/// Immutable copy of every [`EnvVar`], taken once. A variable that is unset, or whose
/// value is not valid Unicode, reads as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvSnapshot {
    pub term_program: String,
    pub term_program_version: String,
    pub teamcity_version: String,
    pub force_hyperlink: String,
    pub force_color: String,
    pub vte_version: String,
    pub netlify: String,
    pub ci: String,
}

impl EnvSnapshot {
    /// Read every [`EnvVar`] from the current process environment.
    #[must_use]
    pub fn capture() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a snapshot from explicit values. Variables not listed are empty.
    ///
    /// ```
    /// use hyperlink_support::{EnvSnapshot, EnvVar};
    ///
    /// let snapshot = EnvSnapshot::from_pairs([
    ///     (EnvVar::TermProgram, "iTerm.app"),
    ///     (EnvVar::TermProgramVersion, "3.1.0"),
    /// ]);
    /// assert_eq!(snapshot.get(EnvVar::TermProgram), "iTerm.app");
    /// assert_eq!(snapshot.get(EnvVar::Ci), "");
    /// ```
    #[must_use]
    pub fn from_pairs<S: AsRef<str>>(pairs: impl IntoIterator<Item = (EnvVar, S)>) -> Self {
        let mut it = Self::default();
        for (key, value) in pairs {
            *it.get_mut(key) = value.as_ref().to_string();
        }
        it
    }

    /// Build a snapshot by asking `lookup` for each variable name.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut it = Self::default();
        for key in EnvVar::iter() {
            if let Some(value) = lookup(key.as_ref()) {
                *it.get_mut(key) = value;
            }
        }
        it
    }

    #[must_use]
    pub fn get(&self, key: EnvVar) -> &str {
        match key {
            EnvVar::TermProgram => &self.term_program,
            EnvVar::TermProgramVersion => &self.term_program_version,
            EnvVar::TeamcityVersion => &self.teamcity_version,
            EnvVar::ForceHyperlink => &self.force_hyperlink,
            EnvVar::ForceColor => &self.force_color,
            EnvVar::VteVersion => &self.vte_version,
            EnvVar::Netlify => &self.netlify,
            EnvVar::Ci => &self.ci,
        }
    }

    /// `true` when the variable holds a non empty value.
    #[must_use]
    pub fn is_set(&self, key: EnvVar) -> bool { !self.get(key).is_empty() }

    fn get_mut(&mut self, key: EnvVar) -> &mut String {
        match key {
            EnvVar::TermProgram => &mut self.term_program,
            EnvVar::TermProgramVersion => &mut self.term_program_version,
            EnvVar::TeamcityVersion => &mut self.teamcity_version,
            EnvVar::ForceHyperlink => &mut self.force_hyperlink,
            EnvVar::ForceColor => &mut self.force_color,
            EnvVar::VteVersion => &mut self.vte_version,
            EnvVar::Netlify => &mut self.netlify,
            EnvVar::Ci => &mut self.ci,
        }
    }
}
