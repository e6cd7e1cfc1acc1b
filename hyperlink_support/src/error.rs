// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Errors that stop a hyperlink support evaluation. None of these are retryable: they
//! all come from environment values that were already malformed when captured.

use crate::{EnvVar, VersionParseError};

/// Convenience alias used by every fallible function in this crate.
pub type HyperlinkResult<T> = Result<T, HyperlinkSupportError>;

#[derive(thiserror::Error, Debug, miette::Diagnostic, PartialEq, Eq)]
pub enum HyperlinkSupportError {
    #[error("🔗 FORCE_HYPERLINK must be an integer, got '{value}'")]
    #[diagnostic(
        code(hyperlink_support::invalid_force_hyperlink),
        help("Set FORCE_HYPERLINK=1 to force hyperlinks on, or FORCE_HYPERLINK=0 to force them off")
    )]
    InvalidForceHyperlink { value: String },

    #[error("🏷️ Could not parse version '{value}' from {env_var}")]
    #[diagnostic(
        code(hyperlink_support::invalid_version),
        help("Expected a dotted version like 3.1.0, or a 3 to 4 digit build number like 5002")
    )]
    InvalidVersion {
        env_var: EnvVar,
        value: String,
        #[source]
        source: VersionParseError,
    },
}
