// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::env;

/// The operating system family, as far as terminal capability detection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    #[must_use]
    pub fn current() -> Self { Self::from_os(env::consts::OS) }

    /// Map a [`std::env::consts::OS`] value to a [`Platform`].
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            _ => Platform::Other,
        }
    }
}
