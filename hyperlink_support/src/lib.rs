// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # hyperlink_support
//!
//! Is this stream attached to a terminal that renders clickable hyperlinks (OSC 8)?
//!
//! ```no_run
//! use hyperlink_support::global_hyperlink_support;
//!
//! fn main() -> miette::Result<()> {
//!     if global_hyperlink_support::stdout()? {
//!         println!("\x1b]8;;https://r3bl.com\x1b\\R3BL\x1b]8;;\x1b\\");
//!     } else {
//!         println!("R3BL (https://r3bl.com)");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The answer comes from a fixed chain of rules over:
//! - Command line overrides: `--hyperlink(s)` and `--no-hyperlink(s)`
//!   ([`OverrideFlags`], [`HyperlinkArgs`]).
//! - Environment variables: `FORCE_HYPERLINK`, `NETLIFY`, `CI`, `TEAMCITY_VERSION`,
//!   `TERM_PROGRAM`, `TERM_PROGRAM_VERSION`, `VTE_VERSION` ([`EnvSnapshot`]).
//! - Whether the stream can render color at all ([`ColorSupportProbe`]).
//!
//! See [`detect_hyperlink_support`] for the rules in order.
//!
//! Malformed `FORCE_HYPERLINK` or version values are reported as a
//! [`HyperlinkSupportError`], never silently treated as "not supported".

// Enforce strict error handling in production code. Tests can use unwrap().
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod detect_color_support;
pub mod detect_hyperlink_support;
pub mod env_snapshot;
pub mod error;
pub mod override_flags;
pub mod platform;
pub mod version;

// Re-export.
pub use detect_color_support::*;
pub use detect_hyperlink_support::*;
pub use env_snapshot::*;
pub use error::*;
pub use override_flags::*;
pub use platform::*;
pub use version::*;
