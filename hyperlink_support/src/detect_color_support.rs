// Copyright (c) 2023-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Color support detection. Hyperlinks are only ever emitted on a stream that can render
//! color, so this is the base gate for
//! [`examine_to_determine_hyperlink_support`](crate::examine_to_determine_hyperlink_support).
//!
//! The hyperlink resolver only sees this module through [`ColorSupportProbe`], so tests
//! and embedding apps can swap in their own answer. The resolver hands its
//! [`EnvSnapshot`] to the collaborator, so `FORCE_COLOR` (and `CI`) are read from the same
//! snapshot as every other hyperlink variable.

use crate::{EnvSnapshot, EnvVar, Platform};
use std::{env, io::IsTerminal};

/// The stream to check for color (and hyperlink) support.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
    Stdin,
    /// Any other handle, eg: an open [`std::fs::File`]. Build it with
    /// [`Stream::from_handle`].
    Handle { is_terminal: bool },
}

impl Stream {
    #[must_use]
    pub fn from_handle(handle: &impl IsTerminal) -> Self {
        Stream::Handle {
            is_terminal: handle.is_terminal(),
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        match self {
            Stream::Stdout => std::io::stdout().is_terminal(),
            Stream::Stderr => std::io::stderr().is_terminal(),
            Stream::Stdin => std::io::stdin().is_terminal(),
            Stream::Handle { is_terminal } => is_terminal,
        }
    }
}

/// The result of the color support check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Truecolor,
    Ansi256,
    NoColor,
}

impl ColorSupport {
    #[must_use]
    pub fn is_supported(self) -> bool { self != ColorSupport::NoColor }
}

/// Answers "can this stream render ANSI color at all?". Implemented for any
/// `Fn(Stream, &EnvSnapshot) -> ColorSupport`, including
/// [`examine_env_vars_to_determine_color_support`] itself.
///
/// ```
/// use hyperlink_support::{ColorSupport, ColorSupportProbe, EnvSnapshot, Stream};
///
/// let always_truecolor = |_: Stream, _: &EnvSnapshot| ColorSupport::Truecolor;
/// assert!(
///     always_truecolor
///         .probe(Stream::Stdout, &EnvSnapshot::default())
///         .is_supported()
/// );
/// ```
pub trait ColorSupportProbe {
    fn probe(&self, stream: Stream, env: &EnvSnapshot) -> ColorSupport;
}

impl<F> ColorSupportProbe for F
where
    F: Fn(Stream, &EnvSnapshot) -> ColorSupport,
{
    fn probe(&self, stream: Stream, env: &EnvSnapshot) -> ColorSupport { self(stream, env) }
}

/// Determine whether color is supported heuristically, from the environment and whether
/// `stream` is attached to a terminal.
///
/// Any variable that `snapshot` holds (see [`EnvVar`]) is answered from the snapshot,
/// where an empty value counts as unset. Everything else comes from the live process
/// environment.
///
/// Environment variables checked:
/// - `FORCE_COLOR` - Wins over everything else when set (from the snapshot)
/// - `NO_COLOR` - Check for color disabling
/// - `TERM` - Terminal type detection
/// - `TERM_PROGRAM` - Specific terminal application detection (macOS, from the snapshot)
/// - `COLORTERM` - Modern color support indication
/// - `CLICOLOR` - Legacy color support flag
/// - `CI` - Build servers render color (from the snapshot)
/// - `IGNORE_IS_TERMINAL` - Override for non-TTY environments
#[must_use]
pub fn examine_env_vars_to_determine_color_support(
    stream: Stream,
    snapshot: &EnvSnapshot,
) -> ColorSupport {
    determine_color_support(
        helpers::snapshot_first_lookup(snapshot, |name| env::var(name).ok()),
        Platform::current(),
        stream.is_terminal(),
    )
}

/// The rules behind [`examine_env_vars_to_determine_color_support`], as a pure function
/// of an environment lookup, the platform, and the tty status of the stream.
#[must_use]
pub fn determine_color_support(
    lookup: impl Fn(&str) -> Option<String>,
    platform: Platform,
    is_a_tty: bool,
) -> ColorSupport {
    let is = |name: &str, expected: &str| lookup(name).is_some_and(|v| v == expected);
    let is_set_and_not_zero = |name: &str| lookup(name).is_some_and(|v| v != "0");

    if let Some(force_color) = lookup("FORCE_COLOR") {
        return helpers::parse_force_color(&force_color);
    }

    if is_set_and_not_zero("NO_COLOR")
        || is("TERM", "dumb")
        || !(is_a_tty || is_set_and_not_zero("IGNORE_IS_TERMINAL"))
    {
        return ColorSupport::NoColor;
    }

    if platform == Platform::MacOs {
        if is("TERM_PROGRAM", "Apple_Terminal")
            && lookup("TERM").is_some_and(|term| helpers::check_256_color(&term))
        {
            return ColorSupport::Ansi256;
        }

        if is("TERM_PROGRAM", "iTerm.app") || is("COLORTERM", "truecolor") {
            return ColorSupport::Truecolor;
        }
    }

    if platform == Platform::Linux && is("COLORTERM", "truecolor") {
        return ColorSupport::Truecolor;
    }

    if platform == Platform::Windows {
        return ColorSupport::Truecolor;
    }

    if lookup("COLORTERM").is_some()
        || lookup("TERM").is_some_and(|term| helpers::check_ansi_color(&term))
        || is_set_and_not_zero("CLICOLOR")
        || lookup("CI").is_some_and(|v| !v.is_empty())
        || is_ci::uncached()
    {
        return ColorSupport::Truecolor;
    }

    ColorSupport::NoColor
}

mod helpers {
    use super::{ColorSupport, EnvSnapshot, EnvVar};

    /// Serve [`EnvVar`] names from `snapshot` and anything else from `fallback`.
    pub fn snapshot_first_lookup<'a>(
        snapshot: &'a EnvSnapshot,
        fallback: impl Fn(&str) -> Option<String> + 'a,
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| match name.parse::<EnvVar>() {
            Ok(key) => snapshot.is_set(key).then(|| snapshot.get(key).to_string()),
            Err(_) => fallback(name),
        }
    }

    /// `FORCE_COLOR` follows the `supports-color` convention: `0` or `false` turn color
    /// off, `3` asks for truecolor, any other value (even empty) forces color on.
    pub fn parse_force_color(value: &str) -> ColorSupport {
        match value {
            "0" | "false" => ColorSupport::NoColor,
            "3" => ColorSupport::Truecolor,
            _ => ColorSupport::Ansi256,
        }
    }

    pub fn check_256_color(term: &str) -> bool {
        term.ends_with("256") || term.ends_with("256color")
    }

    pub fn check_ansi_color(term: &str) -> bool {
        term.starts_with("screen")
            || term.starts_with("vscode")
            || term.starts_with("xterm")
            || term.starts_with("vt100")
            || term.starts_with("vt220")
            || term.starts_with("rxvt")
            || term.contains("color")
            || term.contains("ansi")
            || term.contains("cygwin")
            || term.contains("linux")
    }
}
