// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Terminal Hyperlink (OSC 8) Support Detection
//!
//! Decide whether a stream is attached to a terminal that renders clickable hyperlinks.
//! This does not emit any escape sequences, it only answers yes or no so that the
//! formatting code can choose between a hyperlink and plain text.
//!
//! ## Rule chain
//!
//! [`explain`] walks these rules in order and the first one that matches decides (see
//! [`Rule`]):
//!
//! 1. `--no-hyperlink(s)` was passed → no.
//! 2. `--hyperlink(s)` was passed → yes.
//! 3. Windows → no (for now).
//! 4. `FORCE_HYPERLINK` is set → yes iff it is the integer `1`.
//! 5. The stream can't render color → no.
//! 6. `NETLIFY` is set → yes. This runs before the generic `CI` check.
//! 7. `CI` is set → no.
//! 8. `TEAMCITY_VERSION` is set → no.
//! 9. `TERM_PROGRAM` is set → iTerm 3.x needs minor ≥ 1, anything else needs
//!    major > 3.
//! 10. `VTE_VERSION` is set → `0.50.0` is broken, otherwise ≥ 0.50.
//! 11. Otherwise → no.
//!
//! ## Two ways to call it
//!
//! - Pure: build a [`HyperlinkConfig`] once and pass it with a [`ColorSupportProbe`] to
//!   [`examine_to_determine_hyperlink_support`] or [`explain`]. Nothing global is read.
//! - Process wide: [`global_hyperlink_support::stdout`] and
//!   [`global_hyperlink_support::stderr`] capture the config from the process and memoize
//!   the answer per stream. Changing env vars after the first call has no effect.

use crate::{ColorSupportProbe, EnvSnapshot, EnvVar, HyperlinkResult,
            HyperlinkSupportError, OverrideFlags, Platform, Stream, Version};

const ITERM_PROGRAM: &str = "iTerm.app";
const BROKEN_VTE_VERSION: &str = "0.50.0";

/// Represents hyperlink (OSC 8) support in the terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HyperlinkSupport {
    NotSupported,
    Supported,
}

impl HyperlinkSupport {
    #[must_use]
    pub fn is_supported(self) -> bool { self == HyperlinkSupport::Supported }
}

impl From<bool> for HyperlinkSupport {
    fn from(value: bool) -> Self {
        if value {
            HyperlinkSupport::Supported
        } else {
            HyperlinkSupport::NotSupported
        }
    }
}

impl From<HyperlinkSupport> for bool {
    fn from(value: HyperlinkSupport) -> Self { value.is_supported() }
}

/// Everything the rule chain reads, captured once by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperlinkConfig {
    pub env: EnvSnapshot,
    pub flags: OverrideFlags,
    pub platform: Platform,
}

impl HyperlinkConfig {
    #[must_use]
    pub fn new(env: EnvSnapshot, flags: OverrideFlags, platform: Platform) -> Self {
        Self {
            env,
            flags,
            platform,
        }
    }

    /// Capture the process environment, the process arguments and the current platform.
    #[must_use]
    pub fn from_process() -> Self {
        Self::new(
            EnvSnapshot::capture(),
            OverrideFlags::from_process_args(),
            Platform::current(),
        )
    }
}

/// The rule in the chain that produced a [`Verdict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Rule {
    DisableFlag,
    EnableFlag,
    WindowsPlatform,
    ForceHyperlinkEnvVar,
    NoColorSupport,
    Netlify,
    Ci,
    Teamcity,
    TermProgramVersion,
    VteVersion,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub support: HyperlinkSupport,
    pub rule: Rule,
}

impl Verdict {
    fn new(support: impl Into<HyperlinkSupport>, rule: Rule) -> Self {
        Self {
            support: support.into(),
            rule,
        }
    }
}

/// Run the rule chain and report which rule decided. See the [module docs](self) for
/// the rules.
///
/// # Errors
///
/// - [`HyperlinkSupportError::InvalidForceHyperlink`] if `FORCE_HYPERLINK` is set but
///   is not an integer.
/// - [`HyperlinkSupportError::InvalidVersion`] if the version variable consulted by the
///   deciding rule can't be parsed.
pub fn explain(
    config: &HyperlinkConfig,
    stream: Stream,
    color_support: &impl ColorSupportProbe,
) -> HyperlinkResult<Verdict> {
    let env = &config.env;

    if config.flags.force_disable {
        return Ok(Verdict::new(false, Rule::DisableFlag));
    }

    if config.flags.force_enable {
        return Ok(Verdict::new(true, Rule::EnableFlag));
    }

    if config.platform == Platform::Windows {
        return Ok(Verdict::new(false, Rule::WindowsPlatform));
    }

    if env.is_set(EnvVar::ForceHyperlink) {
        let forced = parse_force_hyperlink(&env.force_hyperlink)?;
        return Ok(Verdict::new(forced == 1, Rule::ForceHyperlinkEnvVar));
    }

    if !color_support.probe(stream, env).is_supported() {
        return Ok(Verdict::new(false, Rule::NoColorSupport));
    }

    if env.is_set(EnvVar::Netlify) {
        return Ok(Verdict::new(true, Rule::Netlify));
    }

    if env.is_set(EnvVar::Ci) {
        return Ok(Verdict::new(false, Rule::Ci));
    }

    if env.is_set(EnvVar::TeamcityVersion) {
        return Ok(Verdict::new(false, Rule::Teamcity));
    }

    if env.is_set(EnvVar::TermProgram) {
        let version = parse_version(env, EnvVar::TermProgramVersion)?;
        let supported = if env.term_program == ITERM_PROGRAM && version.major == 3 {
            version.minor >= 1
        } else {
            version.major > 3
        };
        return Ok(Verdict::new(supported, Rule::TermProgramVersion));
    }

    if env.is_set(EnvVar::VteVersion) {
        if env.vte_version == BROKEN_VTE_VERSION {
            return Ok(Verdict::new(false, Rule::VteVersion));
        }
        let version = parse_version(env, EnvVar::VteVersion)?;
        let supported = version.major > 0 || version.minor >= 50;
        return Ok(Verdict::new(supported, Rule::VteVersion));
    }

    Ok(Verdict::new(false, Rule::Default))
}

/// Run the rule chain for `stream` and log the deciding rule.
///
/// ```
/// use hyperlink_support::{ColorSupport, EnvSnapshot, EnvVar, HyperlinkConfig,
///                         HyperlinkSupport, OverrideFlags, Platform, Stream,
///                         examine_to_determine_hyperlink_support};
///
/// let config = HyperlinkConfig::new(
///     EnvSnapshot::from_pairs([
///         (EnvVar::TermProgram, "iTerm.app"),
///         (EnvVar::TermProgramVersion, "3.1.0"),
///     ]),
///     OverrideFlags::none(),
///     Platform::MacOs,
/// );
/// let color_support = |_: Stream, _: &EnvSnapshot| ColorSupport::Truecolor;
/// assert_eq!(
///     examine_to_determine_hyperlink_support(&config, Stream::Stdout, &color_support),
///     Ok(HyperlinkSupport::Supported)
/// );
/// ```
///
/// # Errors
///
/// Same as [`explain`].
pub fn examine_to_determine_hyperlink_support(
    config: &HyperlinkConfig,
    stream: Stream,
    color_support: &impl ColorSupportProbe,
) -> HyperlinkResult<HyperlinkSupport> {
    match explain(config, stream, color_support) {
        Ok(verdict) => {
            tracing::debug!(
                message = "Hyperlink support resolved",
                stream = ?stream,
                rule = %verdict.rule,
                supported = verdict.support.is_supported()
            );
            Ok(verdict.support)
        }
        Err(error) => {
            tracing::warn!(
                message = "Could not resolve hyperlink support",
                stream = ?stream,
                error = %error
            );
            Err(error)
        }
    }
}

fn parse_force_hyperlink(value: &str) -> HyperlinkResult<i64> {
    value
        .parse::<i64>()
        .map_err(|_| HyperlinkSupportError::InvalidForceHyperlink {
            value: value.to_string(),
        })
}

fn parse_version(env: &EnvSnapshot, key: EnvVar) -> HyperlinkResult<Version> {
    let value = env.get(key);
    value
        .parse::<Version>()
        .map_err(|source| HyperlinkSupportError::InvalidVersion {
            env_var: key,
            value: value.to_string(),
            source,
        })
}

/// Process wide hyperlink support, memoized for stdout and stderr.
///
/// The first successful call for a stream captures [`HyperlinkConfig::from_process`],
/// runs the rule chain with
/// [`examine_env_vars_to_determine_color_support`](crate::examine_env_vars_to_determine_color_support),
/// and caches the answer for the rest of the process. Errors are not cached.
///
/// # Testing support
///
/// [`set_override`] wins over the cache and detection. Tests that call [`set_override`],
/// [`clear_override`], or [`clear_cache`] must be annotated with `#[serial]` from the
/// [serial_test](https://crates.io/crates/serial_test) crate.
pub mod global_hyperlink_support {
    use super::{HyperlinkConfig, HyperlinkResult, HyperlinkSupport, Stream,
                examine_to_determine_hyperlink_support};
    use crate::examine_env_vars_to_determine_color_support;
    use std::{io::IsTerminal,
              sync::atomic::{AtomicI8, Ordering}};

    static HYPERLINK_SUPPORT_GLOBAL: AtomicI8 = AtomicI8::new(NOT_SET_VALUE);
    static STDOUT_CACHED: AtomicI8 = AtomicI8::new(NOT_SET_VALUE);
    static STDERR_CACHED: AtomicI8 = AtomicI8::new(NOT_SET_VALUE);

    const NOT_SET_VALUE: i8 = -1;

    /// Does stdout support hyperlinks? Memoized.
    ///
    /// # Errors
    ///
    /// See [`super::explain`].
    pub fn stdout() -> HyperlinkResult<bool> { detect_cached(Stream::Stdout, &STDOUT_CACHED) }

    /// Does stderr support hyperlinks? Memoized.
    ///
    /// # Errors
    ///
    /// See [`super::explain`].
    pub fn stderr() -> HyperlinkResult<bool> { detect_cached(Stream::Stderr, &STDERR_CACHED) }

    /// Does the terminal behind `handle` support hyperlinks? Evaluated on every call.
    /// Works for [`std::io::stdin`] too, in which case the question is about the
    /// terminal stdin is attached to.
    ///
    /// # Errors
    ///
    /// See [`super::explain`].
    pub fn on(handle: &impl IsTerminal) -> HyperlinkResult<bool> {
        if let Ok(it) = try_get_override() {
            return Ok(it.is_supported());
        }
        let support = examine_to_determine_hyperlink_support(
            &HyperlinkConfig::from_process(),
            Stream::from_handle(handle),
            &examine_env_vars_to_determine_color_support,
        )?;
        Ok(support.is_supported())
    }

    fn detect_cached(stream: Stream, cache: &AtomicI8) -> HyperlinkResult<bool> {
        if let Ok(it) = try_get_override() {
            return Ok(it.is_supported());
        }

        if let Ok(it) = HyperlinkSupport::try_from(cache.load(Ordering::Acquire)) {
            return Ok(it.is_supported());
        }

        let detected = examine_to_determine_hyperlink_support(
            &HyperlinkConfig::from_process(),
            stream,
            &examine_env_vars_to_determine_color_support,
        )?;

        // Another thread may have won the race, in which case its answer is kept.
        let winner = match cache.compare_exchange(
            NOT_SET_VALUE,
            i8::from(detected),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => detected,
            Err(existing) => HyperlinkSupport::try_from(existing).unwrap_or(detected),
        };
        Ok(winner.is_supported())
    }

    /// Force the answer of [`stdout`], [`stderr`] and [`on`], regardless of environment
    /// and arguments.
    pub fn set_override(value: HyperlinkSupport) {
        HYPERLINK_SUPPORT_GLOBAL.store(i8::from(value), Ordering::Release);
    }

    pub fn clear_override() { HYPERLINK_SUPPORT_GLOBAL.store(NOT_SET_VALUE, Ordering::Release); }

    /// Forget the memoized stdout and stderr answers, forcing re-detection on the next
    /// call.
    pub fn clear_cache() {
        STDOUT_CACHED.store(NOT_SET_VALUE, Ordering::Release);
        STDERR_CACHED.store(NOT_SET_VALUE, Ordering::Release);
    }

    /// # Errors
    ///
    /// Returns `Err(())` if no override value has been set.
    #[allow(clippy::result_unit_err)]
    pub fn try_get_override() -> Result<HyperlinkSupport, ()> {
        HyperlinkSupport::try_from(HYPERLINK_SUPPORT_GLOBAL.load(Ordering::Acquire))
    }

    /// # Errors
    ///
    /// Returns `Err(())` if `stream` has not been detected yet, or is not memoized
    /// (only stdout and stderr are).
    #[allow(clippy::result_unit_err)]
    pub fn try_get_cached(stream: Stream) -> Result<HyperlinkSupport, ()> {
        let cache = match stream {
            Stream::Stdout => &STDOUT_CACHED,
            Stream::Stderr => &STDERR_CACHED,
            Stream::Stdin | Stream::Handle { .. } => return Err(()),
        };
        HyperlinkSupport::try_from(cache.load(Ordering::Acquire))
    }
}

/// These trait implementations allow us to use `HyperlinkSupport` and `i8`
/// interchangeably.
mod convert_between_hyperlink_and_i8 {
    impl TryFrom<i8> for super::HyperlinkSupport {
        type Error = ();

        #[rustfmt::skip]
        fn try_from(value: i8) -> Result<Self, Self::Error> {
            match value {
                0 => Ok(super::HyperlinkSupport::NotSupported),
                1 => Ok(super::HyperlinkSupport::Supported),
                _ => Err(()),
            }
        }
    }

    impl From<super::HyperlinkSupport> for i8 {
        #[rustfmt::skip]
        fn from(hyperlink_support: super::HyperlinkSupport) -> Self {
            match hyperlink_support {
                super::HyperlinkSupport::NotSupported => 0,
                super::HyperlinkSupport::Supported => 1,
            }
        }
    }
}
