// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Command line overrides for hyperlink support detection.
//!
//! | Flag                                | Effect               |
//! |-------------------------------------|----------------------|
//! | `--hyperlink`, `--hyperlinks`       | Force hyperlinks on  |
//! | `--no-hyperlink`, `--no-hyperlinks` | Force hyperlinks off |
//!
//! Only the presence of a flag matters, any value attached to it is ignored. When both
//! are present, disable wins.
//!
//! There are two ways to get an [`OverrideFlags`]:
//! 1. Apps that already use [clap] flatten [`HyperlinkArgs`] into their own parser and
//!    convert it with [From].
//! 2. Everyone else calls [`OverrideFlags::from_args`] on [`std::env::args`]. This does not
//!    touch any global parser state, so it can be called any number of times.

use clap::{ArgAction, Args};

const ENABLE_NAMES: [&str; 2] = ["hyperlink", "hyperlinks"];
const DISABLE_NAMES: [&str; 2] = ["no-hyperlink", "no-hyperlinks"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverrideFlags {
    pub force_enable: bool,
    pub force_disable: bool,
}

impl OverrideFlags {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            force_enable: false,
            force_disable: false,
        }
    }

    #[must_use]
    pub const fn enable() -> Self {
        Self {
            force_enable: true,
            force_disable: false,
        }
    }

    #[must_use]
    pub const fn disable() -> Self {
        Self {
            force_enable: false,
            force_disable: true,
        }
    }

    /// Scan a full argument list (`argv[0]` included) for the override flags.
    ///
    /// - `-name`, `--name` and `--name=value` are all accepted, like Go's `flag` package.
    /// - Scanning stops at a bare `--`, everything after it is positional.
    /// - Other arguments are skipped, so this can run alongside any other parser.
    ///
    /// ```
    /// use hyperlink_support::OverrideFlags;
    ///
    /// let flags = OverrideFlags::from_args(["my_app", "--hyperlinks", "-v"]);
    /// assert_eq!(flags, OverrideFlags::enable());
    /// ```
    #[must_use]
    pub fn from_args<S: AsRef<str>>(args: impl IntoIterator<Item = S>) -> Self {
        let mut it = Self::none();
        for arg in args.into_iter().skip(1) {
            let arg = arg.as_ref();
            if arg == "--" {
                break;
            }
            match flag_name(arg) {
                Some(name) if ENABLE_NAMES.contains(&name) => it.force_enable = true,
                Some(name) if DISABLE_NAMES.contains(&name) => it.force_disable = true,
                _ => {}
            }
        }
        it
    }

    /// Read the flags from the arguments this process was started with.
    #[must_use]
    pub fn from_process_args() -> Self { Self::from_args(std::env::args_os().map(lossy)) }
}

fn lossy(arg: std::ffi::OsString) -> String { arg.to_string_lossy().into_owned() }

/// Strip one or two leading dashes and any `=value` suffix. Returns [None] for
/// arguments that are not flags.
fn flag_name(arg: &str) -> Option<&str> {
    let name = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))?;
    let name = name.split_once('=').map_or(name, |(name, _value)| name);
    if name.is_empty() || name.starts_with('-') {
        return None;
    }
    Some(name)
}

/// Override flags to `#[command(flatten)]` into a [clap] parser.
///
/// ```
/// use clap::Parser;
/// use hyperlink_support::{HyperlinkArgs, OverrideFlags};
///
/// #[derive(Debug, Parser)]
/// struct CLIArg {
///     #[command(flatten)]
///     hyperlink_options: HyperlinkArgs,
/// }
///
/// let cli_arg = CLIArg::parse_from(["my_app", "--no-hyperlinks"]);
/// assert_eq!(OverrideFlags::from(cli_arg.hyperlink_options), OverrideFlags::disable());
/// ```
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct HyperlinkArgs {
    #[arg(
        global = true,
        long = "hyperlink",
        visible_alias = "hyperlinks",
        action = ArgAction::Count,
        help = "Force clickable hyperlinks on, regardless of terminal detection"
    )]
    pub enable_hyperlinks: u8,

    #[arg(
        global = true,
        long = "no-hyperlink",
        visible_alias = "no-hyperlinks",
        action = ArgAction::Count,
        help = "Force clickable hyperlinks off, this wins over --hyperlink"
    )]
    pub disable_hyperlinks: u8,
}

impl From<HyperlinkArgs> for OverrideFlags {
    fn from(args: HyperlinkArgs) -> Self {
        Self {
            force_enable: args.enable_hyperlinks > 0,
            force_disable: args.disable_hyperlinks > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[derive(Debug, Parser)]
    struct TestCLIArg {
        #[command(flatten)]
        hyperlink_options: HyperlinkArgs,

        #[allow(dead_code)]
        #[arg(long, short = 'v')]
        verbose: bool,
    }

    #[test_case(&["app"], OverrideFlags::none() ; "no flags")]
    #[test_case(&["app", "--hyperlink"], OverrideFlags::enable() ; "enable")]
    #[test_case(&["app", "--hyperlinks"], OverrideFlags::enable() ; "enable plural")]
    #[test_case(&["app", "-hyperlink"], OverrideFlags::enable() ; "single dash")]
    #[test_case(&["app", "--hyperlink=false"], OverrideFlags::enable() ; "value is ignored")]
    #[test_case(&["app", "--no-hyperlink"], OverrideFlags::disable() ; "disable")]
    #[test_case(&["app", "--no-hyperlinks"], OverrideFlags::disable() ; "disable plural")]
    #[test_case(&["app", "file.txt", "--no-hyperlinks"], OverrideFlags::disable() ; "after positional")]
    #[test_case(&["app", "--", "--hyperlink"], OverrideFlags::none() ; "after terminator")]
    #[test_case(&["--hyperlink"], OverrideFlags::none() ; "argv zero is skipped")]
    #[test_case(&["app", "---hyperlink"], OverrideFlags::none() ; "three dashes")]
    #[test_case(&["app", "--hyperlinkz"], OverrideFlags::none() ; "unknown flag")]
    fn from_args(args: &[&str], expected: OverrideFlags) {
        assert_eq!(OverrideFlags::from_args(args), expected);
    }

    #[test]
    fn from_args_both_present() {
        let flags = OverrideFlags::from_args(["app", "--hyperlink", "--no-hyperlinks"]);
        assert_eq!(
            flags,
            OverrideFlags {
                force_enable: true,
                force_disable: true,
            }
        );
    }

    #[test]
    fn from_args_is_repeatable() {
        let args = vec!["app".to_string(), "--hyperlinks".to_string()];
        let first = OverrideFlags::from_args(&args);
        let second = OverrideFlags::from_args(&args);
        assert_eq!(first, second);
    }

    #[test_case(&["app"], OverrideFlags::none() ; "no flags")]
    #[test_case(&["app", "--hyperlinks"], OverrideFlags::enable() ; "alias")]
    #[test_case(&["app", "--hyperlink", "--hyperlinks"], OverrideFlags::enable() ; "repeated")]
    #[test_case(&["app", "-v", "--no-hyperlink"], OverrideFlags::disable() ; "mixed with other args")]
    #[test_case(
        &["app", "--hyperlink", "--no-hyperlinks"],
        OverrideFlags { force_enable: true, force_disable: true } ;
        "both"
    )]
    fn clap_args(args: &[&str], expected: OverrideFlags) {
        let cli_arg = TestCLIArg::parse_from(args);
        assert_eq!(OverrideFlags::from(cli_arg.hyperlink_options), expected);
    }
}
