// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use hyperlink_support::{ColorSupport, EnvSnapshot, EnvVar, HyperlinkConfig,
                        HyperlinkSupport, HyperlinkSupportError, OverrideFlags, Platform,
                        Rule, Stream, Verdict, examine_to_determine_hyperlink_support,
                        explain};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn truecolor(_: Stream, _: &EnvSnapshot) -> ColorSupport { ColorSupport::Truecolor }

fn no_color(_: Stream, _: &EnvSnapshot) -> ColorSupport { ColorSupport::NoColor }

fn config(pairs: &[(EnvVar, &str)], flags: OverrideFlags) -> HyperlinkConfig {
    HyperlinkConfig::new(
        EnvSnapshot::from_pairs(pairs.iter().copied()),
        flags,
        Platform::MacOs,
    )
}

fn supports(config: &HyperlinkConfig) -> bool {
    examine_to_determine_hyperlink_support(config, Stream::Stdout, &truecolor)
        .unwrap()
        .is_supported()
}

#[test_case(&[] ; "nothing else")]
#[test_case(&[(EnvVar::TermProgram, "iTerm.app"), (EnvVar::TermProgramVersion, "3.1.0")] ; "good iterm")]
#[test_case(&[(EnvVar::VteVersion, "0.60.0")] ; "good vte")]
#[test_case(&[(EnvVar::TeamcityVersion, "2023.11")] ; "teamcity")]
fn ci_without_netlify_is_never_supported(extra: &[(EnvVar, &str)]) {
    let mut pairs = vec![(EnvVar::Ci, "true")];
    pairs.extend_from_slice(extra);
    let config = config(&pairs, OverrideFlags::none());
    assert_eq!(
        explain(&config, Stream::Stdout, &truecolor),
        Ok(Verdict {
            support: HyperlinkSupport::NotSupported,
            rule: Rule::Ci,
        })
    );
}

/// TeamCity does not export `CI`, so it needs its own exclusion. It runs before the
/// terminal version checks.
#[test_case(&[] ; "nothing else")]
#[test_case(&[(EnvVar::VteVersion, "0.60.0")] ; "good vte")]
#[test_case(&[(EnvVar::TermProgram, "iTerm.app"), (EnvVar::TermProgramVersion, "3.1.0")] ; "good iterm")]
fn teamcity_without_ci_is_never_supported(extra: &[(EnvVar, &str)]) {
    let mut pairs = vec![(EnvVar::TeamcityVersion, "2023.11")];
    pairs.extend_from_slice(extra);
    let config = config(&pairs, OverrideFlags::none());
    assert_eq!(
        explain(&config, Stream::Stdout, &truecolor),
        Ok(Verdict {
            support: HyperlinkSupport::NotSupported,
            rule: Rule::Teamcity,
        })
    );
}

#[test]
fn netlify_runs_before_ci() {
    let config = config(
        &[(EnvVar::Netlify, "true"), (EnvVar::Ci, "true")],
        OverrideFlags::none(),
    );
    assert!(supports(&config));
}

#[test]
fn disable_flag_wins_over_enable_flag() {
    let both = OverrideFlags::from_args(["app", "--hyperlinks", "--no-hyperlink"]);
    let config = config(&[(EnvVar::ForceHyperlink, "1")], both);
    assert_eq!(
        explain(&config, Stream::Stdout, &truecolor),
        Ok(Verdict {
            support: HyperlinkSupport::NotSupported,
            rule: Rule::DisableFlag,
        })
    );
}

#[test]
fn enable_flag_skips_malformed_env() {
    let config = config(&[(EnvVar::ForceHyperlink, "yes")], OverrideFlags::enable());
    assert!(supports(&config));
}

#[test_case("3.1.0", true)]
#[test_case("3.0.9", false)]
fn iterm(version: &str, expected: bool) {
    let config = config(
        &[
            (EnvVar::TermProgram, "iTerm.app"),
            (EnvVar::TermProgramVersion, version),
        ],
        OverrideFlags::none(),
    );
    assert_eq!(supports(&config), expected);
}

#[test]
fn iterm_version_with_one_component_is_an_error() {
    let config = config(
        &[
            (EnvVar::TermProgram, "iTerm.app"),
            (EnvVar::TermProgramVersion, "3"),
        ],
        OverrideFlags::none(),
    );
    let result = examine_to_determine_hyperlink_support(&config, Stream::Stdout, &truecolor);
    assert!(matches!(
        result,
        Err(HyperlinkSupportError::InvalidVersion {
            env_var: EnvVar::TermProgramVersion,
            ..
        })
    ));
}

/// Other programs need a major version strictly greater than 3. Major 3 alone is not
/// enough, even though an older rule accepted it.
#[test_case("3.0.0", false)]
#[test_case("3.9.9", false)]
#[test_case("4.0.0", true)]
fn non_iterm_needs_major_above_three(version: &str, expected: bool) {
    let config = config(
        &[
            (EnvVar::TermProgram, "Hyper"),
            (EnvVar::TermProgramVersion, version),
        ],
        OverrideFlags::none(),
    );
    assert_eq!(supports(&config), expected);
}

#[test_case("0.50.0", false ; "known broken release")]
#[test_case("0.48.3", false ; "too old")]
#[test_case("0.50.1", true ; "fixed release")]
fn vte(version: &str, expected: bool) {
    let config = config(&[(EnvVar::VteVersion, version)], OverrideFlags::none());
    assert_eq!(supports(&config), expected);
}

#[test]
fn force_hyperlink_one_beats_missing_color() {
    let config = config(&[(EnvVar::ForceHyperlink, "1")], OverrideFlags::none());
    assert_eq!(
        examine_to_determine_hyperlink_support(&config, Stream::Stderr, &no_color),
        Ok(HyperlinkSupport::Supported)
    );
}

#[test]
fn force_hyperlink_zero() {
    let config = config(&[(EnvVar::ForceHyperlink, "0")], OverrideFlags::none());
    assert!(!supports(&config));
}

#[test]
fn force_hyperlink_yes_is_an_error() {
    let config = config(&[(EnvVar::ForceHyperlink, "yes")], OverrideFlags::none());
    let error = examine_to_determine_hyperlink_support(&config, Stream::Stdout, &truecolor)
        .unwrap_err();
    assert_eq!(
        error,
        HyperlinkSupportError::InvalidForceHyperlink {
            value: "yes".into()
        }
    );
    assert!(error.to_string().contains("FORCE_HYPERLINK"));
    assert!(error.to_string().contains("yes"));
}

#[test]
fn no_color_means_no_hyperlinks() {
    let config = config(
        &[(EnvVar::VteVersion, "0.60.0"), (EnvVar::Netlify, "1")],
        OverrideFlags::none(),
    );
    assert_eq!(
        examine_to_determine_hyperlink_support(&config, Stream::Stdout, &no_color),
        Ok(HyperlinkSupport::NotSupported)
    );
}

#[test]
fn falls_through_to_default() {
    let config = config(&[(EnvVar::ForceColor, "3")], OverrideFlags::none());
    assert_eq!(
        explain(&config, Stream::Stdout, &truecolor),
        Ok(Verdict {
            support: HyperlinkSupport::NotSupported,
            rule: Rule::Default,
        })
    );
}

#[test]
fn same_config_same_answer() {
    let config = config(
        &[
            (EnvVar::TermProgram, "iTerm.app"),
            (EnvVar::TermProgramVersion, "3.4.19"),
        ],
        OverrideFlags::from_args(["app"]),
    );
    let first = explain(&config, Stream::Stdout, &truecolor);
    let second = explain(&config, Stream::Stdout, &truecolor);
    assert_eq!(first, second);
}

#[test]
fn any_handle_can_be_checked() {
    let config = config(&[(EnvVar::Netlify, "1")], OverrideFlags::none());
    let tty_only = |stream: Stream, _: &EnvSnapshot| match stream {
        Stream::Handle { is_terminal: true } => ColorSupport::Ansi256,
        _ => ColorSupport::NoColor,
    };
    assert_eq!(
        examine_to_determine_hyperlink_support(
            &config,
            Stream::Handle { is_terminal: true },
            &tty_only
        ),
        Ok(HyperlinkSupport::Supported)
    );
    assert_eq!(
        examine_to_determine_hyperlink_support(
            &config,
            Stream::Handle { is_terminal: false },
            &tty_only
        ),
        Ok(HyperlinkSupport::NotSupported)
    );
}
