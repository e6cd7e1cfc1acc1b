// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Report which standard streams support hyperlinks.
//!
//! ```sh
//! cargo run --example main -- --verbose
//! cargo run --example main -- --no-hyperlinks
//! FORCE_HYPERLINK=1 cargo run --example main 2>/dev/null
//! ```

use clap::Parser;
use hyperlink_support::{HyperlinkArgs, HyperlinkConfig, OverrideFlags, Stream,
                        examine_env_vars_to_determine_color_support, explain,
                        global_hyperlink_support};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(about = "🔗 Check whether this terminal renders clickable hyperlinks")]
struct CLIArg {
    #[command(flatten)]
    hyperlink_options: HyperlinkArgs,

    #[arg(long, short = 'v', help = "Log which rule decided, to stderr")]
    verbose: bool,
}

fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli_arg.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    if global_hyperlink_support::stdout()? {
        println!("Terminal stdout supports hyperlinks");
    }

    if global_hyperlink_support::stderr()? {
        println!("Terminal stderr supports hyperlinks");
    }

    if global_hyperlink_support::on(&std::io::stdin())? {
        println!("Terminal stdin supports hyperlinks");
    }

    if cli_arg.verbose {
        let mut config = HyperlinkConfig::from_process();
        config.flags = OverrideFlags::from(cli_arg.hyperlink_options);
        for stream in [Stream::Stdout, Stream::Stderr, Stream::Stdin] {
            let verdict =
                explain(&config, stream, &examine_env_vars_to_determine_color_support)?;
            println!("{stream:?}: {:?} (decided by {})", verdict.support, verdict.rule);
        }
    }

    Ok(())
}
