#![forbid(unsafe_code)]

//! `callscope` binary entry point.

use std::env;
use std::process;

use callscope_cli::cli::{self, Command, Opts};
use callscope_cli::logging;
use callscope_inspector::InspectorConfig;

fn main() {
    logging::init(env::var(logging::ENV_LOG).ok().as_deref());

    let lookup = |name: &str| env::var(name).ok();
    let opts = match Opts::parse_from(env::args().skip(1), lookup) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{}", cli::HELP_TEXT);
            return;
        }
        Ok(Command::Version) => {
            println!("callscope {}", cli::VERSION);
            return;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Run with --help for usage information.");
            process::exit(2);
        }
    };

    let config = InspectorConfig::from_lookup(lookup);
    tracing::debug!(?config, "configuration loaded");

    match callscope_cli::run(&opts, config) {
        Ok(out) => {
            print!("{out}");
            if !out.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
