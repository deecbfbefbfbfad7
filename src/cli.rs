//! Command-line argument handling.
//!
//! Three shapes of invocation:
//! - no positional arguments: batch mode over the configured input file,
//! - one code: single-code mode, printed to the console,
//! - two paths: batch mode with explicit input and output files.
//!
//! The legacy help tokens `?`, `-?` and `-help` are accepted alongside the
//! standard `-h`/`--help` flags.

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "devinfo",
    version,
    about = "Resolve device model codes to human-readable device names",
    after_help = "Examples:\n  \
        devinfo                       process the configured input file\n  \
        devinfo SM-S918B              look up a single code\n  \
        devinfo codes.txt out.csv     process an explicit input file"
)]
pub struct Cli {
    /// A device code to look up, or an input file of codes when OUTPUT is
    /// also given
    pub target: Option<String>,

    /// Output CSV path; giving one makes TARGET an input file path
    pub output: Option<PathBuf>,
}

/// What the process was asked to do, after help-token handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Resolve every code in an input file. `None` paths fall back to the
    /// configured defaults.
    Batch { input: Option<PathBuf>, output: Option<PathBuf> },
    /// Resolve one code given on the command line.
    Single { code: String },
}

impl From<Cli> for Invocation {
    fn from(cli: Cli) -> Self {
        match (cli.target, cli.output) {
            (Some(input), Some(output)) => {
                Self::Batch { input: Some(PathBuf::from(input)), output: Some(output) }
            },
            (Some(code), None) => Self::Single { code },
            (None, _) => Self::Batch { input: None, output: None },
        }
    }
}

/// Parse the process arguments, honoring the legacy help tokens before clap
/// sees them (clap would otherwise treat `?` as a device code).
pub fn parse() -> Option<Invocation> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() == 2 && is_help_token(&args[1]) {
        // Ignore a broken pipe on help output, like clap itself does.
        let _ = Cli::command().print_help();
        return None;
    }
    Some(Cli::parse().into())
}

fn is_help_token(arg: &str) -> bool {
    matches!(arg, "?" | "-?" | "-help")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn invocation(args: &[&str]) -> Invocation {
        Cli::try_parse_from(args).unwrap().into()
    }

    #[test]
    fn no_arguments_means_batch_mode_with_defaults() {
        assert_eq!(invocation(&["devinfo"]), Invocation::Batch { input: None, output: None });
    }

    #[test]
    fn one_argument_is_a_single_code() {
        assert_eq!(
            invocation(&["devinfo", "SM-S918B"]),
            Invocation::Single { code: "SM-S918B".to_string() },
        );
    }

    #[test]
    fn two_arguments_are_explicit_input_and_output_files() {
        assert_eq!(
            invocation(&["devinfo", "codes.txt", "out/results.csv"]),
            Invocation::Batch {
                input: Some(PathBuf::from("codes.txt")),
                output: Some(PathBuf::from("out/results.csv")),
            },
        );
    }

    #[test]
    fn a_third_argument_is_rejected() {
        assert!(Cli::try_parse_from(["devinfo", "codes.txt", "out.csv", "extra"]).is_err());
    }

    #[rstest]
    #[case("?")]
    #[case("-?")]
    #[case("-help")]
    fn legacy_help_tokens(#[case] token: &str) {
        assert!(is_help_token(token));
    }

    #[test]
    fn ordinary_codes_are_not_help_tokens() {
        assert!(!is_help_token("SM-S918B"));
        assert!(!is_help_token("--help"));
    }
}
