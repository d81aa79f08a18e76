pub mod commands;
pub mod errors;
pub mod tracing_init;

use crate::render::OutputFormat;
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(
    name = "apitree",
    version,
    about = "apitree: command line for schema-described REST APIs",
    long_about = "apitree downloads the schema an API publishes and turns every resource\n\
                  into a command. Route tokens select the resource, an optional action\n\
                  picks the HTTP verb and the remaining flags become its parameters.\n\n\
                  Examples:\n  \
                  apitree --endpoint ovh-eu me\n  \
                  apitree private-database db42 update --login root\n  \
                  apitree me bill --help\n\n\
                  Run without route arguments to list the available resources."
)]
pub struct Cli {
    /// Endpoint name (ovh-eu, kimsufi-ca, ...) or base URL
    #[arg(long, short = 'e', value_name = "NAME|URL")]
    pub endpoint: Option<String>,

    /// Download the schemas again instead of using the cached command list
    #[arg(long)]
    pub refresh: bool,

    /// Output format of the response
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the resolved call as JSON instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Output errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        action = ArgAction::Count,
        help = "Increase logging verbosity (-v for debug, -vv for trace)"
    )]
    pub verbosity: u8,

    /// Route tokens, action and flags, e.g. `me bill list --date-from 2024-01-01`
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "ROUTE"
    )]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_tokens_are_passed_verbatim() {
        let cli = Cli::try_parse_from([
            "apitree",
            "--endpoint",
            "ovh-eu",
            "-f",
            "json",
            "private-database",
            "db42",
            "update",
            "--login",
            "root",
            "--help",
        ])
        .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("ovh-eu"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(
            cli.args,
            vec!["private-database", "db42", "update", "--login", "root", "--help"]
        );
    }

    #[test]
    fn test_no_route_tokens() {
        let cli = Cli::try_parse_from(["apitree", "--refresh", "-vv"]).unwrap();
        assert!(cli.refresh);
        assert_eq!(cli.verbosity, 2);
        assert!(cli.args.is_empty());
    }
}
