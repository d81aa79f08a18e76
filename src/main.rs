use apitree_cli::cli::commands::call;
use apitree_cli::cli::errors::print_error_with_json;
use apitree_cli::cli::tracing_init::init_tracing;
use apitree_cli::cli::Cli;
use apitree_cli::config::ConfigManager;
use apitree_cli::output::Output;
use apitree_cli::transport::install_crypto_provider;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;

    init_tracing(cli.verbosity);
    install_crypto_provider();

    let manager = match ConfigManager::new() {
        Ok(manager) => manager,
        Err(e) => {
            print_error_with_json(&e, json_errors);
            std::process::exit(1);
        }
    };

    let output = Output::new(cli.quiet, json_errors);
    if let Err(e) = call::execute(&cli, &manager, &output).await {
        print_error_with_json(&e, json_errors);
        std::process::exit(1);
    }
}
