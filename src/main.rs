use clap::Parser;
use relibot::app::{handle_fatal_error, initialize_app};
use relibot::cli::{execute_command, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let (_app, config) = match initialize_app(verbose, cli.config.as_deref()) {
        Ok(initialized) => initialized,
        Err(e) => handle_fatal_error(e, verbose),
    };

    if let Err(e) = execute_command(cli, &config).await {
        handle_fatal_error(e, verbose);
    }
}
