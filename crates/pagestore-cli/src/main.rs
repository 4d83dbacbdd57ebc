// PageStore CLI entry point

use clap::Parser;
use pagestore_cli::{logging, output::OutputStyle, Cli, CommandRouter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let style = OutputStyle::default();

    let config = match CommandRouter::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", style.error(&e.user_message()));
            std::process::exit(1);
        }
    };

    let level = cli.log_level.clone().or_else(|| config.log_level.clone());
    logging::init_logging(level.as_deref());

    match CommandRouter::execute(cli, &config).await {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{}", style.error(&e.report()));
            std::process::exit(1);
        }
    }
}
