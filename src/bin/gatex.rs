use clap::Parser;
use colored::Colorize;
use gatex_core::cli::{self, Cli};
use gatex_core::exit::GatexExit;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "gatex=debug,gatex_core=debug" } else { "gatex=info,gatex_core=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> GatexExit {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.command.is_none() {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        return GatexExit::Success;
    }

    match cli::dispatch::execute(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red());
            cli::dispatch::exit_code_for(&e)
        }
    }
}
