use clap::Parser;
use crumb::cli::commands::Cli;
use crumb::cli::handlers;

fn main() {
    crumb::logging::init_tracing();
    let cli = Cli::parse();

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
