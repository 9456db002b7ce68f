use clap::Parser;
use charsheet::cli::commands::Cli;
use charsheet::cli::handlers;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("CHARSHEET_LOG"))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
