use clap::Parser;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vcclog::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    init_logging(&args);

    let exit_code = match args.execute().await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            cli::print_error(&e.to_string());
            1
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(args: &Cli) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let level = if args.verbose {
            Level::DEBUG
        } else if args.quiet {
            Level::ERROR
        } else {
            Level::WARN
        };

        // RUST_LOG takes precedence over the flags
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("vcclog={}", level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    });
}
