use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    // Logs go to stderr; stdout is reserved for the statement CSV.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bank_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    if let Err(err) = bank_ledger::app::run(std::env::args()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
