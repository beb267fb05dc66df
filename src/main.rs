use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use buildcost::cli::{self, Cli};

/// Installs the tracing subscriber.
///
/// Filter comes from `RUST_LOG`, defaulting to `buildcost=info`. Logs go to
/// stderr so JSON output on stdout stays clean; `BUILDCOST_LOG_FORMAT=json`
/// switches to structured log lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("buildcost=info"));

    let json = std::env::var("BUILDCOST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    cli::run(Cli::parse()).await
}
