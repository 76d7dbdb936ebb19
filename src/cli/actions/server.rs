use crate::{api, cli::telemetry, display::Settings, short_commit};
use anyhow::Result;
use std::net::{IpAddr, SocketAddr};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub bind: IpAddr,
    pub port: u16,
    pub settings: Settings,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to bind or serve.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let result = api::new(args.bind, args.port, args.settings).await;

    telemetry::shutdown_tracer();

    result
}

fn log_startup_args(args: &Args) {
    let slot = format!("{:?}", args.settings.environment.slot()).to_lowercase();
    let entries = [
        ("listen", SocketAddr::new(args.bind, args.port).to_string()),
        ("environment", args.settings.environment.to_string()),
        ("slot", slot),
        ("version", args.settings.version.clone()),
    ];
    info!("{}", startup_message("Startup configuration", &entries));
}

fn startup_message(title: &str, entries: &[(&str, String)]) -> String {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\n{title}:", banner());
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    message
}

fn banner() -> String {
    BANNER.replace(
        "{VERSION}",
        &format!(
            " - {} - {}",
            env!("CARGO_PKG_VERSION"),
            short_commit(crate::GIT_COMMIT_HASH)
        ),
    )
}

const BANNER: &str = r"
  ____  _              ______
 | __ )| |_   _  ___  / / ___|_ __ ___  ___ _ __
 |  _ \| | | | |/ _ \/ / |  _| '__/ _ \/ _ \ '_ \
 | |_) | | |_| |  __/ /| |_| | | |  __/  __/ | | |
 |____/|_|\__,_|\___/_/  \____|_|  \___|\___|_| |_|
  E N V B A N N E R {VERSION}";
