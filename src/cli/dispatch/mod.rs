use crate::cli::{
    actions::{server::Args, Action},
    commands::{self, display},
};
use anyhow::{Context, Result};
use std::net::IpAddr;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches
        .get_one::<u16>(commands::ARG_PORT)
        .copied()
        .unwrap_or(8080);
    let bind = matches
        .get_one::<IpAddr>(commands::ARG_BIND)
        .copied()
        .context("missing required argument: --bind")?;

    Ok(Action::Server(Args {
        bind,
        port,
        settings: display::settings(matches),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_builds_server_action() -> Result<()> {
        let matches = commands::new().try_get_matches_from(vec![
            "envbanner",
            "--port",
            "3000",
            "--bind",
            "0.0.0.0",
            "--environment",
            "blue",
            "--app-version",
            "2.0.0",
        ])?;

        let Action::Server(args) = handler(&matches)?;
        assert_eq!(args.port, 3000);
        assert_eq!(args.bind, "0.0.0.0".parse::<IpAddr>()?);
        assert_eq!(args.settings.environment.as_str(), "blue");
        assert_eq!(args.settings.version, "2.0.0");
        Ok(())
    }
}
