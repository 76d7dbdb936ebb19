use crate::display::{resolve_environment, Settings};
use clap::{Arg, ArgMatches, Command};

pub const ARG_ENVIRONMENT: &str = "environment";
pub const ARG_ENVIRONMENT_FALLBACK: &str = "environment-fallback";
pub const ARG_APP_VERSION: &str = "app-version";

/// Build display settings from matches.
///
/// The environment comes from `--environment` / `ENVBANNER_ENVIRONMENT`, then
/// `ENVIRONMENT`, then `development`. Blank values are skipped.
#[must_use]
pub fn settings(matches: &ArgMatches) -> Settings {
    let environment = resolve_environment([
        matches.get_one::<String>(ARG_ENVIRONMENT),
        matches.get_one::<String>(ARG_ENVIRONMENT_FALLBACK),
    ]);

    let version = matches
        .get_one::<String>(ARG_APP_VERSION)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map_or_else(|| crate::APP_VERSION.to_string(), ToString::to_string);

    Settings {
        environment,
        version,
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_ENVIRONMENT)
                .short('e')
                .long(ARG_ENVIRONMENT)
                .help("Deployment environment to display, e.g. blue, green, production")
                .env("ENVBANNER_ENVIRONMENT"),
        )
        .arg(
            // Secondary source for the environment, shared with other tooling.
            Arg::new(ARG_ENVIRONMENT_FALLBACK)
                .long(ARG_ENVIRONMENT_FALLBACK)
                .env("ENVIRONMENT")
                .hide(true),
        )
        .arg(
            Arg::new(ARG_APP_VERSION)
                .long(ARG_APP_VERSION)
                .help("Version string to display (default: the build version)")
                .env("ENVBANNER_APP_VERSION"),
        )
}
