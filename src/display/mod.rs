//! Environment display component.
//!
//! Everything here is infallible: an absent or unrecognized environment
//! degrades to the `development` attribute set.

mod attributes;
mod environment;
pub mod render;
mod session;
mod uptime;

pub use self::attributes::DisplayConfig;
pub use self::environment::{resolve_environment, EnvironmentName, Slot, DEFAULT_ENVIRONMENT};
pub use self::session::{
    capture_timestamp, Clock, Display, DisplaySession, EnvironmentSnapshot, Settings,
    HEALTH_PATH,
};
pub use self::uptime::{format_uptime, UptimeCounter, UptimeTicker};
