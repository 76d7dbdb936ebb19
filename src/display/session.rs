use crate::display::{format_uptime, DisplayConfig, EnvironmentName, Slot, UptimeTicker};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::fmt::{self, Display as FmtDisplay};
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::info;
use utoipa::ToSchema;

/// Relative path the "Health Check" button opens in a new tab.
pub const HEALTH_PATH: &str = "/health";

/// Configuration the display is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub environment: EnvironmentName,
    pub version: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: EnvironmentName::default(),
            version: crate::APP_VERSION.to_string(),
        }
    }
}

/// Format an instant the way a browser's en-US `toLocaleString` does,
/// e.g. `3/7/2025, 9:05:03 PM`.
pub fn capture_timestamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: FmtDisplay,
{
    now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Source of the "deployed at" text for each new session.
pub type Clock = Box<dyn Fn() -> String + Send + Sync>;

fn local_clock() -> String {
    capture_timestamp(&Local::now())
}

/// One initialization of the display.
#[derive(Debug)]
pub struct DisplaySession {
    settings: Settings,
    deployed_at: String,
    ticker: UptimeTicker,
}

impl DisplaySession {
    /// Capture the current local time and start the uptime ticker.
    #[must_use]
    pub fn initialize(settings: Settings) -> Self {
        Self::with_timestamp(settings, local_clock())
    }

    #[must_use]
    pub fn with_timestamp(settings: Settings, deployed_at: String) -> Self {
        Self {
            settings,
            deployed_at,
            ticker: UptimeTicker::start(),
        }
    }

    #[must_use]
    pub fn environment(&self) -> &EnvironmentName {
        &self.settings.environment
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.settings.version
    }

    #[must_use]
    pub fn deployed_at(&self) -> &str {
        &self.deployed_at
    }

    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.ticker.seconds()
    }

    #[must_use]
    pub fn uptime(&self) -> String {
        format_uptime(self.uptime_seconds())
    }

    #[must_use]
    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig::for_environment(&self.settings.environment)
    }

    /// Message shown by the "Check Current Environment" button.
    #[must_use]
    pub fn announcement(&self) -> String {
        format!(
            "Currently running on {} environment!",
            self.settings.environment
        )
    }

    #[must_use]
    pub fn snapshot(&self) -> EnvironmentSnapshot {
        let uptime_seconds = self.uptime_seconds();
        EnvironmentSnapshot {
            environment: self.settings.environment.to_string(),
            label: self.settings.environment.label(),
            slot: self.settings.environment.slot(),
            version: self.settings.version.clone(),
            deployed_at: self.deployed_at.clone(),
            uptime_seconds,
            uptime: format_uptime(uptime_seconds),
            announcement: self.announcement(),
            display: self.display_config(),
        }
    }
}

/// Point-in-time view of a session, as served by `/api/environment`.
#[derive(ToSchema, Serialize, Debug, Clone)]
pub struct EnvironmentSnapshot {
    pub environment: String,
    pub label: String,
    pub slot: Slot,
    pub version: String,
    pub deployed_at: String,
    pub uptime_seconds: u64,
    pub uptime: String,
    pub announcement: String,
    pub display: DisplayConfig,
}

/// Shared owner of the current session.
///
/// Handlers read through [`session`](Self::session); [`refresh`](Self::refresh)
/// swaps in a freshly initialized session and drops the old one, releasing its
/// ticker.
pub struct Display {
    settings: Settings,
    clock: Clock,
    session: RwLock<DisplaySession>,
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Display")
            .field("settings", &self.settings)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Display {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self::with_clock(settings, Box::new(local_clock))
    }

    /// Like [`new`](Self::new), taking every session timestamp from `clock`.
    #[must_use]
    pub fn with_clock(settings: Settings, clock: Clock) -> Self {
        info!(
            environment = %settings.environment,
            version = %settings.version,
            "initializing display"
        );
        let session = DisplaySession::with_timestamp(settings.clone(), clock());
        Self {
            settings,
            clock,
            session: RwLock::new(session),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn session(&self) -> RwLockReadGuard<'_, DisplaySession> {
        self.session.read().await
    }

    /// Re-run initialization: new timestamp, uptime back to zero.
    pub async fn refresh(&self) {
        let fresh = DisplaySession::with_timestamp(self.settings.clone(), (self.clock)());
        let previous = {
            let mut session = self.session.write().await;
            std::mem::replace(&mut *session, fresh)
        };
        info!(
            environment = %self.settings.environment,
            previous_uptime = previous.uptime_seconds(),
            "display refreshed"
        );
    }
}
